use thiserror::Error;

/// A human-readable problem found while translating or validating a declaration.
///
/// Unlike syntax errors, these accumulate: independent sub-computations each contribute their
/// errors instead of stopping at the first one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
#[error("{0}")]
pub struct Error(pub String);

impl Error {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The input could not be consumed by the grammar. Reported at the furthest position any
/// alternative reached.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("(line {line}, column {column}) expected {expected}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub expected: String,
}

/// Collects every success, or every error if at least one item failed.
pub fn accumulate<T, I>(results: I) -> Result<Vec<T>, Vec<Error>>
where
    I: IntoIterator<Item = Result<T, Vec<Error>>>,
{
    let mut values = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(mut e) => errors.append(&mut e),
        }
    }
    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

/// Pairs two independent results, keeping the errors of both sides.
pub fn combine<A, B>(
    a: Result<A, Vec<Error>>,
    b: Result<B, Vec<Error>>,
) -> Result<(A, B), Vec<Error>> {
    match (a, b) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(a), Ok(_)) => Err(a),
        (Ok(_), Err(b)) => Err(b),
        (Err(mut a), Err(mut b)) => {
            a.append(&mut b);
            Err(a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_keeps_all_errors_in_order() {
        let results = vec![
            Err(vec![Error::new("first")]),
            Ok(1),
            Err(vec![Error::new("second"), Error::new("third")]),
        ];
        assert_eq!(
            accumulate(results),
            Err(vec![
                Error::new("first"),
                Error::new("second"),
                Error::new("third")
            ])
        );
    }

    #[test]
    fn accumulate_collects_values() {
        let results: Vec<Result<i32, Vec<Error>>> = vec![Ok(1), Ok(2)];
        assert_eq!(accumulate(results), Ok(vec![1, 2]));
    }

    #[test]
    fn combine_concatenates_errors() {
        let a: Result<(), _> = Err(vec![Error::new("a")]);
        let b: Result<(), _> = Err(vec![Error::new("b")]);
        assert_eq!(combine(a, b), Err(vec![Error::new("a"), Error::new("b")]));
    }

    #[test]
    fn parse_error_message() {
        let error = ParseError {
            line: 1,
            column: 16,
            expected: "string matching {}}".into(),
        };
        assert_eq!(
            error.to_string(),
            "(line 1, column 16) expected string matching {}}"
        );
    }
}
