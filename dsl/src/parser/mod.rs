//! Combinator grammar for both DSL dialects.
//!
//! The grammar never panics; every input ends up either as a parse tree or as a single
//! [`ParseError`] pointing at the line and column where the grammar gave up.

mod algebraic_type;
mod common;
mod value_object;

pub(crate) use algebraic_type::SINGLE_ATTRIBUTE_SUBTYPE;

use std::borrow::Cow;

use nom::{
    character::complete::multispace0,
    error::{ErrorKind, ParseError as NomParseError},
    IResult,
};

use crate::{
    error::ParseError,
    parse_tree::{ParsedAlgebraicType, ParsedAttributeType, ParsedValueObject},
};

/// Error type threaded through the combinators: what was expected, and where.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct GrammarError<'a> {
    remaining: &'a str,
    expected: Cow<'static, str>,
}

impl<'a> GrammarError<'a> {
    pub(crate) fn expected(remaining: &'a str, expected: impl Into<Cow<'static, str>>) -> Self {
        Self {
            remaining,
            expected: expected.into(),
        }
    }

    fn into_parse_error(self, source: &str) -> ParseError {
        let offset = source.len().saturating_sub(self.remaining.len());
        let (line, column) = line_and_column(source, offset);
        ParseError {
            line,
            column,
            expected: self.expected.into_owned(),
        }
    }
}

impl<'a> NomParseError<&'a str> for GrammarError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        Self::expected(input, format!("{kind:?}").to_lowercase())
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn from_char(input: &'a str, c: char) -> Self {
        Self::expected(input, format!("string matching {{{c}}}"))
    }

    /// Of two failed alternatives, the one that got further wins.
    fn or(self, other: Self) -> Self {
        if other.remaining.len() < self.remaining.len() {
            other
        } else {
            self
        }
    }
}

pub(crate) type PResult<'a, O> = IResult<&'a str, O, GrammarError<'a>>;

/// Matches `expected` verbatim.
pub(crate) fn literal<'a>(expected: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    move |input: &'a str| match input.strip_prefix(expected) {
        Some(rest) => Ok((rest, &input[..expected.len()])),
        None => Err(nom::Err::Error(GrammarError::expected(
            input,
            format!("string matching {{{expected}}}"),
        ))),
    }
}

/// Runs `parser`, reporting any failure as `description` expected at the starting position.
pub(crate) fn expect<'a, O, F>(
    description: &'static str,
    mut parser: F,
) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    move |input: &'a str| {
        parser(input).map_err(|e| e.map(|_| GrammarError::expected(input, description)))
    }
}

/// Runs `item` until `terminator` matches. When neither matches, the failure that got further
/// into the input is reported, so a broken entry is not hidden behind the missing terminator.
pub(crate) fn repeated_until<'a, O, T, F, G>(
    mut item: F,
    mut terminator: G,
) -> impl FnMut(&'a str) -> PResult<'a, Vec<O>>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
    G: FnMut(&'a str) -> PResult<'a, T>,
{
    move |mut input: &'a str| {
        let mut items = Vec::new();
        loop {
            let item_error = match item(input) {
                Ok((rest, _)) if rest.len() == input.len() => {
                    return Err(nom::Err::Error(GrammarError::from_error_kind(
                        input,
                        ErrorKind::Many0,
                    )));
                }
                Ok((rest, output)) => {
                    items.push(output);
                    input = rest;
                    continue;
                }
                Err(nom::Err::Error(e)) => e,
                Err(e) => return Err(e),
            };
            return match terminator(input) {
                Ok((rest, _)) => Ok((rest, items)),
                Err(nom::Err::Error(e)) => Err(nom::Err::Error(e.or(item_error))),
                Err(e) => Err(e),
            };
        }
    }
}

fn line_and_column(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

fn finish<'a, O>(source: &'a str, result: PResult<'a, O>) -> Result<O, ParseError> {
    match result {
        Ok((_, output)) => Ok(output),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e.into_parse_error(source)),
        Err(nom::Err::Incomplete(_)) => {
            Err(GrammarError::expected(&source[source.len()..], "more input").into_parse_error(source))
        }
    }
}

/// Parses a complete algebraic type declaration.
pub fn parse_algebraic_type(source: &str) -> Result<ParsedAlgebraicType, ParseError> {
    finish(source, algebraic_type::algebraic_type(source))
}

/// Parses a complete value object declaration.
pub fn parse_value_object(source: &str) -> Result<ParsedValueObject, ParseError> {
    finish(source, value_object::value_object(source))
}

/// Parses a lone attribute type reference such as `NSArray<NSString *> *`.
pub fn parse_attribute_type(source: &str) -> Result<ParsedAttributeType, ParseError> {
    finish(source, standalone_attribute_type(source))
}

fn standalone_attribute_type(input: &str) -> PResult<ParsedAttributeType> {
    let (input, _) = multispace0(input)?;
    let (input, type_) = common::attribute_type(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = common::end_of_input(input)?;
    Ok((input, type_))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_and_column_are_one_based() {
        assert_eq!(line_and_column("abc", 0), (1, 1));
        assert_eq!(line_and_column("abc", 3), (1, 4));
        assert_eq!(line_and_column("ab\ncd\nef", 7), (3, 2));
    }

    #[test]
    fn furthest_alternative_wins() {
        let near = GrammarError::expected("abc", "near");
        let far = GrammarError::expected("c", "far");
        assert_eq!(near.clone().or(far.clone()), far);
        assert_eq!(far.clone().or(near), far);
    }

    #[test]
    fn repetition_reports_the_further_failure() {
        let mut digits = repeated_until(
            nom::character::complete::one_of::<_, _, GrammarError>("0123456789"),
            literal(";"),
        );
        assert_eq!(digits("12;rest"), Ok(("rest", vec!['1', '2'])));

        let error = match digits("12x") {
            Err(nom::Err::Error(e)) => e,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(error.remaining, "x");
        assert_eq!(error.expected, "string matching {;}");
    }

    #[test]
    fn parses_pointer_attribute_type() {
        let type_ = parse_attribute_type("RMObject *").unwrap();
        assert_eq!(type_.name, "RMObject");
        assert_eq!(type_.reference, "RMObject*");
        assert!(type_.is_pointer);
    }

    #[test]
    fn rejects_trailing_input_in_attribute_type() {
        let error = parse_attribute_type("RMObject * foo").unwrap_err();
        assert_eq!(error.to_string(), "(line 1, column 12) expected EOF");
    }

    #[test]
    fn empty_attribute_type_is_an_error() {
        let error = parse_attribute_type("").unwrap_err();
        assert_eq!(error.to_string(), "(line 1, column 1) expected identifier");
    }
}
