use std::{io, path::PathBuf};

use adt_dsl::Error;
use thiserror::Error;

/// Why a declaration file could not be turned into generated files.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path:?} is not a valid declaration:{}", indented(.errors))]
    Invalid { path: PathBuf, errors: Vec<Error> },
    #[error("Failed to serialize the generated files: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn indented(errors: &[Error]) -> String {
    errors.iter().map(|error| format!("\n  {error}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_error() {
        let error = GenerateError::Invalid {
            path: "RMSomething.adtValue".into(),
            errors: vec![Error::new("first"), Error::new("second")],
        };
        assert_eq!(
            error.to_string(),
            "\"RMSomething.adtValue\" is not a valid declaration:\n  first\n  second"
        );
    }
}
