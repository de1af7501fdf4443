//! Turns value object and algebraic type declarations into Objective-C object models.
//!
//! [`plugin`] holds the pipeline; each plugin in [`plugins`] contributes one slice of the
//! generated class. The result is a list of [`adt_objc::File`]s for an external renderer.

pub mod algebraic_type_utils;
pub mod config;
pub mod error;
pub mod imports;
pub mod naming;
pub mod plugin;
pub mod plugins;

use std::path::Path;

use adt_objc::File;

pub use config::GeneratorConfig;
pub use error::GenerateError;

/// Which dialect a declaration file is written in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeclarationKind {
    AlgebraicType,
    ValueObject,
}

impl DeclarationKind {
    /// `.value` files hold value objects, everything else is read as an algebraic type.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some("value") => DeclarationKind::ValueObject,
            _ => DeclarationKind::AlgebraicType,
        }
    }
}

/// Parses, translates, validates and generates one declaration.
pub fn generate_source(
    source: &str,
    kind: DeclarationKind,
    config: &GeneratorConfig,
) -> Result<Vec<File>, Vec<adt_dsl::Error>> {
    match kind {
        DeclarationKind::AlgebraicType => {
            let type_ = adt_dsl::parse_and_translate_algebraic_type(source)?;
            plugin::generate_algebraic_type(&type_, config)
        }
        DeclarationKind::ValueObject => {
            let type_ = adt_dsl::parse_and_translate_value_object(source)?;
            plugin::generate_value_object(&type_, config)
        }
    }
}

/// Reads a declaration file and generates it.
pub fn generate_file(
    path: &Path,
    kind: DeclarationKind,
    config: &GeneratorConfig,
) -> Result<Vec<File>, GenerateError> {
    let source = std::fs::read_to_string(path).map_err(|source| GenerateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("generating {} as {kind:?}", path.display());
    generate_source(&source, kind, config).map_err(|errors| GenerateError::Invalid {
        path: path.to_path_buf(),
        errors,
    })
}
