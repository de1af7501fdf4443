//! Parser, model and translator for the `.adtValue` / `.value` declaration DSL.
//!
//! Reading a declaration happens in two phases. [`parser`] turns text into the loosely typed
//! [`parse_tree`]; [`translate`] turns that into the [`model`] the generator consumes. The first
//! phase stops at the first syntax error, the second reports every problem it finds.

pub mod error;
pub mod model;
pub mod parse_tree;
pub mod parser;
pub mod translate;

pub use error::{Error, ParseError};
pub use model::{
    AlgebraicType, AnnotationProperties, Annotations, Attribute, AttributeType,
    NamedAttributeCollection, Nullability, Subtype, TypeLookup, ValueObject,
};

/// Parses and translates an algebraic type declaration.
///
/// A syntax error is reported as the only error.
pub fn parse_and_translate_algebraic_type(source: &str) -> Result<AlgebraicType, Vec<Error>> {
    let parsed = parser::parse_algebraic_type(source).map_err(|e| {
        tracing::debug!("algebraic type declaration rejected: {e}");
        vec![Error::new(e.to_string())]
    })?;
    tracing::trace!(
        "parsed algebraic type {} with {} subtype(s)",
        parsed.type_name,
        parsed.subtypes.len()
    );
    translate::to_algebraic_type(parsed)
}

/// Parses and translates a value object declaration.
///
/// A syntax error is reported as the only error.
pub fn parse_and_translate_value_object(source: &str) -> Result<ValueObject, Vec<Error>> {
    let parsed = parser::parse_value_object(source).map_err(|e| {
        tracing::debug!("value object declaration rejected: {e}");
        vec![Error::new(e.to_string())]
    })?;
    tracing::trace!(
        "parsed value object {} with {} attribute(s)",
        parsed.type_name,
        parsed.attributes.len()
    );
    translate::to_value_object(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_become_a_single_error() {
        let errors = parse_and_translate_algebraic_type("RMSomething {{}").unwrap_err();
        assert_eq!(
            errors,
            vec![Error::new("(line 1, column 16) expected string matching {}}")]
        );
    }

    #[test]
    fn value_object_round_trip_through_both_phases() {
        let value_object =
            parse_and_translate_value_object("%library name=RMKit\nRMPoint { CGFloat x; CGFloat y }")
                .unwrap();
        assert_eq!(value_object.name, "RMPoint");
        assert_eq!(value_object.library_name.as_deref(), Some("RMKit"));
        assert_eq!(value_object.attributes.len(), 2);
    }
}
