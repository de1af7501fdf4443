//! Turns the loosely typed [parse tree](crate::parse_tree) into the [model](crate::model).
//!
//! Annotation problems do not stop the translation of sibling annotations or subtypes; every
//! problem found is reported.

use crate::{
    error::{accumulate, combine, Error},
    model::{
        AlgebraicType, AnnotationProperties, Annotations, Attribute, AttributeType,
        NamedAttributeCollection, Nullability, Subtype, TypeLookup, ValueObject,
    },
    parse_tree::{
        ParsedAlgebraicType, ParsedAttribute, ParsedAttributeType, ParsedSubtype,
        ParsedValueObject,
    },
    parser::SINGLE_ATTRIBUTE_SUBTYPE,
};

/// Backing type assumed for pointer attributes without an explicit `Type(Underlying)`.
const DEFAULT_POINTER_UNDERLYING_TYPE: &str = "NSObject";

/// The last occurrence of an annotation, if any.
fn last_annotation<'a>(annotations: &'a Annotations, name: &str) -> Option<&'a AnnotationProperties> {
    annotations.get(name).and_then(|occurrences| occurrences.last())
}

fn nullability(annotations: &Annotations) -> Nullability {
    if annotations.contains_key("nonnull") {
        Nullability::Nonnull
    } else if annotations.contains_key("nullable") {
        Nullability::Nullable
    } else if annotations.contains_key("null_unspecified") {
        Nullability::NullUnspecified
    } else {
        Nullability::Inherited
    }
}

fn attribute_type(parsed: ParsedAttributeType, import: Option<&AnnotationProperties>) -> AttributeType {
    let underlying_type = match parsed.underlying_type {
        Some(underlying_type) => Some(underlying_type),
        None if parsed.is_pointer => Some(DEFAULT_POINTER_UNDERLYING_TYPE.to_string()),
        None => None,
    };
    AttributeType {
        name: parsed.name,
        reference: parsed.reference,
        underlying_type,
        file_type_is_defined_in: import.and_then(|import| import.get("file").cloned()),
        library_type_is_defined_in: import.and_then(|import| import.get("library").cloned()),
        conforming_protocol: parsed.conforming_protocol,
        referenced_generic_types: parsed
            .generics
            .into_iter()
            .map(|generic| attribute_type(generic, None))
            .collect(),
    }
}

fn attribute(parsed: ParsedAttribute) -> Attribute {
    let type_ = attribute_type(parsed.type_, last_annotation(&parsed.annotations, "import"));
    Attribute {
        name: parsed.name,
        comments: parsed.comments,
        nullability: nullability(&parsed.annotations),
        annotations: parsed.annotations,
        type_,
    }
}

fn subtype(parsed: ParsedSubtype) -> Result<Subtype, Vec<Error>> {
    match parsed.single_attribute {
        Some(single_attribute) => Ok(Subtype::SingleAttribute(attribute(single_attribute))),
        None if parsed.annotations.contains_key(SINGLE_ATTRIBUTE_SUBTYPE) => Err(vec![Error::new(
            "Invalid singleAttributeSubtype annotation",
        )]),
        None => Ok(Subtype::NamedAttributeCollection(NamedAttributeCollection {
            name: parsed.name,
            comments: parsed.comments,
            attributes: parsed.attributes.into_iter().map(attribute).collect(),
        })),
    }
}

fn type_lookup(properties: &AnnotationProperties) -> Result<TypeLookup, Vec<Error>> {
    match properties.get("name") {
        Some(name) => Ok(TypeLookup {
            name: name.clone(),
            library: properties.get("library").cloned(),
            file: properties.get("file").cloned(),
            can_forward_declare: properties
                .get("canForwardDeclare")
                .map_or(true, |value| value != "false"),
        }),
        None => Err(vec![Error::new("Invalid type annotation")]),
    }
}

/// Every `%type` annotation as a [`TypeLookup`]; one error per occurrence without a `name`.
pub fn type_lookups_from_raw_annotations(
    annotations: &Annotations,
) -> Result<Vec<TypeLookup>, Vec<Error>> {
    let occurrences = annotations.get("type").map(Vec::as_slice).unwrap_or_default();
    accumulate(occurrences.iter().map(type_lookup))
}

fn library_name(annotations: &Annotations) -> Option<String> {
    last_annotation(annotations, "library").and_then(|library| library.get("name").cloned())
}

pub fn to_algebraic_type(parsed: ParsedAlgebraicType) -> Result<AlgebraicType, Vec<Error>> {
    let type_lookups = type_lookups_from_raw_annotations(&parsed.annotations);
    let subtypes = accumulate(parsed.subtypes.into_iter().map(subtype));
    let (type_lookups, subtypes) = combine(type_lookups, subtypes)?;
    Ok(AlgebraicType {
        library_name: library_name(&parsed.annotations),
        annotations: parsed.annotations,
        comments: parsed.comments,
        name: parsed.type_name,
        includes: parsed.includes,
        excludes: parsed.excludes,
        type_lookups,
        subtypes,
    })
}

pub fn to_value_object(parsed: ParsedValueObject) -> Result<ValueObject, Vec<Error>> {
    let type_lookups = type_lookups_from_raw_annotations(&parsed.annotations)?;
    Ok(ValueObject {
        library_name: library_name(&parsed.annotations),
        annotations: parsed.annotations,
        comments: parsed.comments,
        name: parsed.type_name,
        includes: parsed.includes,
        excludes: parsed.excludes,
        type_lookups,
        attributes: parsed.attributes.into_iter().map(attribute).collect(),
    })
}
