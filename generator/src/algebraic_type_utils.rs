//! Names and rules derived from an algebraic type that several plugins need to agree on.

use std::collections::BTreeSet;

use adt_dsl::{AlgebraicType, Attribute, AttributeType, Error, Nullability, Subtype};
use adt_objc::{
    builtins::{builtin_type, BuiltinKind},
    KeywordArgumentModifier, Type,
};

use crate::naming::{capitalize, lowercase_first};

/// Include tag wrapping the generated declarations in an assume-nonnull region.
pub const ASSUME_NONNULL: &str = "RMAssumeNonnull";

/// Name of the instance variable holding the discriminant.
pub const SUBTYPE_INSTANCE_VARIABLE: &str = "_subtype";

/// The case name of a subtype. Single-attribute subtypes are named after their attribute.
pub fn subtype_name(subtype: &Subtype) -> String {
    match subtype {
        Subtype::NamedAttributeCollection(collection) => collection.name.clone(),
        Subtype::SingleAttribute(attribute) => capitalize(&attribute.name),
    }
}

pub fn enumeration_name(type_name: &str) -> String {
    format!("_{type_name}Subtypes")
}

pub fn enumeration_value_name(type_name: &str, subtype: &Subtype) -> String {
    enumeration_name(type_name) + &subtype_name(subtype)
}

/// The storage slot of an attribute inside the generated class, without the leading underscore.
pub fn internal_storage_name(subtype: &Subtype, attribute: &Attribute) -> String {
    match subtype {
        Subtype::NamedAttributeCollection(collection) => format!(
            "{}_{}",
            lowercase_first(&collection.name),
            lowercase_first(&attribute.name)
        ),
        Subtype::SingleAttribute(_) => lowercase_first(&attribute.name),
    }
}

pub fn instance_variable_name(subtype: &Subtype, attribute: &Attribute) -> String {
    format!("_{}", internal_storage_name(subtype, attribute))
}

/// One error per distinct case name used by more than one subtype, in order of first collision.
pub fn duplicate_subtype_name_errors(type_: &AlgebraicType) -> Vec<Error> {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    let mut errors = Vec::new();
    for name in type_.subtypes.iter().map(subtype_name) {
        if !seen.insert(name.clone()) && reported.insert(name.clone()) {
            errors.push(Error::new(format!(
                "Algebraic types cannot have two subtypes with the same name, but found two or more subtypes with the name {name}"
            )));
        }
    }
    errors
}

pub fn empty_subtype_name_errors(type_: &AlgebraicType) -> Vec<Error> {
    type_
        .subtypes
        .iter()
        .filter(|subtype| subtype_name(subtype).is_empty())
        .map(|_| Error::new("Algebraic type subtypes must have a name"))
        .collect()
}

pub fn assumes_nonnull(includes: &[String]) -> bool {
    includes.iter().any(|include| include == ASSUME_NONNULL)
}

/// Whether any declaration generated for these attributes carries nullability qualifiers. Mixing
/// qualified and unqualified pointers in one declaration is a compiler error.
pub fn uses_explicit_nullability<'a>(
    includes: &[String],
    mut attributes: impl Iterator<Item = &'a Attribute>,
) -> bool {
    assumes_nonnull(includes)
        || attributes.any(|attribute| attribute.nullability != Nullability::Inherited)
}

pub fn nullability_modifier(nullability: Nullability) -> Option<KeywordArgumentModifier> {
    match nullability {
        Nullability::Inherited => None,
        Nullability::Nonnull => Some(KeywordArgumentModifier::Nonnull),
        Nullability::Nullable => Some(KeywordArgumentModifier::Nullable),
        Nullability::NullUnspecified => Some(KeywordArgumentModifier::NullUnspecified),
    }
}

pub fn keyword_argument_modifiers(attribute: &Attribute) -> Vec<KeywordArgumentModifier> {
    nullability_modifier(attribute.nullability).into_iter().collect()
}

pub fn objc_type(type_: &AttributeType) -> Type {
    Type::new(&type_.name, &type_.reference)
}

/// Whether storing a value of this type takes a defensive copy.
pub fn is_copyable(type_: &AttributeType) -> bool {
    type_.is_object()
        && matches!(
            builtin_type(&type_.name).map(|builtin| builtin.kind),
            Some(BuiltinKind::Class { copyable: true })
        )
}

/// The expression stored for an incoming argument named `variable`.
pub fn stored_value(attribute: &Attribute, variable: &str) -> String {
    if is_copyable(&attribute.type_) {
        format!("[{variable} copy]")
    } else {
        variable.to_string()
    }
}

#[cfg(test)]
mod tests {
    use adt_dsl::parse_and_translate_algebraic_type;

    use super::*;

    fn algebraic_type(source: &str) -> AlgebraicType {
        parse_and_translate_algebraic_type(source).unwrap()
    }

    #[test]
    fn names_of_both_subtype_kinds() {
        let type_ = algebraic_type(
            "RMSomething {\n  RMOption { uint64_t someUnsignedInt }\n  %singleAttributeSubtype attributeType=\"RMObject *\"\n  rmObjectProperty\n}",
        );
        let option = &type_.subtypes[0];
        let single = &type_.subtypes[1];

        assert_eq!(subtype_name(option), "RMOption");
        assert_eq!(subtype_name(single), "RmObjectProperty");
        assert_eq!(enumeration_name(&type_.name), "_RMSomethingSubtypes");
        assert_eq!(
            enumeration_value_name(&type_.name, single),
            "_RMSomethingSubtypesRmObjectProperty"
        );
        assert_eq!(
            internal_storage_name(option, &option.attributes()[0]),
            "rMOption_someUnsignedInt"
        );
        assert_eq!(
            internal_storage_name(single, &single.attributes()[0]),
            "rmObjectProperty"
        );
    }

    #[test]
    fn duplicate_names_report_once_per_name() {
        let type_ = algebraic_type(
            "RMSomething {\n  A\n  B\n  A\n  %singleAttributeSubtype attributeType=BOOL\n  b\n  A\n}",
        );
        let errors: Vec<String> = duplicate_subtype_name_errors(&type_)
            .into_iter()
            .map(|e| e.0)
            .collect();
        assert_eq!(
            errors,
            vec![
                "Algebraic types cannot have two subtypes with the same name, but found two or more subtypes with the name A",
                "Algebraic types cannot have two subtypes with the same name, but found two or more subtypes with the name B",
            ]
        );
    }

    #[test]
    fn unnamed_subtypes_are_rejected() {
        let type_ = algebraic_type("RMSomething { {} }");
        assert_eq!(
            empty_subtype_name_errors(&type_),
            vec![Error::new("Algebraic type subtypes must have a name")]
        );
    }

    #[test]
    fn explicit_nullability() {
        let plain = algebraic_type("RMSomething { A { NSString *name } }");
        assert!(!uses_explicit_nullability(&plain.includes, plain.attributes()));

        let annotated = algebraic_type("RMSomething { A { %nullable\n NSString *name } }");
        assert!(uses_explicit_nullability(&annotated.includes, annotated.attributes()));

        let assumed = algebraic_type("RMSomething includes(RMAssumeNonnull) { A { NSString *name } }");
        assert!(uses_explicit_nullability(&assumed.includes, assumed.attributes()));
    }

    #[test]
    fn copies_immutable_foundation_objects() {
        let type_ = algebraic_type(
            "RMSomething { A { NSString *name\n NSMutableArray *items\n NSUInteger count\n RMFoo *foo } }",
        );
        let attributes = type_.subtypes[0].attributes();
        assert_eq!(stored_value(&attributes[0], "name"), "[name copy]");
        assert_eq!(stored_value(&attributes[1], "items"), "items");
        assert_eq!(stored_value(&attributes[2], "count"), "count");
        assert_eq!(stored_value(&attributes[3], "foo"), "foo");
    }
}
