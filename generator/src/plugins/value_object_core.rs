//! Readonly properties and dependencies of a value object.

use std::collections::BTreeSet;

use adt_dsl::{Attribute, Error, Nullability, ValueObject};
use adt_objc::{Access, ClassNullability, ForwardDeclaration, Import, Property, PropertyModifier};

use crate::{
    algebraic_type_utils::{assumes_nonnull, is_copyable, objc_type},
    imports::{resolve, Dependencies, ImportContext},
    plugin::ValueObjectPlugin,
};

pub struct ValueObjectCore;

fn dependencies(type_: &ValueObject) -> Dependencies {
    let context = ImportContext::new(
        &type_.name,
        type_.library_name.as_deref(),
        &type_.type_lookups,
        &type_.includes,
    );
    resolve(&context, type_.attributes.iter().map(|attribute| &attribute.type_))
}

fn property_modifiers(attribute: &Attribute) -> Vec<PropertyModifier> {
    let memory = if is_copyable(&attribute.type_) {
        PropertyModifier::Copy
    } else if attribute.type_.is_object() {
        PropertyModifier::Strong
    } else {
        PropertyModifier::Assign
    };
    let mut modifiers = vec![PropertyModifier::Nonatomic, PropertyModifier::Readonly, memory];
    match attribute.nullability {
        Nullability::Inherited => {}
        Nullability::Nonnull => modifiers.push(PropertyModifier::Nonnull),
        Nullability::Nullable => modifiers.push(PropertyModifier::Nullable),
        Nullability::NullUnspecified => modifiers.push(PropertyModifier::NullUnspecified),
    }
    modifiers
}

impl ValueObjectPlugin for ValueObjectCore {
    fn name(&self) -> &'static str {
        "ValueObjectCore"
    }

    fn imports(&self, type_: &ValueObject) -> Vec<Import> {
        dependencies(type_).imports
    }

    fn forward_declarations(&self, type_: &ValueObject) -> Vec<ForwardDeclaration> {
        dependencies(type_).forward_declarations
    }

    fn properties(&self, type_: &ValueObject) -> Vec<Property> {
        type_
            .attributes
            .iter()
            .map(|attribute| Property {
                comments: attribute.comments.clone(),
                name: attribute.name.clone(),
                return_type: objc_type(&attribute.type_),
                modifiers: property_modifiers(attribute),
                access: Access::Public,
            })
            .collect()
    }

    fn header_comments(&self, type_: &ValueObject) -> Vec<String> {
        type_.comments.clone()
    }

    fn validation_errors(&self, type_: &ValueObject) -> Vec<Error> {
        let mut seen = BTreeSet::new();
        let mut reported = BTreeSet::new();
        type_
            .attributes
            .iter()
            .filter(|attribute| {
                !seen.insert(attribute.name.as_str()) && reported.insert(attribute.name.as_str())
            })
            .map(|attribute| {
                Error::new(format!(
                    "Value objects cannot have two attributes with the same name, but found two or more attributes with the name {}",
                    attribute.name
                ))
            })
            .collect()
    }

    fn nullability(&self, type_: &ValueObject) -> Option<ClassNullability> {
        assumes_nonnull(&type_.includes).then_some(ClassNullability::AssumeNonnull)
    }
}

#[cfg(test)]
mod tests {
    use adt_dsl::parse_and_translate_value_object;
    use pretty_assertions::assert_eq;

    use super::*;

    fn value_object(source: &str) -> ValueObject {
        parse_and_translate_value_object(source).unwrap()
    }

    #[test]
    fn memory_semantics_follow_the_attribute_type() {
        let type_ = value_object(
            "RMPerson {\n  # Display name\n  NSString *name\n  %nullable\n  RMAddress *address\n  NSUInteger age\n}",
        );
        let properties = ValueObjectCore.properties(&type_);
        assert_eq!(properties[0].comments, vec!["Display name"]);
        assert_eq!(
            properties
                .iter()
                .map(|p| p.modifiers.clone())
                .collect::<Vec<_>>(),
            vec![
                vec![
                    PropertyModifier::Nonatomic,
                    PropertyModifier::Readonly,
                    PropertyModifier::Copy
                ],
                vec![
                    PropertyModifier::Nonatomic,
                    PropertyModifier::Readonly,
                    PropertyModifier::Strong,
                    PropertyModifier::Nullable
                ],
                vec![
                    PropertyModifier::Nonatomic,
                    PropertyModifier::Readonly,
                    PropertyModifier::Assign
                ],
            ]
        );
    }

    #[test]
    fn duplicate_attribute_names() {
        let type_ = value_object("RMPerson { NSString *name\n NSString *name\n NSString *name }");
        assert_eq!(
            ValueObjectCore.validation_errors(&type_),
            vec![Error::new(
                "Value objects cannot have two attributes with the same name, but found two or more attributes with the name name"
            )]
        );
    }

    #[test]
    fn imports_attribute_types() {
        let type_ = value_object("RMPerson { RMAddress *address }");
        let files: Vec<_> = ValueObjectCore
            .imports(&type_)
            .into_iter()
            .map(|import| import.file)
            .collect();
        assert_eq!(files, vec!["Foundation.h", "RMPerson.h", "RMAddress.h"]);
    }
}
