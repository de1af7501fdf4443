//! Storage of an algebraic type: discriminant, instance variables and dependencies.

use adt_dsl::{AlgebraicType, Error};
use adt_objc::{
    Access, ClassNullability, Enumeration, ForwardDeclaration, Import, InstanceVariable, Type,
};

use crate::{
    algebraic_type_utils::{
        assumes_nonnull, duplicate_subtype_name_errors, empty_subtype_name_errors,
        enumeration_name, enumeration_value_name, instance_variable_name, objc_type,
        SUBTYPE_INSTANCE_VARIABLE,
    },
    imports::{resolve, Dependencies, ImportContext},
    plugin::AlgebraicTypePlugin,
};

pub struct AlgebraicTypeCore;

fn dependencies(type_: &AlgebraicType) -> Dependencies {
    let context = ImportContext::new(
        &type_.name,
        type_.library_name.as_deref(),
        &type_.type_lookups,
        &type_.includes,
    );
    resolve(&context, type_.attributes().map(|attribute| &attribute.type_))
}

impl AlgebraicTypePlugin for AlgebraicTypeCore {
    fn name(&self) -> &'static str {
        "AlgebraicTypeCore"
    }

    fn imports(&self, type_: &AlgebraicType) -> Vec<Import> {
        dependencies(type_).imports
    }

    fn forward_declarations(&self, type_: &AlgebraicType) -> Vec<ForwardDeclaration> {
        dependencies(type_).forward_declarations
    }

    fn enumerations(&self, type_: &AlgebraicType) -> Vec<Enumeration> {
        vec![Enumeration {
            name: enumeration_name(&type_.name),
            underlying_type: Type::named("NSUInteger"),
            values: type_
                .subtypes
                .iter()
                .map(|subtype| enumeration_value_name(&type_.name, subtype))
                .collect(),
            is_public: false,
        }]
    }

    fn instance_variables(&self, type_: &AlgebraicType) -> Vec<InstanceVariable> {
        let discriminant = InstanceVariable {
            name: SUBTYPE_INSTANCE_VARIABLE.into(),
            return_type: Type::named(enumeration_name(&type_.name)),
            access: Access::Private,
        };
        let storage = type_.subtypes.iter().flat_map(|subtype| {
            subtype.attributes().iter().map(move |attribute| InstanceVariable {
                name: instance_variable_name(subtype, attribute),
                return_type: objc_type(&attribute.type_),
                access: Access::Private,
            })
        });
        std::iter::once(discriminant).chain(storage).collect()
    }

    fn header_comments(&self, type_: &AlgebraicType) -> Vec<String> {
        type_.comments.clone()
    }

    fn validation_errors(&self, type_: &AlgebraicType) -> Vec<Error> {
        let mut errors = empty_subtype_name_errors(type_);
        errors.extend(duplicate_subtype_name_errors(type_));
        errors
    }

    fn nullability(&self, type_: &AlgebraicType) -> Option<ClassNullability> {
        assumes_nonnull(&type_.includes).then_some(ClassNullability::AssumeNonnull)
    }

    fn subclassing_restricted(&self, _type_: &AlgebraicType) -> bool {
        true
    }
}
