//! `is<Subtype>` predicates, optionally copying the stored values out.

use adt_dsl::{AlgebraicType, Attribute, Nullability, Subtype};
use adt_objc::{Keyword, KeywordArgument, Method, ReturnType, Type};

use super::indent;
use crate::{
    algebraic_type_utils::{
        assumes_nonnull, enumeration_value_name, instance_variable_name, subtype_name,
        uses_explicit_nullability, SUBTYPE_INSTANCE_VARIABLE,
    },
    naming::capitalize,
    plugin::AlgebraicTypePlugin,
};

pub struct CaseMatching;

fn pointee_qualifier(attribute: &Attribute, assume_nonnull: bool) -> &'static str {
    match attribute.nullability {
        Nullability::Nonnull => "_Nonnull",
        Nullability::Nullable => "_Nullable",
        Nullability::NullUnspecified => "_Null_unspecified",
        Nullability::Inherited if assume_nonnull => "_Nonnull",
        Nullability::Inherited => "_Null_unspecified",
    }
}

/// The type of the optional out-pointer for `attribute`. Qualifiers are only added when the
/// declaration is qualified anyway.
fn out_pointer(attribute: &Attribute, explicit_nullability: bool, assume_nonnull: bool) -> Type {
    let type_ = &attribute.type_;
    let reference = match (explicit_nullability, type_.is_object()) {
        (false, true) => format!("{}*", type_.reference),
        (false, false) => format!("{} *", type_.reference),
        (true, true) => format!(
            "{} {} *_Nullable",
            type_.reference,
            pointee_qualifier(attribute, assume_nonnull)
        ),
        (true, false) => format!("{} *_Nullable", type_.reference),
    };
    Type::new(&type_.name, reference)
}

impl CaseMatching {
    fn keywords(
        &self,
        subtype: &Subtype,
        explicit_nullability: bool,
        assume_nonnull: bool,
    ) -> Vec<Keyword> {
        let argument = |attribute: &Attribute| KeywordArgument {
            name: attribute.name.clone(),
            modifiers: Vec::new(),
            type_: out_pointer(attribute, explicit_nullability, assume_nonnull),
        };
        let name = subtype_name(subtype);
        match subtype.attributes().split_first() {
            None => vec![Keyword::without_argument(format!("is{name}"))],
            Some((first, rest)) => std::iter::once(Keyword::with_argument(
                format!("is{name}With{}", capitalize(&first.name)),
                argument(first),
            ))
            .chain(
                rest.iter()
                    .map(|attribute| Keyword::with_argument(&attribute.name, argument(attribute))),
            )
            .collect(),
        }
    }

    fn code(&self, type_: &AlgebraicType, subtype: &Subtype) -> Vec<String> {
        let value = enumeration_value_name(&type_.name, subtype);
        if subtype.attributes().is_empty() {
            return vec![format!("return {SUBTYPE_INSTANCE_VARIABLE} == {value};")];
        }
        let mut code = vec![
            format!("if ({SUBTYPE_INSTANCE_VARIABLE} != {value}) {{"),
            indent(1, "return NO;"),
            "}".to_string(),
        ];
        for attribute in subtype.attributes() {
            code.push(format!("if ({}) {{", attribute.name));
            code.push(indent(
                1,
                format!(
                    "*{} = {};",
                    attribute.name,
                    instance_variable_name(subtype, attribute)
                ),
            ));
            code.push("}".into());
        }
        code.push("return YES;".into());
        code
    }
}

impl AlgebraicTypePlugin for CaseMatching {
    fn name(&self) -> &'static str {
        "CaseMatching"
    }

    fn required_includes_to_run(&self) -> &'static [&'static str] {
        &["RMCaseMatching"]
    }

    fn instance_methods(&self, type_: &AlgebraicType) -> Vec<Method> {
        let explicit_nullability = uses_explicit_nullability(&type_.includes, type_.attributes());
        let assume_nonnull = assumes_nonnull(&type_.includes);
        type_
            .subtypes
            .iter()
            .map(|subtype| Method {
                comments: Vec::new(),
                compiler_attributes: Vec::new(),
                keywords: self.keywords(subtype, explicit_nullability, assume_nonnull),
                return_type: ReturnType::of(Type::named("BOOL")),
                code: self.code(type_, subtype),
            })
            .collect()
    }
}
