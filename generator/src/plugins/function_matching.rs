//! `match...` methods taking one handler block per subtype.

use adt_dsl::{AlgebraicType, Subtype};
use adt_objc::{
    BlockType, BlockTypeParameter, Keyword, KeywordArgument, KeywordArgumentModifier, Method,
    ReturnType, Type,
};

use super::indent;
use crate::{
    algebraic_type_utils::{
        enumeration_value_name, instance_variable_name, nullability_modifier, objc_type,
        subtype_name, uses_explicit_nullability, SUBTYPE_INSTANCE_VARIABLE,
    },
    naming::lowercase_first,
    plugin::AlgebraicTypePlugin,
};

/// What the handler blocks of a match method return.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchingKind {
    Void,
    Bool,
    Integer,
    Double,
}

impl MatchingKind {
    /// The infix used in block type and keyword names; empty for `Void`.
    pub fn infix(self) -> &'static str {
        match self {
            MatchingKind::Void => "",
            MatchingKind::Bool => "Bool",
            MatchingKind::Integer => "Integer",
            MatchingKind::Double => "Double",
        }
    }

    fn include(self) -> &'static [&'static str] {
        match self {
            MatchingKind::Void => &["RMVoidMatching"],
            MatchingKind::Bool => &["RMBoolMatching"],
            MatchingKind::Integer => &["RMIntegerMatching"],
            MatchingKind::Double => &["RMDoubleMatching"],
        }
    }

    fn result_type(self) -> Option<Type> {
        match self {
            MatchingKind::Void => None,
            MatchingKind::Bool => Some(Type::named("BOOL")),
            MatchingKind::Integer => Some(Type::named("NSInteger")),
            MatchingKind::Double => Some(Type::named("double")),
        }
    }

    fn default_value(self) -> &'static str {
        match self {
            MatchingKind::Void => "",
            MatchingKind::Bool => "NO",
            MatchingKind::Integer => "0",
            MatchingKind::Double => "0.0",
        }
    }

    fn return_type(self) -> ReturnType {
        match self.result_type() {
            Some(type_) => ReturnType::of(type_),
            None => ReturnType::void(),
        }
    }
}

pub fn block_type_name(type_name: &str, kind: MatchingKind, subtype: &Subtype) -> String {
    format!("{type_name}{}{}MatchHandler", kind.infix(), subtype_name(subtype))
}

/// Name of the handler argument for `subtype`, e.g. `someSubtypeMatchHandler`.
pub fn handler_name(subtype: &Subtype) -> String {
    format!("{}MatchHandler", lowercase_first(&subtype_name(subtype)))
}

/// Block parameters mirroring the subtype's attributes.
pub fn block_parameters(subtype: &Subtype) -> Vec<BlockTypeParameter> {
    subtype
        .attributes()
        .iter()
        .map(|attribute| BlockTypeParameter {
            name: attribute.name.clone(),
            type_: objc_type(&attribute.type_),
            nullability: nullability_modifier(attribute.nullability),
        })
        .collect()
}

/// The stored values of `subtype`, in attribute order, as handler call arguments.
pub fn stored_arguments(subtype: &Subtype) -> String {
    subtype
        .attributes()
        .iter()
        .map(|attribute| instance_variable_name(subtype, attribute))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `match[Kind]<First>`, then the lowercased names of the remaining subtypes, in declaration
/// order.
pub fn match_keyword_names(type_: &AlgebraicType, kind: MatchingKind) -> Vec<String> {
    type_
        .subtypes
        .iter()
        .enumerate()
        .map(|(index, subtype)| {
            if index == 0 {
                format!("match{}{}", kind.infix(), subtype_name(subtype))
            } else {
                lowercase_first(&subtype_name(subtype))
            }
        })
        .collect()
}

/// `match[Kind]<First>:second:third:` with one handler per subtype, in declaration order.
pub fn match_keywords(
    type_: &AlgebraicType,
    kind: MatchingKind,
    block_type_name: impl Fn(&Subtype) -> String,
) -> Vec<Keyword> {
    let mut modifiers = vec![KeywordArgumentModifier::NoEscape];
    if uses_explicit_nullability(&type_.includes, type_.attributes()) {
        modifiers.push(KeywordArgumentModifier::Nullable);
    }
    match_keyword_names(type_, kind)
        .into_iter()
        .zip(&type_.subtypes)
        .map(|(name, subtype)| {
            Keyword::with_argument(
                name,
                KeywordArgument {
                    name: handler_name(subtype),
                    modifiers: modifiers.clone(),
                    type_: Type::named(block_type_name(subtype)),
                },
            )
        })
        .collect()
}

/// Matching on one kind of handler result.
pub struct FunctionMatching(pub MatchingKind);

impl FunctionMatching {
    fn code(&self, type_: &AlgebraicType) -> Vec<String> {
        let kind = self.0;
        let mut code = Vec::new();
        if let Some(result_type) = kind.result_type() {
            code.push(format!(
                "{} = {};",
                result_type.declaration("result"),
                kind.default_value()
            ));
        }
        code.push(format!("switch ({SUBTYPE_INSTANCE_VARIABLE}) {{"));
        for subtype in &type_.subtypes {
            let handler = handler_name(subtype);
            let call = format!("{handler}({})", stored_arguments(subtype));
            code.push(indent(
                1,
                format!("case {}: {{", enumeration_value_name(&type_.name, subtype)),
            ));
            code.push(indent(2, format!("if ({handler}) {{")));
            code.push(indent(
                3,
                match kind {
                    MatchingKind::Void => format!("{call};"),
                    _ => format!("result = {call};"),
                },
            ));
            code.push(indent(2, "}"));
            code.push(indent(2, "break;"));
            code.push(indent(1, "}"));
        }
        code.push("}".into());
        if kind != MatchingKind::Void {
            code.push("return result;".into());
        }
        code
    }
}

impl AlgebraicTypePlugin for FunctionMatching {
    fn name(&self) -> &'static str {
        match self.0 {
            MatchingKind::Void => "VoidMatching",
            MatchingKind::Bool => "BoolMatching",
            MatchingKind::Integer => "IntegerMatching",
            MatchingKind::Double => "DoubleMatching",
        }
    }

    fn required_includes_to_run(&self) -> &'static [&'static str] {
        self.0.include()
    }

    fn block_types(&self, type_: &AlgebraicType) -> Vec<BlockType> {
        type_
            .subtypes
            .iter()
            .map(|subtype| BlockType {
                comments: Vec::new(),
                name: block_type_name(&type_.name, self.0, subtype),
                parameters: block_parameters(subtype),
                return_type: self.0.return_type(),
                is_public: true,
            })
            .collect()
    }

    fn instance_methods(&self, type_: &AlgebraicType) -> Vec<Method> {
        if type_.subtypes.is_empty() {
            return Vec::new();
        }
        vec![Method {
            comments: Vec::new(),
            compiler_attributes: Vec::new(),
            keywords: match_keywords(type_, self.0, |subtype| {
                block_type_name(&type_.name, self.0, subtype)
            }),
            return_type: self.0.return_type(),
            code: self.code(type_),
        }]
    }
}

#[cfg(test)]
mod tests {
    use adt_dsl::parse_and_translate_algebraic_type;
    use pretty_assertions::assert_eq;

    use super::*;

    const SOURCE: &str = "\
RMSomething {
  SomeSubtype {
    NSString *someString
    NSUInteger someUnsignedInteger
  }
  SingleAttributeSubtype {
    %nullable
    RMObject *someObject
  }
}";

    fn type_() -> AlgebraicType {
        parse_and_translate_algebraic_type(SOURCE).unwrap()
    }

    #[test]
    fn void_matching_switches_over_every_subtype() {
        let methods = FunctionMatching(MatchingKind::Void).instance_methods(&type_());
        assert_eq!(methods.len(), 1);
        let method = &methods[0];
        assert_eq!(method.selector(), "matchSomeSubtype:singleAttributeSubtype:");
        assert_eq!(method.return_type, ReturnType::void());
        assert_eq!(
            method.code,
            vec![
                "switch (_subtype) {",
                "  case _RMSomethingSubtypesSomeSubtype: {",
                "    if (someSubtypeMatchHandler) {",
                "      someSubtypeMatchHandler(_someSubtype_someString, _someSubtype_someUnsignedInteger);",
                "    }",
                "    break;",
                "  }",
                "  case _RMSomethingSubtypesSingleAttributeSubtype: {",
                "    if (singleAttributeSubtypeMatchHandler) {",
                "      singleAttributeSubtypeMatchHandler(_singleAttributeSubtype_someObject);",
                "    }",
                "    break;",
                "  }",
                "}",
            ]
        );
    }

    #[test]
    fn typed_matching_returns_a_defaulted_result() {
        let methods = FunctionMatching(MatchingKind::Bool).instance_methods(&type_());
        let method = &methods[0];
        assert_eq!(method.keywords[0].name, "matchBoolSomeSubtype");
        assert_eq!(method.return_type, ReturnType::of(Type::named("BOOL")));
        assert_eq!(method.code.first().map(String::as_str), Some("BOOL result = NO;"));
        assert_eq!(method.code.last().map(String::as_str), Some("return result;"));
        assert!(method
            .code
            .contains(&"      result = someSubtypeMatchHandler(_someSubtype_someString, _someSubtype_someUnsignedInteger);".to_string()));

        let method = &FunctionMatching(MatchingKind::Double).instance_methods(&type_())[0];
        assert_eq!(method.code[0], "double result = 0.0;");
        let method = &FunctionMatching(MatchingKind::Integer).instance_methods(&type_())[0];
        assert_eq!(method.code[0], "NSInteger result = 0;");
    }

    #[test]
    fn block_types_mirror_attributes() {
        let block_types = FunctionMatching(MatchingKind::Integer).block_types(&type_());
        let names: Vec<_> = block_types.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "RMSomethingIntegerSomeSubtypeMatchHandler",
                "RMSomethingIntegerSingleAttributeSubtypeMatchHandler"
            ]
        );
        assert_eq!(
            block_types[1].parameters,
            vec![BlockTypeParameter {
                name: "someObject".into(),
                type_: Type::new("RMObject", "RMObject*"),
                nullability: Some(KeywordArgumentModifier::Nullable),
            }]
        );
        assert_eq!(
            block_types[0].return_type,
            ReturnType::of(Type::named("NSInteger"))
        );
    }

    #[test]
    fn handlers_are_nullable_when_nullability_is_explicit() {
        let method = &FunctionMatching(MatchingKind::Void).instance_methods(&type_())[0];
        let argument = method.keywords[1].argument.as_ref().unwrap();
        assert_eq!(argument.name, "singleAttributeSubtypeMatchHandler");
        assert_eq!(
            argument.type_,
            Type::named("RMSomethingSingleAttributeSubtypeMatchHandler")
        );
        assert_eq!(
            argument.modifiers,
            vec![
                KeywordArgumentModifier::NoEscape,
                KeywordArgumentModifier::Nullable
            ]
        );
    }

    #[test]
    fn nothing_to_match_without_subtypes() {
        let type_ = parse_and_translate_algebraic_type("RMEmpty {}").unwrap();
        assert!(FunctionMatching(MatchingKind::Void).instance_methods(&type_).is_empty());
    }
}
