//! One factory class method per subtype.

use adt_dsl::{AlgebraicType, Attribute, Subtype};
use adt_objc::{Keyword, KeywordArgument, Method, ReturnType, Type};

use crate::{
    algebraic_type_utils::{
        enumeration_value_name, instance_variable_name, keyword_argument_modifiers, objc_type,
        stored_value, SUBTYPE_INSTANCE_VARIABLE,
    },
    naming::{capitalize, lowercase_first},
    plugin::AlgebraicTypePlugin,
};

pub struct Initialization;

fn argument(attribute: &Attribute) -> KeywordArgument {
    KeywordArgument {
        name: attribute.name.clone(),
        modifiers: keyword_argument_modifiers(attribute),
        type_: objc_type(&attribute.type_),
    }
}

/// `someSubtypeWithFirst:second:` for collections, `attributeName:` for single attributes and a
/// bare `someSubtype` for collections without attributes.
fn keywords(subtype: &Subtype) -> Vec<Keyword> {
    match subtype {
        Subtype::SingleAttribute(attribute) => vec![Keyword::with_argument(
            lowercase_first(&attribute.name),
            argument(attribute),
        )],
        Subtype::NamedAttributeCollection(collection) => match collection.attributes.split_first() {
            None => vec![Keyword::without_argument(lowercase_first(&collection.name))],
            Some((first, rest)) => std::iter::once(Keyword::with_argument(
                format!(
                    "{}With{}",
                    lowercase_first(&collection.name),
                    capitalize(&first.name)
                ),
                argument(first),
            ))
            .chain(
                rest.iter()
                    .map(|attribute| Keyword::with_argument(&attribute.name, argument(attribute))),
            )
            .collect(),
        },
    }
}

fn code(type_: &AlgebraicType, subtype: &Subtype) -> Vec<String> {
    let mut code = vec![
        format!("{} *object = [(id)self new];", type_.name),
        format!(
            "object->{SUBTYPE_INSTANCE_VARIABLE} = {};",
            enumeration_value_name(&type_.name, subtype)
        ),
    ];
    code.extend(subtype.attributes().iter().map(|attribute| {
        format!(
            "object->{} = {};",
            instance_variable_name(subtype, attribute),
            stored_value(attribute, &attribute.name)
        )
    }));
    code.push("return object;".into());
    code
}

impl AlgebraicTypePlugin for Initialization {
    fn name(&self) -> &'static str {
        "Initialization"
    }

    fn class_methods(&self, type_: &AlgebraicType) -> Vec<Method> {
        type_
            .subtypes
            .iter()
            .map(|subtype| Method {
                comments: subtype.comments().to_vec(),
                compiler_attributes: Vec::new(),
                keywords: keywords(subtype),
                return_type: ReturnType::of(Type::named("instancetype")),
                code: code(type_, subtype),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use adt_dsl::parse_and_translate_algebraic_type;
    use pretty_assertions::assert_eq;

    use super::*;

    fn methods(source: &str) -> Vec<Method> {
        Initialization.class_methods(&parse_and_translate_algebraic_type(source).unwrap())
    }

    #[test]
    fn selectors_for_every_subtype_kind() {
        let methods = methods(
            "RMSomething {\n  # Something with values\n  SomeSubtype { NSString *someString\n NSUInteger count }\n  Empty\n  %singleAttributeSubtype attributeType=\"RMObject *\"\n  rmObjectProperty\n}",
        );
        let selectors: Vec<_> = methods.iter().map(Method::selector).collect();
        assert_eq!(
            selectors,
            vec![
                "someSubtypeWithSomeString:count:",
                "empty",
                "rmObjectProperty:"
            ]
        );
        assert_eq!(methods[0].comments, vec!["Something with values"]);
    }

    #[test]
    fn body_assigns_discriminant_and_storage() {
        let methods = methods("RMSomething { SomeSubtype { NSString *someString\n NSUInteger count } }");
        assert_eq!(
            methods[0].code,
            vec![
                "RMSomething *object = [(id)self new];",
                "object->_subtype = _RMSomethingSubtypesSomeSubtype;",
                "object->_someSubtype_someString = [someString copy];",
                "object->_someSubtype_count = count;",
                "return object;",
            ]
        );
    }

    #[test]
    fn arguments_carry_nullability() {
        let methods = methods("RMSomething { A { %nonnull\n NSString *name } }");
        let argument = methods[0].keywords[0].argument.as_ref().unwrap();
        assert_eq!(argument.name, "name");
        assert_eq!(
            argument.modifiers,
            vec![adt_objc::KeywordArgumentModifier::Nonnull]
        );
        assert_eq!(argument.type_, Type::new("NSString", "NSString*"));
    }
}
