use adt_dsl::{Attribute, ValueObject};
use adt_objc::{Keyword, KeywordArgument, Method, ReturnType, Type};

use super::indent;
use crate::{
    algebraic_type_utils::{keyword_argument_modifiers, objc_type, stored_value},
    naming::capitalize,
    plugin::ValueObjectPlugin,
};

/// The designated `initWith<First>:<second>:...` initializer.
pub struct ValueObjectInitializer;

fn argument(attribute: &Attribute) -> KeywordArgument {
    KeywordArgument {
        name: attribute.name.clone(),
        modifiers: keyword_argument_modifiers(attribute),
        type_: objc_type(&attribute.type_),
    }
}

impl ValueObjectPlugin for ValueObjectInitializer {
    fn name(&self) -> &'static str {
        "ValueObjectInitializer"
    }

    fn instance_methods(&self, type_: &ValueObject) -> Vec<Method> {
        let Some((first, rest)) = type_.attributes.split_first() else {
            return Vec::new();
        };
        let keywords = std::iter::once(Keyword::with_argument(
            format!("initWith{}", capitalize(&first.name)),
            argument(first),
        ))
        .chain(
            rest.iter()
                .map(|attribute| Keyword::with_argument(&attribute.name, argument(attribute))),
        )
        .collect();

        let mut code = vec!["if ((self = [super init])) {".to_string()];
        code.extend(type_.attributes.iter().map(|attribute| {
            indent(
                1,
                format!(
                    "_{} = {};",
                    attribute.name,
                    stored_value(attribute, &attribute.name)
                ),
            )
        }));
        code.push("}".into());
        code.push(String::new());
        code.push("return self;".into());

        vec![Method {
            comments: Vec::new(),
            compiler_attributes: vec!["NS_DESIGNATED_INITIALIZER".into()],
            keywords,
            return_type: ReturnType::of(Type::named("instancetype")),
            code,
        }]
    }
}

#[cfg(test)]
mod tests {
    use adt_dsl::parse_and_translate_value_object;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn initializer_assigns_every_attribute() {
        let type_ =
            parse_and_translate_value_object("RMPerson { NSString *name\n NSUInteger age }").unwrap();
        let methods = ValueObjectInitializer.instance_methods(&type_);
        assert_eq!(methods[0].selector(), "initWithName:age:");
        assert_eq!(
            methods[0].code,
            vec![
                "if ((self = [super init])) {",
                "  _name = [name copy];",
                "  _age = age;",
                "}",
                "",
                "return self;",
            ]
        );
    }

    #[test]
    fn no_initializer_without_attributes() {
        let type_ = parse_and_translate_value_object("RMEmpty {}").unwrap();
        assert!(ValueObjectInitializer.instance_methods(&type_).is_empty());
    }
}
