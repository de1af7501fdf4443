//! `<Type>Matcher`, a generic class turning a match into a value of the caller's choosing.

use adt_dsl::AlgebraicType;
use adt_objc::{
    builtins::foundation_import, BlockType, Class, File, Import, Keyword, KeywordArgument,
    KeywordArgumentModifier, Method, ReturnType, Type,
};

use super::{
    function_matching::{block_parameters, handler_name, match_keyword_names, MatchingKind},
    indent,
};
use crate::{
    algebraic_type_utils::{subtype_name, uses_explicit_nullability},
    naming::{lowercase_first, string_removing_capitalized_prefix},
    plugin::AlgebraicTypePlugin,
};

/// Generic parameter of the matcher class.
const OBJECT_TYPE: &str = "ObjectType";

pub struct GenericMatching;

pub fn matcher_name(type_name: &str) -> String {
    format!("{type_name}Matcher")
}

fn generic_block_type_name(type_name: &str, subtype_name: &str) -> String {
    format!("{type_name}Generic{subtype_name}MatchHandler")
}

/// The variable holding the matched value, e.g. `something` for `RMSomething`.
fn matched_variable(type_name: &str) -> String {
    lowercase_first(&string_removing_capitalized_prefix(type_name))
}

/// Calls the void match method, forwarding each case to the generic handler.
fn code(type_: &AlgebraicType) -> Vec<String> {
    let mut code = vec![
        "__block id result = nil;".to_string(),
        format!("[{}", matched_variable(&type_.name)),
    ];
    let keywords = match_keyword_names(type_, MatchingKind::Void);
    for (keyword, subtype) in keywords.iter().zip(&type_.subtypes) {
        let parameters = block_parameters(subtype)
            .iter()
            .map(|parameter| {
                parameter
                    .type_
                    .qualified_declaration(&parameter.name, parameter.nullability)
            })
            .collect::<Vec<_>>()
            .join(", ");
        let arguments = subtype
            .attributes()
            .iter()
            .map(|attribute| attribute.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let handler = handler_name(subtype);
        code.push(indent(1, format!("{keyword}:^({parameters}) {{")));
        code.push(indent(2, format!("if ({handler}) {{")));
        code.push(indent(3, format!("result = {handler}({arguments});")));
        code.push(indent(2, "}"));
        code.push(indent(1, "}"));
    }
    code.push("];".into());
    code.push("return result;".into());
    code
}

impl GenericMatching {
    fn generic_block_types(&self, type_: &AlgebraicType) -> Vec<BlockType> {
        type_
            .subtypes
            .iter()
            .map(|subtype| BlockType {
                comments: Vec::new(),
                name: generic_block_type_name(&type_.name, &subtype_name(subtype)),
                parameters: block_parameters(subtype),
                return_type: ReturnType::of(Type::named("id")),
                is_public: true,
            })
            .collect()
    }

    fn match_method(&self, type_: &AlgebraicType) -> Method {
        let explicit_nullability = uses_explicit_nullability(&type_.includes, type_.attributes());
        let mut matched_modifiers = Vec::new();
        let mut handler_modifiers = vec![KeywordArgumentModifier::NoEscape];
        if explicit_nullability {
            matched_modifiers.push(KeywordArgumentModifier::Nonnull);
            handler_modifiers.push(KeywordArgumentModifier::Nullable);
        }

        let matched = Keyword::with_argument(
            "match",
            KeywordArgument {
                name: matched_variable(&type_.name),
                modifiers: matched_modifiers,
                type_: Type::new(&type_.name, format!("{}*", type_.name)),
            },
        );
        let handlers = type_.subtypes.iter().map(|subtype| {
            let name = subtype_name(subtype);
            Keyword::with_argument(
                lowercase_first(&name),
                KeywordArgument {
                    name: handler_name(subtype),
                    modifiers: handler_modifiers.clone(),
                    type_: Type::named(generic_block_type_name(&type_.name, &name)),
                },
            )
        });

        let mut return_type = ReturnType::of(Type::named(OBJECT_TYPE));
        if explicit_nullability {
            return_type.modifiers.push(KeywordArgumentModifier::Nullable);
        }
        Method {
            comments: Vec::new(),
            compiler_attributes: Vec::new(),
            keywords: std::iter::once(matched).chain(handlers).collect(),
            return_type,
            code: code(type_),
        }
    }

    fn matcher_file(&self, type_: &AlgebraicType) -> File {
        let name = matcher_name(&type_.name);
        let mut class = Class::new(&name);
        class.covariant_types = vec![OBJECT_TYPE.to_string()];
        class.class_methods = vec![self.match_method(type_)];
        class.subclassing_restricted = true;

        let mut file = File::new(name.clone());
        file.imports = vec![
            foundation_import(),
            Import {
                file: format!("{name}.h"),
                library: None,
                is_public: false,
            },
            Import {
                file: format!("{}.h", type_.name),
                library: type_.library_name.clone(),
                is_public: true,
            },
        ];
        file.block_types = self.generic_block_types(type_);
        file.classes.push(class);
        file
    }
}

impl AlgebraicTypePlugin for GenericMatching {
    fn name(&self) -> &'static str {
        "GenericMatching"
    }

    /// Dispatches through the void match method, so that has to be generated too.
    fn required_includes_to_run(&self) -> &'static [&'static str] {
        &["RMGenericMatching", "RMVoidMatching"]
    }

    fn additional_files(&self, type_: &AlgebraicType) -> Vec<File> {
        if type_.subtypes.is_empty() {
            return Vec::new();
        }
        vec![self.matcher_file(type_)]
    }
}
