//! Object model of generated Objective-C source.
//!
//! Nothing in here knows how to print Objective-C; these types are the hand-off format to a
//! renderer. The only literal source text carried by the model is the body of methods (and the
//! values of macros/constants), which are stored as ordered lists of code lines.

pub mod builtins;

use serde::Serialize;

/// A spelled-out Objective-C type. `name` is the bare type name (`NSArray`), `reference` the full
/// spelling as it appears in a declaration (`NSArray<NSString*>*`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Type {
    pub name: String,
    pub reference: String,
}

impl Type {
    pub fn new(name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference: reference.into(),
        }
    }

    /// Shorthand for a type whose reference is its name (scalars, block typedefs, `id`).
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            reference: name.clone(),
            name,
        }
    }

    /// Whether values of this type are object pointers (`id` is an implicit pointer).
    pub fn is_object(&self) -> bool {
        self.reference.trim_end().ends_with('*') || self.name == "id"
    }

    /// Renders `reference name` the way Objective-C declarations are written, keeping the star
    /// next to the variable (`NSString *value`).
    pub fn declaration(&self, variable: &str) -> String {
        let reference = self.reference.trim_end();
        match reference.strip_suffix('*') {
            Some(base) => format!("{} *{variable}", base.trim_end()),
            None => format!("{reference} {variable}"),
        }
    }

    /// Like [`Type::declaration`], qualifying object pointers with `nullability`
    /// (`NSString *_Nullable value`). Scalars are never qualified.
    pub fn qualified_declaration(
        &self,
        variable: &str,
        nullability: Option<KeywordArgumentModifier>,
    ) -> String {
        let qualifier = match nullability.and_then(KeywordArgumentModifier::nullability_qualifier) {
            Some(qualifier) if self.is_object() => qualifier,
            _ => return self.declaration(variable),
        };
        let reference = self.reference.trim_end();
        match reference.strip_suffix('*') {
            Some(base) => format!("{} *{qualifier} {variable}", base.trim_end()),
            None => format!("{reference} {qualifier} {variable}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Import {
    pub file: String,
    pub library: Option<String>,
    /// Public imports go into the header, private ones into the implementation.
    pub is_public: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ForwardDeclaration {
    Class(String),
    Protocol(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Enumeration {
    pub name: String,
    pub underlying_type: Type,
    pub values: Vec<String>,
    pub is_public: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum KeywordArgumentModifier {
    Nonnull,
    Nullable,
    NullUnspecified,
    NoEscape,
}

impl KeywordArgumentModifier {
    /// The pointer qualifier spelling of a nullability modifier.
    pub fn nullability_qualifier(self) -> Option<&'static str> {
        match self {
            KeywordArgumentModifier::Nonnull => Some("_Nonnull"),
            KeywordArgumentModifier::Nullable => Some("_Nullable"),
            KeywordArgumentModifier::NullUnspecified => Some("_Null_unspecified"),
            KeywordArgumentModifier::NoEscape => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeywordArgument {
    pub name: String,
    pub modifiers: Vec<KeywordArgumentModifier>,
    pub type_: Type,
}

/// One part of a selector, e.g. `matchFirst:` together with its argument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Keyword {
    pub name: String,
    pub argument: Option<KeywordArgument>,
}

impl Keyword {
    pub fn without_argument(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: None,
        }
    }

    pub fn with_argument(name: impl Into<String>, argument: KeywordArgument) -> Self {
        Self {
            name: name.into(),
            argument: Some(argument),
        }
    }
}

/// Return type of a method or block; `type_: None` means `void`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReturnType {
    pub type_: Option<Type>,
    pub modifiers: Vec<KeywordArgumentModifier>,
}

impl ReturnType {
    pub fn void() -> Self {
        Self {
            type_: None,
            modifiers: Vec::new(),
        }
    }

    pub fn of(type_: Type) -> Self {
        Self {
            type_: Some(type_),
            modifiers: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Method {
    pub comments: Vec<String>,
    pub compiler_attributes: Vec<String>,
    pub keywords: Vec<Keyword>,
    pub return_type: ReturnType,
    pub code: Vec<String>,
}

impl Method {
    /// The selector as the runtime sees it, e.g. `matchFirst:second:` or `isEmpty`.
    pub fn selector(&self) -> String {
        self.keywords
            .iter()
            .map(|keyword| match keyword.argument {
                Some(_) => format!("{}:", keyword.name),
                None => keyword.name.clone(),
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlockTypeParameter {
    pub name: String,
    pub type_: Type,
    pub nullability: Option<KeywordArgumentModifier>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlockType {
    pub comments: Vec<String>,
    pub name: String,
    pub parameters: Vec<BlockTypeParameter>,
    pub return_type: ReturnType,
    pub is_public: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Access {
    Private,
    Public,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InstanceVariable {
    pub name: String,
    pub return_type: Type,
    pub access: Access,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum PropertyModifier {
    Nonatomic,
    Readonly,
    Copy,
    Strong,
    Assign,
    Nonnull,
    Nullable,
    NullUnspecified,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Property {
    pub comments: Vec<String>,
    pub name: String,
    pub return_type: Type,
    pub modifiers: Vec<PropertyModifier>,
    pub access: Access,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Macro {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Constant {
    pub comments: Vec<String>,
    pub type_: Type,
    pub name: String,
    pub value: String,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub enum ClassNullability {
    #[default]
    Default,
    /// Wrap the declarations in `NS_ASSUME_NONNULL_BEGIN`/`NS_ASSUME_NONNULL_END`.
    AssumeNonnull,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Class {
    pub name: String,
    pub base_class_name: String,
    /// Lightweight generic parameters, declared `__covariant`.
    pub covariant_types: Vec<String>,
    pub implemented_protocols: Vec<String>,
    pub class_methods: Vec<Method>,
    pub instance_methods: Vec<Method>,
    pub properties: Vec<Property>,
    pub instance_variables: Vec<InstanceVariable>,
    pub nullability: ClassNullability,
    pub subclassing_restricted: bool,
}

impl Class {
    /// An empty `NSObject` subclass.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_class_name: "NSObject".into(),
            covariant_types: Vec::new(),
            implemented_protocols: Vec::new(),
            class_methods: Vec::new(),
            instance_methods: Vec::new(),
            properties: Vec::new(),
            instance_variables: Vec::new(),
            nullability: ClassNullability::Default,
            subclassing_restricted: false,
        }
    }
}

/// A header/implementation pair sharing one base name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct File {
    pub name: String,
    pub comments: Vec<String>,
    pub imports: Vec<Import>,
    pub forward_declarations: Vec<ForwardDeclaration>,
    pub enumerations: Vec<Enumeration>,
    pub block_types: Vec<BlockType>,
    pub static_constants: Vec<Constant>,
    pub macros: Vec<Macro>,
    pub classes: Vec<Class>,
}

impl File {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comments: Vec::new(),
            imports: Vec::new(),
            forward_declarations: Vec::new(),
            enumerations: Vec::new(),
            block_types: Vec::new(),
            static_constants: Vec::new(),
            macros: Vec::new(),
            classes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_keeps_star_next_to_variable() {
        assert_eq!(
            Type::new("NSString", "NSString*").declaration("value"),
            "NSString *value"
        );
        assert_eq!(
            Type::new("NSString", "NSString *").declaration("value"),
            "NSString *value"
        );
        assert_eq!(Type::named("NSUInteger").declaration("count"), "NSUInteger count");
    }

    #[test]
    fn id_is_an_object() {
        assert!(Type::named("id").is_object());
        assert!(Type::new("NSArray", "NSArray<NSString*>*").is_object());
        assert!(!Type::named("BOOL").is_object());
    }

    #[test]
    fn qualified_declaration_only_touches_objects() {
        let nullable = Some(KeywordArgumentModifier::Nullable);
        assert_eq!(
            Type::new("NSString", "NSString*").qualified_declaration("value", nullable),
            "NSString *_Nullable value"
        );
        assert_eq!(
            Type::named("id").qualified_declaration("value", Some(KeywordArgumentModifier::Nonnull)),
            "id _Nonnull value"
        );
        assert_eq!(
            Type::named("NSUInteger").qualified_declaration("count", nullable),
            "NSUInteger count"
        );
        assert_eq!(
            Type::new("NSString", "NSString*").qualified_declaration("value", None),
            "NSString *value"
        );
    }

    #[test]
    fn selector_joins_keywords() {
        let argument = KeywordArgument {
            name: "first".into(),
            modifiers: vec![],
            type_: Type::named("BOOL"),
        };
        let method = Method {
            comments: vec![],
            compiler_attributes: vec![],
            keywords: vec![
                Keyword::with_argument("matchFirst", argument.clone()),
                Keyword::with_argument("second", argument),
            ],
            return_type: ReturnType::void(),
            code: vec![],
        };
        assert_eq!(method.selector(), "matchFirst:second:");

        let method = Method {
            keywords: vec![Keyword::without_argument("isEmpty")],
            ..method
        };
        assert_eq!(method.selector(), "isEmpty");
    }
}
