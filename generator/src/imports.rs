//! Decides, per referenced type, between importing its header and forward-declaring it.

use adt_dsl::{AttributeType, TypeLookup};
use adt_objc::{
    builtins::{builtin_import, foundation_import},
    ForwardDeclaration, Import,
};

/// Include tag preferring forward declarations in headers over imports.
pub const USE_FORWARD_DECLARATIONS: &str = "UseForwardDeclarations";

/// The declaration whose file is being generated.
#[derive(Clone, Copy, Debug)]
pub struct ImportContext<'a> {
    pub type_name: &'a str,
    pub library_name: Option<&'a str>,
    pub type_lookups: &'a [TypeLookup],
    pub use_forward_declarations: bool,
}

impl<'a> ImportContext<'a> {
    pub fn new(
        type_name: &'a str,
        library_name: Option<&'a str>,
        type_lookups: &'a [TypeLookup],
        includes: &[String],
    ) -> Self {
        Self {
            type_name,
            library_name,
            type_lookups,
            use_forward_declarations: includes
                .iter()
                .any(|include| include == USE_FORWARD_DECLARATIONS),
        }
    }

    fn lookup(&self, name: &str) -> Option<&'a TypeLookup> {
        self.type_lookups.iter().find(|lookup| lookup.name == name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dependencies {
    pub imports: Vec<Import>,
    pub forward_declarations: Vec<ForwardDeclaration>,
}

impl Dependencies {
    fn import(&mut self, import: Import) {
        if !self.imports.contains(&import) {
            self.imports.push(import);
        }
    }

    fn forward_declare(&mut self, declaration: ForwardDeclaration) {
        if !self.forward_declarations.contains(&declaration) {
            self.forward_declarations.push(declaration);
        }
    }

    /// Foundation, the file's own header, and the declaration for a `%type` naming the type
    /// itself.
    fn add_base(&mut self, context: &ImportContext) {
        self.import(foundation_import());
        self.import(Import {
            file: format!("{}.h", context.type_name),
            library: None,
            is_public: false,
        });
        if context.lookup(context.type_name).is_some() {
            self.forward_declare(ForwardDeclaration::Class(context.type_name.to_string()));
        }
    }

    fn add_protocol(&mut self, context: &ImportContext, protocol: &str) {
        if context.use_forward_declarations {
            self.forward_declare(ForwardDeclaration::Protocol(protocol.to_string()));
            return;
        }
        let lookup = context.lookup(protocol);
        self.import(Import {
            file: lookup
                .and_then(|lookup| lookup.file.clone())
                .unwrap_or_else(|| format!("{protocol}.h")),
            library: lookup
                .and_then(|lookup| lookup.library.clone())
                .or_else(|| context.library_name.map(str::to_string)),
            is_public: true,
        });
    }

    fn add_type(&mut self, context: &ImportContext, type_: &AttributeType) {
        if let Some(protocol) = &type_.conforming_protocol {
            self.add_protocol(context, protocol);
        }
        for generic in &type_.referenced_generic_types {
            self.add_type(context, generic);
        }

        if let Some(import) = builtin_import(&type_.name) {
            self.import(import);
            return;
        }
        if type_.name == context.type_name {
            self.forward_declare(ForwardDeclaration::Class(type_.name.clone()));
            return;
        }

        let lookup = context.lookup(&type_.name);
        let import = Import {
            file: type_
                .file_type_is_defined_in
                .clone()
                .or_else(|| lookup.and_then(|lookup| lookup.file.clone()))
                .unwrap_or_else(|| format!("{}.h", type_.name)),
            library: type_
                .library_type_is_defined_in
                .clone()
                .or_else(|| lookup.and_then(|lookup| lookup.library.clone()))
                .or_else(|| context.library_name.map(str::to_string)),
            is_public: true,
        };
        let can_forward_declare = lookup.map_or(true, |lookup| lookup.can_forward_declare);

        if context.use_forward_declarations && can_forward_declare && type_.is_object() {
            self.forward_declare(ForwardDeclaration::Class(type_.name.clone()));
            // The implementation still needs the full declaration.
            self.import(Import {
                is_public: false,
                ..import
            });
        } else {
            self.import(import);
        }
    }
}

/// Imports and forward declarations of a generated file referencing `types`, de-duplicated in
/// order of first occurrence.
pub fn resolve<'t>(
    context: &ImportContext,
    types: impl IntoIterator<Item = &'t AttributeType>,
) -> Dependencies {
    let mut dependencies = Dependencies::default();
    dependencies.add_base(context);
    for type_ in types {
        dependencies.add_type(context, type_);
    }
    dependencies
}

#[cfg(test)]
mod tests {
    use adt_dsl::{parse_and_translate_algebraic_type, AlgebraicType};
    use pretty_assertions::assert_eq;

    use super::*;

    fn dependencies(source: &str) -> Dependencies {
        let type_: AlgebraicType = parse_and_translate_algebraic_type(source).unwrap();
        let context = ImportContext::new(
            &type_.name,
            type_.library_name.as_deref(),
            &type_.type_lookups,
            &type_.includes,
        );
        resolve(&context, type_.attributes().map(|attribute| &attribute.type_))
    }

    fn import(file: &str, library: Option<&str>, is_public: bool) -> Import {
        Import {
            file: file.into(),
            library: library.map(str::to_string),
            is_public,
        }
    }

    #[test]
    fn builtins_use_their_framework() {
        let result = dependencies("RMSomething { A { BOOL flag\n NSUInteger count\n CGFloat width } }");
        assert_eq!(
            result.imports,
            vec![
                foundation_import(),
                import("RMSomething.h", None, false),
                import("CoreGraphics.h", Some("CoreGraphics"), true),
            ]
        );
        assert!(result.forward_declarations.is_empty());
    }

    #[test]
    fn custom_types_are_imported_from_the_library() {
        let result = dependencies(
            "%library name=RMKit\nRMSomething { A { RMFoo *foo\n %import file=Bar.h library=BarKit\n RMBar *bar } }",
        );
        assert_eq!(
            result.imports[2..].to_vec(),
            vec![
                import("RMFoo.h", Some("RMKit"), true),
                import("Bar.h", Some("BarKit"), true),
            ]
        );
    }

    #[test]
    fn self_references_are_forward_declared() {
        let result = dependencies("RMSomething { A { RMSomething *parent } }");
        assert_eq!(
            result.forward_declarations,
            vec![ForwardDeclaration::Class("RMSomething".into())]
        );
        assert!(!result
            .imports
            .iter()
            .any(|import| import.file == "RMSomething.h" && import.is_public));
    }

    #[test]
    fn type_lookup_for_own_name_is_forward_declared() {
        let result = dependencies("%type name=RMSomething\nRMSomething { A }");
        assert_eq!(
            result.forward_declarations,
            vec![ForwardDeclaration::Class("RMSomething".into())]
        );
    }

    #[test]
    fn forward_declarations_when_requested() {
        let result = dependencies(
            "%type name=RMBar file=RMBarTypes.h canForwardDeclare=false\nRMSomething includes(UseForwardDeclarations) { A { RMFoo *foo\n RMBar *bar\n RMEnum(NSUInteger) kind } }",
        );
        assert_eq!(
            result.forward_declarations,
            vec![ForwardDeclaration::Class("RMFoo".into())]
        );
        assert_eq!(
            result.imports[2..].to_vec(),
            vec![
                import("RMFoo.h", None, false),
                import("RMBarTypes.h", None, true),
                import("RMEnum.h", None, true),
            ]
        );
    }

    #[test]
    fn generics_and_protocols_are_resolved() {
        let result = dependencies("RMSomething { A { NSArray<RMFoo *> *foos\n id<RMDelegate> delegate } }");
        assert_eq!(
            result.imports[2..].to_vec(),
            vec![import("RMFoo.h", None, true), import("RMDelegate.h", None, true)]
        );

        let result = dependencies(
            "RMSomething includes(UseForwardDeclarations) { A { id<RMDelegate> delegate } }",
        );
        assert_eq!(
            result.forward_declarations,
            vec![ForwardDeclaration::Protocol("RMDelegate".into())]
        );
    }
}
