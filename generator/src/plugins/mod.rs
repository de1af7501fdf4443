//! The built-in plugins. Registration order lives in [`crate::plugin`].

pub mod algebraic_type_core;
pub mod case_matching;
pub mod function_matching;
pub mod generic_matching;
pub mod initialization;
pub mod value_object_core;
pub mod value_object_initializer;

/// Indents a generated code line by `depth` levels of two spaces.
pub(crate) fn indent(depth: usize, line: impl AsRef<str>) -> String {
    format!("{}{}", "  ".repeat(depth), line.as_ref())
}
