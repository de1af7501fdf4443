//! Loosely typed output of the grammar. Annotations are still raw string maps here; the
//! [translator](crate::translate) turns these into the [model](crate::model).

use crate::model::Annotations;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedAttributeType {
    pub name: String,
    pub reference: String,
    /// The explicit `Type(Underlying)` spelling.
    pub underlying_type: Option<String>,
    pub conforming_protocol: Option<String>,
    pub generics: Vec<ParsedAttributeType>,
    pub is_pointer: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedAttribute {
    pub comments: Vec<String>,
    pub annotations: Annotations,
    pub name: String,
    pub type_: ParsedAttributeType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedSubtype {
    pub comments: Vec<String>,
    pub annotations: Annotations,
    pub name: String,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub attributes: Vec<ParsedAttribute>,
    /// Populated for `%singleAttributeSubtype` entries.
    pub single_attribute: Option<ParsedAttribute>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedAlgebraicType {
    pub comments: Vec<String>,
    pub annotations: Annotations,
    pub type_name: String,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub subtypes: Vec<ParsedSubtype>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedValueObject {
    pub comments: Vec<String>,
    pub annotations: Annotations,
    pub type_name: String,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub attributes: Vec<ParsedAttribute>,
}
