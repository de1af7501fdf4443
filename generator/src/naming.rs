use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CAPITALIZED_PREFIX: Regex = Regex::new("^[A-Z]+").unwrap();
}

/// Uppercases the first character, leaving the rest untouched (`rmObject` -> `RmObject`).
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first character, leaving the rest untouched (`RMOption` -> `rMOption`).
pub fn lowercase_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Drops a class prefix such as `RM` from a type name. The last capital of the leading run
/// starts the actual name, so `FOOPage` becomes `Page`.
pub fn string_removing_capitalized_prefix(name: &str) -> String {
    match CAPITALIZED_PREFIX.find(name) {
        Some(prefix) => name[prefix.end() - 1..].to_string(),
        None => name.to_string(),
    }
}
