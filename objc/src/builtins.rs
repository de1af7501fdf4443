use std::collections::HashMap;

use lazy_static::lazy_static;

use super::Import;

/// The framework a built-in type is declared in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Framework {
    Foundation,
    CoreGraphics,
}

impl Framework {
    pub fn import(self) -> Import {
        let (file, library) = match self {
            Framework::Foundation => ("Foundation.h", "Foundation"),
            Framework::CoreGraphics => ("CoreGraphics.h", "CoreGraphics"),
        };
        Import {
            file: file.into(),
            library: Some(library.into()),
            is_public: true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuiltinKind {
    /// C and Foundation scalar types, structs and enums.
    Scalar,
    /// `id`, `Class`, `SEL` and friends.
    Object,
    /// Foundation classes. `copyable` classes conform to `NSCopying` and are stored with `copy`.
    Class { copyable: bool },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuiltinType {
    pub framework: Framework,
    pub kind: BuiltinKind,
}

lazy_static! {
    static ref BUILTIN_TYPES: HashMap<&'static str, BuiltinType> = {
        use BuiltinKind::*;
        use Framework::*;

        let mut types = HashMap::new();
        let mut add = |names: &[&'static str], framework, kind| {
            for name in names {
                types.insert(*name, BuiltinType { framework, kind });
            }
        };

        add(
            &[
                "BOOL", "NSInteger", "NSUInteger", "NSTimeInterval", "NSRange", "char",
                "signed char", "unsigned char", "short", "unsigned short", "int", "unsigned int",
                "long", "unsigned long", "long long", "unsigned long long", "float", "double",
                "long double", "bool", "size_t", "int8_t", "int16_t", "int32_t", "int64_t",
                "uint8_t", "uint16_t", "uint32_t", "uint64_t",
            ],
            Foundation,
            Scalar,
        );
        add(&["CGFloat", "CGPoint", "CGSize", "CGRect"], CoreGraphics, Scalar);
        add(&["id", "Class", "SEL"], Foundation, Object);
        add(
            &[
                "NSArray", "NSAttributedString", "NSData", "NSDate", "NSDecimalNumber",
                "NSDictionary", "NSIndexSet", "NSNumber", "NSOrderedSet", "NSSet", "NSString",
                "NSURL", "NSUUID", "NSValue",
            ],
            Foundation,
            Class { copyable: true },
        );
        add(
            &[
                "NSObject", "NSError", "NSMutableArray", "NSMutableDictionary", "NSMutableSet",
                "NSMutableString", "NSMutableData", "NSMutableOrderedSet",
            ],
            Foundation,
            Class { copyable: false },
        );
        types
    };
}

/// Looks up a built-in type by its bare name.
pub fn builtin_type(name: &str) -> Option<BuiltinType> {
    BUILTIN_TYPES.get(name).copied()
}

/// The import for a built-in type, `None` for types declared elsewhere.
pub fn builtin_import(name: &str) -> Option<Import> {
    builtin_type(name).map(|builtin| builtin.framework.import())
}

/// Every generated file starts out importing Foundation publicly.
pub fn foundation_import() -> Import {
    Framework::Foundation.import()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_map_to_foundation() {
        for name in ["BOOL", "NSUInteger", "NSInteger", "id", "uint64_t", "unsigned long long"] {
            assert_eq!(builtin_import(name), Some(foundation_import()), "{name}");
        }
    }

    #[test]
    fn cgfloat_maps_to_core_graphics() {
        let import = builtin_import("CGFloat").unwrap();
        assert_eq!(import.file, "CoreGraphics.h");
        assert_eq!(import.library.as_deref(), Some("CoreGraphics"));
    }

    #[test]
    fn custom_types_are_not_builtin() {
        assert_eq!(builtin_type("RMSomething"), None);
        assert_eq!(builtin_import("RMSomething"), None);
    }

    #[test]
    fn copyable_classes() {
        assert_eq!(
            builtin_type("NSString").map(|t| t.kind),
            Some(BuiltinKind::Class { copyable: true })
        );
        assert_eq!(
            builtin_type("NSMutableArray").map(|t| t.kind),
            Some(BuiltinKind::Class { copyable: false })
        );
    }
}
