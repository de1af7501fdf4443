use std::collections::BTreeMap;

/// Properties of a single annotation occurrence, e.g. `file=RMFoo.h library=RMKit`.
pub type AnnotationProperties = BTreeMap<String, String>;

/// All annotations of a declaration, by name. The same name may occur several times (think
/// multiple `%type` lines), so each name maps to its occurrences in source order.
pub type Annotations = BTreeMap<String, Vec<AnnotationProperties>>;

/// Declaration-level hint describing how an externally defined type is imported (`%type`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeLookup {
    pub name: String,
    pub library: Option<String>,
    pub file: Option<String>,
    pub can_forward_declare: bool,
}

/// The type of an attribute.
///
/// `reference` is the full spelling including generics and pointer marker (`NSArray<NSString*>*`),
/// `name` the bare type name (`NSArray`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttributeType {
    pub name: String,
    pub reference: String,
    /// The backing type of the attribute: the explicit `Type(Underlying)` spelling if given,
    /// `NSObject` for pointer types, otherwise absent.
    pub underlying_type: Option<String>,
    pub file_type_is_defined_in: Option<String>,
    pub library_type_is_defined_in: Option<String>,
    pub conforming_protocol: Option<String>,
    pub referenced_generic_types: Vec<AttributeType>,
}

impl AttributeType {
    /// Whether the attribute holds an object pointer (`id` counts as one).
    pub fn is_object(&self) -> bool {
        self.reference.ends_with('*') || self.name == "id"
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Nullability {
    /// No annotation; the enclosing region's default applies.
    #[default]
    Inherited,
    Nonnull,
    Nullable,
    NullUnspecified,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub comments: Vec<String>,
    pub annotations: Annotations,
    pub nullability: Nullability,
    pub type_: AttributeType,
}

/// A struct-like case of an algebraic type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedAttributeCollection {
    pub name: String,
    pub comments: Vec<String>,
    pub attributes: Vec<Attribute>,
}

/// One case of an algebraic type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Subtype {
    NamedAttributeCollection(NamedAttributeCollection),
    /// A case carrying exactly one value; the case is named after the attribute.
    SingleAttribute(Attribute),
}

impl Subtype {
    /// The attributes stored by this case, in declaration order.
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Subtype::NamedAttributeCollection(collection) => &collection.attributes,
            Subtype::SingleAttribute(attribute) => std::slice::from_ref(attribute),
        }
    }

    pub fn comments(&self) -> &[String] {
        match self {
            Subtype::NamedAttributeCollection(collection) => &collection.comments,
            Subtype::SingleAttribute(attribute) => &attribute.comments,
        }
    }
}

/// A tagged union declared in the algebraic type dialect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlgebraicType {
    pub annotations: Annotations,
    pub comments: Vec<String>,
    pub name: String,
    /// Opaque capability tags such as `RMAssumeNonnull` or `UseForwardDeclarations`.
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub library_name: Option<String>,
    pub type_lookups: Vec<TypeLookup>,
    pub subtypes: Vec<Subtype>,
}

impl AlgebraicType {
    /// Every attribute of every subtype, in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.subtypes.iter().flat_map(Subtype::attributes)
    }
}

/// A flat record declared in the value object dialect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueObject {
    pub annotations: Annotations,
    pub comments: Vec<String>,
    pub name: String,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub library_name: Option<String>,
    pub type_lookups: Vec<TypeLookup>,
    pub attributes: Vec<Attribute>,
}
