//! Plugins and the aggregator folding their outputs into generated files.
//!
//! Every plugin sees the same declaration and contributes independent slices of the output. The
//! aggregator concatenates outputs of the same kind in registration order, then in the order the
//! plugin returned them; tests rely on that order.

use adt_dsl::{AlgebraicType, Error, ValueObject};
use adt_objc::{
    BlockType, Class, ClassNullability, Constant, Enumeration, File, ForwardDeclaration, Import,
    InstanceVariable, Macro, Method, Property,
};
use tracing::{debug, debug_span, warn};

use crate::{
    config::GeneratorConfig,
    plugins::{
        algebraic_type_core::AlgebraicTypeCore,
        case_matching::CaseMatching,
        function_matching::{FunctionMatching, MatchingKind},
        generic_matching::GenericMatching,
        initialization::Initialization,
        value_object_core::ValueObjectCore,
        value_object_initializer::ValueObjectInitializer,
    },
};

/// Includes every algebraic type gets unless it excludes them.
pub const DEFAULT_ALGEBRAIC_TYPE_INCLUDES: &[&str] = &[
    "RMVoidMatching",
    "RMBoolMatching",
    "RMIntegerMatching",
    "RMDoubleMatching",
    "RMCaseMatching",
];

pub const DEFAULT_VALUE_OBJECT_INCLUDES: &[&str] = &[];

pub trait AlgebraicTypePlugin {
    fn name(&self) -> &'static str;

    /// The plugin only runs when all of these are in the effective includes.
    fn required_includes_to_run(&self) -> &'static [&'static str] {
        &[]
    }

    fn imports(&self, _type_: &AlgebraicType) -> Vec<Import> {
        Vec::new()
    }

    fn forward_declarations(&self, _type_: &AlgebraicType) -> Vec<ForwardDeclaration> {
        Vec::new()
    }

    fn class_methods(&self, _type_: &AlgebraicType) -> Vec<Method> {
        Vec::new()
    }

    fn instance_methods(&self, _type_: &AlgebraicType) -> Vec<Method> {
        Vec::new()
    }

    fn block_types(&self, _type_: &AlgebraicType) -> Vec<BlockType> {
        Vec::new()
    }

    fn enumerations(&self, _type_: &AlgebraicType) -> Vec<Enumeration> {
        Vec::new()
    }

    fn instance_variables(&self, _type_: &AlgebraicType) -> Vec<InstanceVariable> {
        Vec::new()
    }

    fn static_constants(&self, _type_: &AlgebraicType) -> Vec<Constant> {
        Vec::new()
    }

    fn macros(&self, _type_: &AlgebraicType) -> Vec<Macro> {
        Vec::new()
    }

    fn header_comments(&self, _type_: &AlgebraicType) -> Vec<String> {
        Vec::new()
    }

    fn implemented_protocols(&self, _type_: &AlgebraicType) -> Vec<String> {
        Vec::new()
    }

    fn validation_errors(&self, _type_: &AlgebraicType) -> Vec<Error> {
        Vec::new()
    }

    fn nullability(&self, _type_: &AlgebraicType) -> Option<ClassNullability> {
        None
    }

    fn subclassing_restricted(&self, _type_: &AlgebraicType) -> bool {
        false
    }

    fn additional_files(&self, _type_: &AlgebraicType) -> Vec<File> {
        Vec::new()
    }

    /// Last chance to rewrite the assembled main file.
    fn file_transformation(&self, file: File, _type_: &AlgebraicType) -> File {
        file
    }
}

pub trait ValueObjectPlugin {
    fn name(&self) -> &'static str;

    fn required_includes_to_run(&self) -> &'static [&'static str] {
        &[]
    }

    fn imports(&self, _type_: &ValueObject) -> Vec<Import> {
        Vec::new()
    }

    fn forward_declarations(&self, _type_: &ValueObject) -> Vec<ForwardDeclaration> {
        Vec::new()
    }

    fn class_methods(&self, _type_: &ValueObject) -> Vec<Method> {
        Vec::new()
    }

    fn instance_methods(&self, _type_: &ValueObject) -> Vec<Method> {
        Vec::new()
    }

    fn properties(&self, _type_: &ValueObject) -> Vec<Property> {
        Vec::new()
    }

    fn instance_variables(&self, _type_: &ValueObject) -> Vec<InstanceVariable> {
        Vec::new()
    }

    fn static_constants(&self, _type_: &ValueObject) -> Vec<Constant> {
        Vec::new()
    }

    fn macros(&self, _type_: &ValueObject) -> Vec<Macro> {
        Vec::new()
    }

    fn header_comments(&self, _type_: &ValueObject) -> Vec<String> {
        Vec::new()
    }

    fn implemented_protocols(&self, _type_: &ValueObject) -> Vec<String> {
        Vec::new()
    }

    fn validation_errors(&self, _type_: &ValueObject) -> Vec<Error> {
        Vec::new()
    }

    fn nullability(&self, _type_: &ValueObject) -> Option<ClassNullability> {
        None
    }

    fn subclassing_restricted(&self, _type_: &ValueObject) -> bool {
        false
    }

    fn additional_files(&self, _type_: &ValueObject) -> Vec<File> {
        Vec::new()
    }

    fn file_transformation(&self, file: File, _type_: &ValueObject) -> File {
        file
    }
}

/// The algebraic type plugins, in registration order.
pub fn algebraic_type_plugins() -> Vec<Box<dyn AlgebraicTypePlugin>> {
    vec![
        Box::new(AlgebraicTypeCore),
        Box::new(Initialization),
        Box::new(FunctionMatching(MatchingKind::Void)),
        Box::new(FunctionMatching(MatchingKind::Bool)),
        Box::new(FunctionMatching(MatchingKind::Integer)),
        Box::new(FunctionMatching(MatchingKind::Double)),
        Box::new(CaseMatching),
        Box::new(GenericMatching),
    ]
}

/// The value object plugins, in registration order.
pub fn value_object_plugins() -> Vec<Box<dyn ValueObjectPlugin>> {
    vec![Box::new(ValueObjectCore), Box::new(ValueObjectInitializer)]
}

/// `defaults ∪ configured ∪ declared − excluded`, in that order of first mention.
pub fn effective_includes(
    defaults: &[&str],
    config: &GeneratorConfig,
    includes: &[String],
    excludes: &[String],
) -> Vec<String> {
    let excluded = |tag: &str| {
        config.excludes.iter().chain(excludes).any(|excluded| excluded == tag)
    };
    let mut effective: Vec<String> = Vec::new();
    let candidates = defaults
        .iter()
        .map(|tag| tag.to_string())
        .chain(config.includes.iter().cloned())
        .chain(includes.iter().cloned());
    for tag in candidates {
        if !excluded(&tag) && !effective.contains(&tag) {
            effective.push(tag);
        }
    }
    effective
}

fn should_run(required: &[&str], includes: &[String]) -> bool {
    required
        .iter()
        .all(|tag| includes.iter().any(|include| include == tag))
}

/// Everything the running plugins contributed, in aggregation order.
#[derive(Default)]
struct Contributions {
    header_comments: Vec<String>,
    imports: Vec<Import>,
    forward_declarations: Vec<ForwardDeclaration>,
    enumerations: Vec<Enumeration>,
    block_types: Vec<BlockType>,
    static_constants: Vec<Constant>,
    macros: Vec<Macro>,
    implemented_protocols: Vec<String>,
    class_methods: Vec<Method>,
    instance_methods: Vec<Method>,
    properties: Vec<Property>,
    instance_variables: Vec<InstanceVariable>,
    nullability: Option<ClassNullability>,
    subclassing_restricted: bool,
    additional_files: Vec<File>,
}

fn push_unique<T: PartialEq>(target: &mut Vec<T>, items: Vec<T>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

impl Contributions {
    /// Imports, forward declarations and protocols are de-duplicated; the first nullability wins.
    fn merge(&mut self, other: Contributions) {
        self.header_comments.extend(other.header_comments);
        push_unique(&mut self.imports, other.imports);
        push_unique(&mut self.forward_declarations, other.forward_declarations);
        self.enumerations.extend(other.enumerations);
        self.block_types.extend(other.block_types);
        self.static_constants.extend(other.static_constants);
        self.macros.extend(other.macros);
        push_unique(&mut self.implemented_protocols, other.implemented_protocols);
        self.class_methods.extend(other.class_methods);
        self.instance_methods.extend(other.instance_methods);
        self.properties.extend(other.properties);
        self.instance_variables.extend(other.instance_variables);
        self.nullability = self.nullability.or(other.nullability);
        self.subclassing_restricted |= other.subclassing_restricted;
        self.additional_files.extend(other.additional_files);
    }

    /// The main file, and the additional files after it.
    fn into_files(self, name: &str) -> (File, Vec<File>) {
        let mut class = Class::new(name);
        class.implemented_protocols = self.implemented_protocols;
        class.class_methods = self.class_methods;
        class.instance_methods = self.instance_methods;
        class.properties = self.properties;
        class.instance_variables = self.instance_variables;
        class.nullability = self.nullability.unwrap_or_default();
        class.subclassing_restricted = self.subclassing_restricted;

        let mut file = File::new(name);
        file.comments = self.header_comments;
        file.imports = self.imports;
        file.forward_declarations = self.forward_declarations;
        file.enumerations = self.enumerations;
        file.block_types = self.block_types;
        file.static_constants = self.static_constants;
        file.macros = self.macros;
        file.classes.push(class);
        (file, self.additional_files)
    }
}

/// A declaration the aggregator can run plugins over.
trait Declaration: Sized {
    fn name(&self) -> &str;

    fn includes(&self) -> &[String];

    fn with_effective_includes(&self, config: &GeneratorConfig) -> Self;
}

impl Declaration for AlgebraicType {
    fn name(&self) -> &str {
        &self.name
    }

    fn includes(&self) -> &[String] {
        &self.includes
    }

    fn with_effective_includes(&self, config: &GeneratorConfig) -> Self {
        Self {
            includes: effective_includes(
                DEFAULT_ALGEBRAIC_TYPE_INCLUDES,
                config,
                &self.includes,
                &self.excludes,
            ),
            ..self.clone()
        }
    }
}

impl Declaration for ValueObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn includes(&self) -> &[String] {
        &self.includes
    }

    fn with_effective_includes(&self, config: &GeneratorConfig) -> Self {
        Self {
            includes: effective_includes(
                DEFAULT_VALUE_OBJECT_INCLUDES,
                config,
                &self.includes,
                &self.excludes,
            ),
            ..self.clone()
        }
    }
}

/// Either plugin trait, seen from the aggregator.
trait Contributor<T> {
    fn plugin_name(&self) -> &'static str;

    fn requires(&self) -> &'static [&'static str];

    fn errors(&self, type_: &T) -> Vec<Error>;

    fn contribution(&self, type_: &T) -> Contributions;

    fn transform(&self, file: File, type_: &T) -> File;
}

impl<P: AlgebraicTypePlugin + ?Sized> Contributor<AlgebraicType> for P {
    fn plugin_name(&self) -> &'static str {
        self.name()
    }

    fn requires(&self) -> &'static [&'static str] {
        self.required_includes_to_run()
    }

    fn errors(&self, type_: &AlgebraicType) -> Vec<Error> {
        self.validation_errors(type_)
    }

    fn contribution(&self, type_: &AlgebraicType) -> Contributions {
        Contributions {
            header_comments: self.header_comments(type_),
            imports: self.imports(type_),
            forward_declarations: self.forward_declarations(type_),
            enumerations: self.enumerations(type_),
            block_types: self.block_types(type_),
            static_constants: self.static_constants(type_),
            macros: self.macros(type_),
            implemented_protocols: self.implemented_protocols(type_),
            class_methods: self.class_methods(type_),
            instance_methods: self.instance_methods(type_),
            properties: Vec::new(),
            instance_variables: self.instance_variables(type_),
            nullability: self.nullability(type_),
            subclassing_restricted: self.subclassing_restricted(type_),
            additional_files: self.additional_files(type_),
        }
    }

    fn transform(&self, file: File, type_: &AlgebraicType) -> File {
        self.file_transformation(file, type_)
    }
}

impl<P: ValueObjectPlugin + ?Sized> Contributor<ValueObject> for P {
    fn plugin_name(&self) -> &'static str {
        self.name()
    }

    fn requires(&self) -> &'static [&'static str] {
        self.required_includes_to_run()
    }

    fn errors(&self, type_: &ValueObject) -> Vec<Error> {
        self.validation_errors(type_)
    }

    fn contribution(&self, type_: &ValueObject) -> Contributions {
        Contributions {
            header_comments: self.header_comments(type_),
            imports: self.imports(type_),
            forward_declarations: self.forward_declarations(type_),
            enumerations: Vec::new(),
            block_types: Vec::new(),
            static_constants: self.static_constants(type_),
            macros: self.macros(type_),
            implemented_protocols: self.implemented_protocols(type_),
            class_methods: self.class_methods(type_),
            instance_methods: self.instance_methods(type_),
            properties: self.properties(type_),
            instance_variables: self.instance_variables(type_),
            nullability: self.nullability(type_),
            subclassing_restricted: self.subclassing_restricted(type_),
            additional_files: self.additional_files(type_),
        }
    }

    fn transform(&self, file: File, type_: &ValueObject) -> File {
        self.file_transformation(file, type_)
    }
}

fn report(name: &str, errors: Vec<Error>) -> Result<Vec<File>, Vec<Error>> {
    for error in &errors {
        warn!("{name}: {error}");
    }
    Err(errors)
}

fn generate<T, P>(
    plugins: &[Box<P>],
    type_: &T,
    config: &GeneratorConfig,
) -> Result<Vec<File>, Vec<Error>>
where
    T: Declaration,
    P: Contributor<T> + ?Sized,
{
    let type_ = type_.with_effective_includes(config);
    let running: Vec<&P> = plugins
        .iter()
        .map(|plugin| &**plugin)
        .filter(|plugin| should_run(plugin.requires(), type_.includes()))
        .collect();

    let errors: Vec<Error> = running
        .iter()
        .flat_map(|plugin| plugin.errors(&type_))
        .collect();
    if !errors.is_empty() {
        return report(type_.name(), errors);
    }

    let mut contributions = Contributions::default();
    for plugin in &running {
        let _span = debug_span!("plugin", name = plugin.plugin_name()).entered();
        debug!("generating {}", type_.name());
        contributions.merge(plugin.contribution(&type_));
    }

    let (file, mut additional_files) = contributions.into_files(type_.name());
    let file = running
        .iter()
        .fold(file, |file, plugin| plugin.transform(file, &type_));
    let mut files = vec![file];
    files.append(&mut additional_files);
    Ok(files)
}

/// Runs `plugins` over an algebraic type: the main file first, then every additional file.
pub fn generate_algebraic_type_with(
    plugins: &[Box<dyn AlgebraicTypePlugin>],
    type_: &AlgebraicType,
    config: &GeneratorConfig,
) -> Result<Vec<File>, Vec<Error>> {
    generate(plugins, type_, config)
}

pub fn generate_algebraic_type(
    type_: &AlgebraicType,
    config: &GeneratorConfig,
) -> Result<Vec<File>, Vec<Error>> {
    generate_algebraic_type_with(&algebraic_type_plugins(), type_, config)
}

/// Runs `plugins` over a value object: the main file first, then every additional file.
pub fn generate_value_object_with(
    plugins: &[Box<dyn ValueObjectPlugin>],
    type_: &ValueObject,
    config: &GeneratorConfig,
) -> Result<Vec<File>, Vec<Error>> {
    generate(plugins, type_, config)
}

pub fn generate_value_object(
    type_: &ValueObject,
    config: &GeneratorConfig,
) -> Result<Vec<File>, Vec<Error>> {
    generate_value_object_with(&value_object_plugins(), type_, config)
}
