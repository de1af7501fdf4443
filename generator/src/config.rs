/// Include/exclude tags applied on top of the plugin defaults and each declaration's own tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

impl GeneratorConfig {
    pub fn new(includes: Vec<String>, excludes: Vec<String>) -> Self {
        Self { includes, excludes }
    }
}
