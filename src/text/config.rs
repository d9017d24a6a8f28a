//! What a parser may resolve names against.

use indexmap::IndexMap;

use crate::{
    factory::{ElementClass, Factory},
    property::types::TypeRegistry,
    record::NodeRecord,
};

/// A named factory configuration that a document selects with a
/// `factory = String(Name)` header property.
#[derive(Clone, Debug)]
pub struct FactoryPreset {
    name: String,
    scope: Option<String>,
    node_classes: Vec<(String, ElementClass)>,
    edge_classes: Vec<(String, ElementClass)>,
}

impl FactoryPreset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: None,
            node_classes: Vec::new(),
            edge_classes: Vec::new(),
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_node_class(mut self, label: impl Into<String>, class: ElementClass) -> Self {
        self.node_classes.push((label.into(), class));
        self
    }

    pub fn with_edge_class(mut self, label: impl Into<String>, class: ElementClass) -> Self {
        self.edge_classes.push((label.into(), class));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Register the preset's label mappings in `factory`.
    pub fn apply<R: NodeRecord>(&self, factory: &Factory<R>) {
        for (label, class) in &self.node_classes {
            factory.register_node_class(label.clone(), class.clone());
        }
        for (label, class) in &self.edge_classes {
            factory.register_edge_class(label.clone(), class.clone());
        }
    }
}

/// Classes and factory presets addressable by name from a document.
#[derive(Clone, Debug, Default)]
pub struct ClassCatalog {
    node_classes: IndexMap<String, ElementClass>,
    edge_classes: IndexMap<String, ElementClass>,
    presets: IndexMap<String, FactoryPreset>,
}

impl ClassCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node_class(&mut self, class: ElementClass) -> &mut Self {
        self.node_classes.insert(class.name().to_string(), class);
        self
    }

    pub fn add_edge_class(&mut self, class: ElementClass) -> &mut Self {
        self.edge_classes.insert(class.name().to_string(), class);
        self
    }

    pub fn add_preset(&mut self, preset: FactoryPreset) -> &mut Self {
        self.presets.insert(preset.name().to_string(), preset);
        self
    }

    pub fn node_class(&self, name: &str) -> Option<&ElementClass> {
        self.node_classes.get(name)
    }

    pub fn edge_class(&self, name: &str) -> Option<&ElementClass> {
        self.edge_classes.get(name)
    }

    pub fn preset(&self, name: &str) -> Option<&FactoryPreset> {
        self.presets.get(name)
    }
}

/// Everything a parser needs besides its input.
#[derive(Clone, Debug)]
pub struct ParserConfig {
    /// Property types available to `Type(value)` constructs.
    pub types: TypeRegistry,
    /// Classes and presets named by header properties.
    pub catalog: ClassCatalog,
    /// The character whose leading repetitions give a tree line's depth.
    pub indent: char,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            types: TypeRegistry::default(),
            catalog: ClassCatalog::default(),
            indent: '\t',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::GraphFactory;

    #[test]
    fn test_preset_registers_labels() {
        let preset = FactoryPreset::new("People")
            .with_scope("P")
            .with_node_class("person", ElementClass::data("Person"))
            .with_edge_class("knows", ElementClass::simple("Knows"));
        let mut catalog = ClassCatalog::new();
        catalog.add_preset(preset);
        let preset = catalog.preset("People").unwrap();
        assert_eq!(preset.scope(), Some("P"));
        let factory = GraphFactory::new("G");
        preset.apply(&factory);
        assert_eq!(
            factory.node_classes().class_for_label("person").map(|c| c.name().to_string()),
            Some("Person".to_string())
        );
        assert!(factory.edge_classes().class_for_label("knows").is_some());
    }
}
