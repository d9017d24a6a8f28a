//! Element classes and the label registry.
//!
//! A class is a named pair of construction closures, one for each
//! constructor shape: identity only, or identity plus properties. Labels in
//! the text format map to classes through a [`ClassRegistry`].

use std::{fmt::Debug, rc::Rc};

use derivative::Derivative;
use indexmap::IndexMap;

use crate::{
    element::{Data, ElementBody},
    error::FactoryError,
    identity::Identity,
    property::{Properties, PropertyList},
};

pub type PlainConstructor = Rc<dyn Fn(&Identity) -> ElementBody>;
pub type PropertiesConstructor = Rc<dyn Fn(&Identity, Properties) -> ElementBody>;

#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct ElementClass {
    name: String,
    #[derivative(Debug = "ignore")]
    plain: Option<PlainConstructor>,
    #[derivative(Debug = "ignore")]
    with_properties: Option<PropertiesConstructor>,
}

impl ElementClass {
    /// A class with no constructors yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plain: None,
            with_properties: None,
        }
    }

    /// Add the identity-only constructor.
    pub fn with_plain(mut self, f: impl Fn(&Identity) -> ElementBody + 'static) -> Self {
        self.plain = Some(Rc::new(f));
        self
    }

    /// Add the identity-plus-properties constructor.
    pub fn with_properties(
        mut self,
        f: impl Fn(&Identity, Properties) -> ElementBody + 'static,
    ) -> Self {
        self.with_properties = Some(Rc::new(f));
        self
    }

    /// Elements without data.
    pub fn simple(name: impl Into<String>) -> Self {
        Self::new(name).with_plain(|_| ElementBody::new(Data::None))
    }

    /// Elements whose properties are frozen at construction.
    pub fn read_only_data(name: impl Into<String>) -> Self {
        Self::new(name).with_properties(|_, props| {
            ElementBody::new(match props {
                Properties::ReadOnly(list) => Data::ReadOnly(list),
                Properties::ReadWrite(list) => Data::ReadOnly(list.into_read_only()),
            })
        })
    }

    /// Elements with a mutable property list.
    pub fn data(name: impl Into<String>) -> Self {
        Self::new(name)
            .with_plain(|_| ElementBody::new(Data::ReadWrite(PropertyList::new())))
            .with_properties(|_, props| {
                ElementBody::new(match props {
                    Properties::ReadWrite(list) => Data::ReadWrite(list),
                    Properties::ReadOnly(list) => Data::ReadWrite(list.to_mutable()),
                })
            })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the class has a constructor for this shape of input.
    pub fn accepts(&self, props: Option<&Properties>) -> bool {
        match props {
            None => self.plain.is_some(),
            Some(_) => self.with_properties.is_some(),
        }
    }

    pub(crate) fn instantiate(
        &self,
        identity: &Identity,
        props: Option<Properties>,
    ) -> Result<ElementBody, FactoryError> {
        match (props, &self.plain, &self.with_properties) {
            (None, Some(plain), _) => Ok(plain(identity)),
            (Some(props), _, Some(with_properties)) => Ok(with_properties(identity, props)),
            (props, _, _) => Err(FactoryError::NoMatchingConstructor {
                class: self.name.clone(),
                shape: shape_name(props.is_some()),
            }),
        }
    }
}

pub(crate) fn shape_name(has_properties: bool) -> &'static str {
    if has_properties {
        "identity+properties"
    } else {
        "identity"
    }
}

/// The built-in classes used when nothing else is registered.
#[derive(Clone, Debug)]
struct DefaultClasses {
    plain: ElementClass,
    read_only: ElementClass,
    read_write: ElementClass,
}

/// Bidirectional label to class mapping with built-in fallbacks.
#[derive(Clone, Debug)]
pub struct ClassRegistry {
    default_label: String,
    defaults: DefaultClasses,
    by_label: IndexMap<String, ElementClass>,
}

impl ClassRegistry {
    pub fn for_nodes() -> Self {
        Self {
            default_label: "node".to_string(),
            defaults: DefaultClasses {
                plain: ElementClass::simple("SimpleNode"),
                read_only: ElementClass::read_only_data("ReadOnlyDataNode"),
                read_write: ElementClass::data("DataNode"),
            },
            by_label: IndexMap::new(),
        }
    }

    pub fn for_edges() -> Self {
        Self {
            default_label: "edge".to_string(),
            defaults: DefaultClasses {
                plain: ElementClass::simple("SimpleEdge"),
                read_only: ElementClass::read_only_data("ReadOnlyDataEdge"),
                read_write: ElementClass::data("DataEdge"),
            },
            by_label: IndexMap::new(),
        }
    }

    /// The label written for elements of unregistered classes.
    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    /// Map `label` to `class`, replacing any previous mapping.
    pub fn register(&mut self, label: impl Into<String>, class: ElementClass) {
        self.by_label.insert(label.into(), class);
    }

    pub fn class_for_label(&self, label: &str) -> Option<&ElementClass> {
        self.by_label.get(label)
    }

    /// The first label registered for the class named `class_name`.
    pub fn label_for_class(&self, class_name: &str) -> Option<&str> {
        self.by_label
            .iter()
            .find(|(_, class)| class.name() == class_name)
            .map(|(label, _)| label.as_str())
    }

    /// Registered `(label, class name)` pairs in registration order.
    pub fn labels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_label
            .iter()
            .map(|(label, class)| (label.as_str(), class.name()))
    }

    /// The built-in class matching the runtime shape of `props`.
    pub fn default_for(&self, props: Option<&Properties>) -> &ElementClass {
        match props {
            None => &self.defaults.plain,
            Some(Properties::ReadOnly(_)) => &self.defaults.read_only,
            Some(Properties::ReadWrite(_)) => &self.defaults.read_write,
        }
    }

    /// A registered or built-in class by name.
    pub fn class_named(&self, name: &str) -> Option<&ElementClass> {
        self.by_label
            .values()
            .chain([
                &self.defaults.plain,
                &self.defaults.read_only,
                &self.defaults.read_write,
            ])
            .find(|class| class.name() == name)
    }

    pub fn is_default_class(&self, name: &str) -> bool {
        [
            &self.defaults.plain,
            &self.defaults.read_only,
            &self.defaults.read_write,
        ]
        .iter()
        .any(|class| class.name() == name)
    }
}
