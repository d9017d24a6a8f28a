use std::any::Any;

use derivative::Derivative;

use crate::{
    error::PropertyError,
    identity::Identity,
    property::{Properties, PropertyList, ReadOnlyPropertyList, Value},
};

/// The property list attached to an element, if any.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Data {
    #[default]
    None,
    ReadOnly(ReadOnlyPropertyList),
    ReadWrite(PropertyList),
}

impl From<Option<Properties>> for Data {
    fn from(props: Option<Properties>) -> Self {
        match props {
            None => Data::None,
            Some(Properties::ReadOnly(list)) => Data::ReadOnly(list),
            Some(Properties::ReadWrite(list)) => Data::ReadWrite(list),
        }
    }
}

impl Data {
    /// A copy of the values, regardless of mutability.
    pub fn snapshot(&self) -> Option<PropertyList> {
        match self {
            Data::None => None,
            Data::ReadOnly(list) => Some(list.to_mutable()),
            Data::ReadWrite(list) => Some(list.clone()),
        }
    }

    /// Rebuild properties of the same shape, deep-copying the values.
    pub fn to_properties(&self) -> Option<Properties> {
        match self {
            Data::None => None,
            Data::ReadOnly(list) => Some(Properties::ReadOnly(list.clone())),
            Data::ReadWrite(list) => Some(Properties::ReadWrite(list.clone())),
        }
    }
}

/// What a class constructor produces: the element's data plus optional
/// state private to that class.
#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct ElementBody {
    pub data: Data,
    #[derivative(Debug = "ignore")]
    pub extension: Option<Box<dyn Any>>,
}

impl ElementBody {
    pub fn new(data: Data) -> Self {
        Self {
            data,
            extension: None,
        }
    }

    pub fn with_extension<T: Any>(mut self, extension: T) -> Self {
        self.extension = Some(Box::new(extension));
        self
    }
}

/// State common to every node and edge.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct ElementCore {
    pub(crate) identity: Identity,
    pub(crate) label: String,
    pub(crate) class: String,
    pub(crate) data: Data,
    #[derivative(Debug = "ignore")]
    pub(crate) extension: Option<Box<dyn Any>>,
}

impl ElementCore {
    pub(crate) fn new(identity: Identity, label: String, class: String, body: ElementBody) -> Self {
        Self {
            identity,
            label,
            class,
            data: body.data,
            extension: body.extension,
        }
    }
}

/// Accessors shared by node and edge handles.
pub trait GraphElement {
    fn with_core<T>(&self, f: impl FnOnce(&ElementCore) -> T) -> T;

    fn with_core_mut<T>(&self, f: impl FnOnce(&mut ElementCore) -> T) -> T;

    fn id(&self) -> String {
        self.with_core(|c| c.identity.id().to_string())
    }

    fn identity(&self) -> Identity {
        self.with_core(|c| c.identity.clone())
    }

    /// The label this element was created under.
    fn label(&self) -> String {
        self.with_core(|c| c.label.clone())
    }

    /// The name of the class that constructed this element.
    fn class_name(&self) -> String {
        self.with_core(|c| c.class.clone())
    }

    fn has_properties(&self) -> bool {
        self.with_core(|c| !matches!(c.data, Data::None))
    }

    fn is_read_only(&self) -> bool {
        self.with_core(|c| matches!(c.data, Data::ReadOnly(_)))
    }

    /// A copy of the attached properties.
    fn properties(&self) -> Option<PropertyList> {
        self.with_core(|c| c.data.snapshot())
    }

    fn property(&self, key: &str) -> Option<Value> {
        self.with_core(|c| match &c.data {
            Data::None => None,
            Data::ReadOnly(list) => list.get(key).cloned(),
            Data::ReadWrite(list) => list.get(key).cloned(),
        })
    }

    fn set_property(&self, key: &str, value: Value) -> Result<Option<Value>, PropertyError> {
        self.with_core_mut(|c| match &mut c.data {
            Data::None => Err(PropertyError::NoProperties),
            Data::ReadOnly(_) => Err(PropertyError::ReadOnly(key.to_string())),
            Data::ReadWrite(list) => Ok(list.set(key, value)),
        })
    }

    /// Class-specific state attached by the constructor, if it is a `T`.
    fn extension<T: Any + Clone>(&self) -> Option<T> {
        self.with_core(|c| {
            c.extension
                .as_ref()
                .and_then(|ext| ext.downcast_ref::<T>())
                .cloned()
        })
    }

    /// `label:id`, the form used by node references in the text format.
    fn to_short_string(&self) -> String {
        self.with_core(|c| format!("{}:{}", c.label, c.identity.id()))
    }
}
