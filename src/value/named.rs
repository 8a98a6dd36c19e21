use crate::{Compound, Kind, Value};

/// A standalone tag: a value together with its name, as found at the root
/// of a document.
///
/// Compound entries carry their names as map keys, so this type only
/// appears at the document boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedTag {
    name: String,
    value: Value,
}

impl NamedTag {
    #[inline]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// An empty compound named `name`, the usual document root.
    #[inline]
    pub fn compound(name: impl Into<String>) -> Self {
        Self::new(name, Compound::new())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Replaces the value, returning the old one.
    #[inline]
    pub fn set_value(&mut self, value: impl Into<Value>) -> Value {
        std::mem::replace(&mut self.value, value.into())
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    #[inline]
    pub fn as_compound(&self) -> Option<&Compound> {
        self.value.as_compound()
    }

    #[inline]
    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        self.value.as_compound_mut()
    }

    #[inline]
    pub fn into_parts(self) -> (String, Value) {
        (self.name, self.value)
    }
}
