use std::slice;

use crate::{Error, Kind, Result, TagType, Value, cold_path};

/// A homogeneous sequence of unnamed values with a declared element kind.
///
/// Every mutation checks the element kind first and leaves the list
/// untouched on mismatch. The one exception to a fixed element kind is the
/// empty list declared as End, which is how every producer writes an empty
/// list: it adopts the kind of the first element pushed into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    element: Kind,
    items: Vec<Value>,
}

impl Default for List {
    fn default() -> Self {
        Self {
            element: Kind::End,
            items: Vec::new(),
        }
    }
}

impl List {
    /// Creates an empty list of `element`.
    #[inline]
    pub fn new(element: Kind) -> Self {
        Self {
            element,
            items: Vec::new(),
        }
    }

    /// Builds a list from `items`, checking each against `element`.
    pub fn from_values(element: Kind, items: Vec<Value>) -> Result<Self> {
        if let Some(bad) = items.iter().find(|item| item.kind() != element) {
            cold_path();
            return Err(Error::TagMismatch(element.id(), bad.kind().id()));
        }
        if element == Kind::End && !items.is_empty() {
            return Err(Error::TagMismatch(element.id(), Kind::End.id()));
        }
        Ok(Self { element, items })
    }

    /// Builds a list of `T` from plain payloads; cannot fail.
    pub fn of<T: TagType>(items: impl IntoIterator<Item = T::Type>) -> Self {
        Self {
            element: T::KIND,
            items: items.into_iter().map(T::into_value).collect(),
        }
    }

    /// Used by the decoder, which has already produced values of `element`.
    #[inline]
    pub(crate) fn from_decoded(element: Kind, items: Vec<Value>) -> Self {
        debug_assert!(items.iter().all(|item| item.kind() == element));
        Self { element, items }
    }

    /// The declared element kind.
    #[inline]
    pub fn element_kind(&self) -> Kind {
        self.element
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_<T: TagType>(&self, index: usize) -> Option<&T::Type> {
        self.items.get(index).and_then(T::as_ref)
    }

    /// Mutable typed access. The returned payload cannot change kind, so the
    /// list stays homogeneous.
    #[inline]
    pub fn get_mut_<T: TagType>(&mut self, index: usize) -> Option<&mut T::Type> {
        self.items.get_mut(index).and_then(T::as_mut)
    }

    fn check(&mut self, kind: Kind) -> Result<()> {
        if kind == Kind::End {
            cold_path();
            return Err(Error::TagMismatch(self.element.id(), kind.id()));
        }
        if kind == self.element {
            return Ok(());
        }
        if self.element == Kind::End && self.items.is_empty() {
            self.element = kind;
            return Ok(());
        }
        cold_path();
        Err(Error::TagMismatch(self.element.id(), kind.id()))
    }

    /// Appends `value`. Fails with [`Error::TagMismatch`] if its kind differs
    /// from the element kind.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.check(value.kind())?;
        self.items.push(value);
        Ok(())
    }

    /// Inserts `value` at `index`, shifting later elements.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.check(value.kind())?;
        self.items.insert(index, value);
        Ok(())
    }

    /// Replaces the element at `index`, returning the old one. Returns
    /// `Ok(None)` without modifying anything if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<Option<Value>> {
        let value = value.into();
        if index >= self.items.len() {
            return Ok(None);
        }
        self.check(value.kind())?;
        Ok(Some(std::mem::replace(&mut self.items[index], value)))
    }

    /// Removes and returns the element at `index`. The element kind is kept
    /// even when the list becomes empty.
    pub fn remove(&mut self, index: usize) -> Option<Value> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Value> {
        self.items.pop()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.items.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    #[inline]
    pub fn into_values(self) -> Vec<Value> {
        self.items
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
