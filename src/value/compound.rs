use indexmap::{IndexMap, map};
use rustc_hash::FxBuildHasher;

use crate::{TagType, Value};

/// A map of uniquely named child values.
///
/// Entries keep their insertion order so that decode, mutate, encode
/// reproduces the original byte layout. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    entries: IndexMap<String, Value, FxBuildHasher>,
}

impl Compound {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Typed lookup. An entry of a different kind is reported as absent.
    #[inline]
    pub fn get_<T: TagType>(&self, name: &str) -> Option<&T::Type> {
        self.entries.get(name).and_then(T::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.entries.get_mut(name)
    }

    #[inline]
    pub fn get_mut_<T: TagType>(&mut self, name: &str) -> Option<&mut T::Type> {
        self.entries.get_mut(name).and_then(T::as_mut)
    }

    /// Sets `name` to `value`, returning the value it replaced. A replaced
    /// entry keeps its position.
    #[inline]
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    /// Removes `name`, keeping the order of the remaining entries.
    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.shift_remove(name)
    }

    /// Removes `name` only if it holds a `T`.
    pub fn remove_<T: TagType>(&mut self, name: &str) -> Option<T::Type> {
        if self.get_::<T>(name).is_none() {
            return None;
        }
        self.remove(name).and_then(T::into_type)
    }

    /// Renames an entry in place. Fails, returning `false`, if `from` is
    /// missing or `to` is already taken by another entry.
    pub fn rename(&mut self, from: &str, to: impl Into<String>) -> bool {
        let to = to.into();
        if from == to {
            return self.contains_key(from);
        }
        if self.contains_key(&to) {
            return false;
        }
        let Some(index) = self.entries.get_index_of(from) else {
            return false;
        };
        let Some(value) = self.entries.shift_remove(from) else {
            return false;
        };
        self.entries.shift_insert(index, to, value);
        true
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn iter(&self) -> map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> map::IterMut<'_, String, Value> {
        self.entries.iter_mut()
    }

    #[inline]
    pub fn keys(&self) -> map::Keys<'_, String, Value> {
        self.entries.keys()
    }

    #[inline]
    pub fn values(&self) -> map::Values<'_, String, Value> {
        self.entries.values()
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Value);
    type IntoIter = map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Compound {
    type Item = (String, Value);
    type IntoIter = map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut compound = Compound::new();
        compound.extend(iter);
        compound
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Compound {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}
