mod compound;
mod custom;
mod list;
mod named;

pub use compound::*;
pub use custom::*;
pub use list::*;
pub use named::*;

use crate::{Index, Kind, TagType};

/// An owned NBT value.
///
/// Every value owns its whole subtree; cloning is a deep copy and no two
/// containers ever share a child.
///
/// Equality is structural. Floats compare by bit pattern, so a NaN equals
/// itself after a round trip and `0.0 != -0.0`.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Only ever a compound terminator on the wire. As a value it is the
    /// placeholder default.
    #[default]
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    Custom(CustomValue),
}

impl Value {
    /// The default value of a built-in kind: zero, empty, or an empty list of
    /// End. Custom kinds need their registered constructor, see
    /// [`KindRegistry::construct`](crate::KindRegistry::construct).
    pub fn default_for(kind: Kind) -> Option<Self> {
        Some(match kind {
            Kind::End => Value::End,
            Kind::Byte => Value::Byte(0),
            Kind::Short => Value::Short(0),
            Kind::Int => Value::Int(0),
            Kind::Long => Value::Long(0),
            Kind::Float => Value::Float(0.0),
            Kind::Double => Value::Double(0.0),
            Kind::ByteArray => Value::ByteArray(Vec::new()),
            Kind::String => Value::String(String::new()),
            Kind::List => Value::List(List::default()),
            Kind::Compound => Value::Compound(Compound::new()),
            Kind::IntArray => Value::IntArray(Vec::new()),
            Kind::Custom(_) => return None,
        })
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        match self {
            Value::End => Kind::End,
            Value::Byte(_) => Kind::Byte,
            Value::Short(_) => Kind::Short,
            Value::Int(_) => Kind::Int,
            Value::Long(_) => Kind::Long,
            Value::Float(_) => Kind::Float,
            Value::Double(_) => Kind::Double,
            Value::ByteArray(_) => Kind::ByteArray,
            Value::String(_) => Kind::String,
            Value::List(_) => Kind::List,
            Value::Compound(_) => Kind::Compound,
            Value::IntArray(_) => Kind::IntArray,
            Value::Custom(custom) => Kind::Custom(custom.id()),
        }
    }

    /// Typed view of the payload; `None` if the kind differs.
    #[inline]
    pub fn as_<T: TagType>(&self) -> Option<&T::Type> {
        T::as_ref(self)
    }

    #[inline]
    pub fn as_mut_<T: TagType>(&mut self) -> Option<&mut T::Type> {
        T::as_mut(self)
    }

    #[inline]
    pub fn into_<T: TagType>(self) -> Option<T::Type> {
        T::into_type(self)
    }

    /// Looks up a list element by position or a compound entry by name.
    ///
    /// ```
    /// use nbt_select::{Compound, List, Value};
    ///
    /// let mut inner = List::new(nbt_select::Kind::Int);
    /// inner.push(7i32).unwrap();
    /// let mut root = Compound::new();
    /// root.insert("xs", inner);
    /// let root = Value::Compound(root);
    ///
    /// assert_eq!(root.get("xs").and_then(|xs| xs.get(0usize)), Some(&Value::Int(7)));
    /// assert_eq!(root.get(0usize), None);
    /// ```
    pub fn get(&self, index: impl Index) -> Option<&Value> {
        index.index_into(self)
    }

    /// Mutable lookup of a compound entry. List elements are not handed out
    /// as `&mut Value` since that could break the list's homogeneity; use
    /// [`List::get_mut_`] instead.
    pub fn get_mut(&mut self, index: impl Index) -> Option<&mut Value> {
        index.index_into_mut(self)
    }

    #[inline]
    pub fn as_compound(&self) -> Option<&Compound> {
        self.as_::<crate::tag::Compound>()
    }

    #[inline]
    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        self.as_mut_::<crate::tag::Compound>()
    }

    #[inline]
    pub fn as_list(&self) -> Option<&List> {
        self.as_::<crate::tag::List>()
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        self.as_::<crate::tag::String>().map(String::as_str)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::End, Value::End) => true,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::ByteArray(a), Value::ByteArray(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Compound(a), Value::Compound(b)) => a == b,
            (Value::IntArray(a), Value::IntArray(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from!(
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<i8> => ByteArray,
    String => String,
    List => List,
    Compound => Compound,
    Vec<i32> => IntArray,
    CustomValue => Custom,
);

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Byte(value as i8)
    }
}
