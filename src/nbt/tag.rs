//! Marker types for typed access into compounds and lists.
//!
//! ```
//! use nbt_select::{Compound, tag};
//!
//! let mut compound = Compound::new();
//! compound.insert("health", 20i32);
//!
//! assert_eq!(compound.get_::<tag::Int>("health"), Some(&20));
//! assert_eq!(compound.get_::<tag::Long>("health"), None);
//! ```

use crate::{Compound as CompoundValue, Kind, List as ListValue, Value};

/// A built-in kind known at compile time, with the Rust type of its payload.
pub trait TagType: Send + Sync + Sized + Clone + Copy + 'static {
    const KIND: Kind;
    type Type;

    fn as_ref(value: &Value) -> Option<&Self::Type>;

    fn as_mut(value: &mut Value) -> Option<&mut Self::Type>;

    fn into_type(value: Value) -> Option<Self::Type>;

    fn into_value(payload: Self::Type) -> Value;
}

macro_rules! define_tag {
    ($($name:ident => $ty:ty),* $(,)?) => {
        $(
            #[derive(Clone, Copy, Debug)]
            pub struct $name;

            impl TagType for $name {
                const KIND: Kind = Kind::$name;
                type Type = $ty;

                #[inline]
                fn as_ref(value: &Value) -> Option<&Self::Type> {
                    match value {
                        Value::$name(inner) => Some(inner),
                        _ => None,
                    }
                }

                #[inline]
                fn as_mut(value: &mut Value) -> Option<&mut Self::Type> {
                    match value {
                        Value::$name(inner) => Some(inner),
                        _ => None,
                    }
                }

                #[inline]
                fn into_type(value: Value) -> Option<Self::Type> {
                    match value {
                        Value::$name(inner) => Some(inner),
                        _ => None,
                    }
                }

                #[inline]
                fn into_value(payload: Self::Type) -> Value {
                    Value::$name(payload)
                }
            }
        )*
    };
}

define_tag!(
    Byte => i8,
    Short => i16,
    Int => i32,
    Long => i64,
    Float => f32,
    Double => f64,
    ByteArray => Vec<i8>,
    String => std::string::String,
    List => ListValue,
    Compound => CompoundValue,
    IntArray => Vec<i32>,
);
