//! [`serde::Serialize`] for the value model.
//!
//! Values map onto the serde data model directly: compounds become maps in
//! entry order, lists and arrays become sequences, and each primitive keeps
//! its width. Custom values have no generic representation and fail to
//! serialize.
//!
//! ```
//! use nbt_select::{Compound, List, tag};
//!
//! let mut level = Compound::new();
//! level.insert("name", "world");
//! level.insert("pos", List::of::<tag::Int>([1, 2, 3]));
//!
//! let json = serde_json::to_string(&level).unwrap();
//! assert_eq!(json, r#"{"name":"world","pos":[1,2,3]}"#);
//! ```

use serde::{
    Serialize, Serializer,
    ser::{Error as _, SerializeMap, SerializeSeq, SerializeStruct},
};

use crate::{Compound, List, NamedTag, Value};

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::End => serializer.serialize_unit(),
            Value::Byte(v) => serializer.serialize_i8(*v),
            Value::Short(v) => serializer.serialize_i16(*v),
            Value::Int(v) => serializer.serialize_i32(*v),
            Value::Long(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f32(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::ByteArray(v) => v.serialize(serializer),
            Value::String(v) => serializer.serialize_str(v),
            Value::List(v) => v.serialize(serializer),
            Value::Compound(v) => v.serialize(serializer),
            Value::IntArray(v) => v.serialize(serializer),
            Value::Custom(v) => Err(S::Error::custom(format_args!(
                "custom tag kind {} ({:#04x}) cannot be serialized",
                v.strategy().name(),
                v.id()
            ))),
        }
    }
}

impl Serialize for Compound {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for List {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl Serialize for NamedTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tag = serializer.serialize_struct("NamedTag", 2)?;
        tag.serialize_field("name", self.name())?;
        tag.serialize_field("value", self.value())?;
        tag.end()
    }
}
