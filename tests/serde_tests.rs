//! Tests for the serde Serialize impls

#![cfg(feature = "serde")]

use std::sync::Arc;

use nbt_select::{
    Compound, CustomKind, CustomPayload, KindRegistry, List, NamedTag, PrimitiveRead,
    PrimitiveWrite, Result, Value, tag,
};
use serde_json::json;

#[test]
fn test_scalars() {
    assert_eq!(serde_json::to_value(Value::Byte(-1)).unwrap(), json!(-1));
    assert_eq!(serde_json::to_value(Value::Short(300)).unwrap(), json!(300));
    assert_eq!(serde_json::to_value(Value::Int(i32::MIN)).unwrap(), json!(i32::MIN));
    assert_eq!(serde_json::to_value(Value::Long(i64::MAX)).unwrap(), json!(i64::MAX));
    assert_eq!(serde_json::to_value(Value::Float(1.5)).unwrap(), json!(1.5));
    assert_eq!(serde_json::to_value(Value::Double(-0.25)).unwrap(), json!(-0.25));
    assert_eq!(serde_json::to_value(Value::from("hi")).unwrap(), json!("hi"));
    assert_eq!(serde_json::to_value(Value::End).unwrap(), json!(null));
}

#[test]
fn test_arrays_and_lists_are_sequences() {
    assert_eq!(
        serde_json::to_value(Value::ByteArray(vec![1, -2])).unwrap(),
        json!([1, -2])
    );
    assert_eq!(
        serde_json::to_value(Value::IntArray(vec![7, 8, 9])).unwrap(),
        json!([7, 8, 9])
    );
    assert_eq!(
        serde_json::to_value(List::of::<tag::String>(["a".into(), "b".into()])).unwrap(),
        json!(["a", "b"])
    );
    assert_eq!(serde_json::to_value(List::default()).unwrap(), json!([]));
}

#[test]
fn test_compound_keeps_entry_order() {
    let mut compound = Compound::new();
    compound.insert("z", 1i32);
    compound.insert("a", List::of::<tag::Int>([1, 2]));
    let mut inner = Compound::new();
    inner.insert("x", "y");
    compound.insert("m", inner);

    assert_eq!(
        serde_json::to_string(&compound).unwrap(),
        r#"{"z":1,"a":[1,2],"m":{"x":"y"}}"#
    );
}

#[test]
fn test_named_tag() {
    let mut root = NamedTag::compound("level");
    root.as_compound_mut().unwrap().insert("seed", 5i64);
    assert_eq!(
        serde_json::to_value(&root).unwrap(),
        json!({"name": "level", "value": {"seed": 5}})
    );
}

#[derive(Clone, PartialEq, Debug)]
struct Marker;

struct MarkerKind;

impl CustomKind for MarkerKind {
    fn name(&self) -> &str {
        "Marker"
    }

    fn empty(&self) -> Box<dyn CustomPayload> {
        Box::new(Marker)
    }

    fn decode(&self, _: &mut dyn PrimitiveRead) -> Result<Box<dyn CustomPayload>> {
        Ok(Box::new(Marker))
    }

    fn encode(&self, _: &dyn CustomPayload, _: &mut dyn PrimitiveWrite) -> Result<()> {
        Ok(())
    }
}

#[test]
fn test_custom_value_fails() {
    let registry = KindRegistry::new();
    registry.register(200, Arc::new(MarkerKind)).unwrap();
    let mut compound = Compound::new();
    compound.insert("m", registry.construct(200).unwrap());

    let err = serde_json::to_string(&compound).unwrap_err();
    assert!(err.to_string().contains("Marker"));
}
