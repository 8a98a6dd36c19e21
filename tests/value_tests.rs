//! Tests for Value, Compound and NamedTag

use nbt_select::{Compound, Kind, List, NamedTag, Value, tag};

fn sample() -> Compound {
    let mut pos = List::new(Kind::Double);
    pos.push(1.5f64).unwrap();
    pos.push(-64.0f64).unwrap();

    let mut player = Compound::new();
    player.insert("Health", 20.0f32);
    player.insert("Pos", pos);

    let mut root = Compound::new();
    root.insert("LevelName", "world");
    root.insert("Seed", 1234567890123i64);
    root.insert("Player", player);
    root.insert("Heights", vec![1i32, 2, 3]);
    root
}

#[test]
fn test_default_for_builtin_kinds() {
    assert_eq!(Value::default_for(Kind::Int), Some(Value::Int(0)));
    assert_eq!(
        Value::default_for(Kind::String),
        Some(Value::String(String::new()))
    );
    assert_eq!(
        Value::default_for(Kind::Compound),
        Some(Value::Compound(Compound::new()))
    );
    let list = Value::default_for(Kind::List).unwrap();
    assert_eq!(list.as_list().map(List::element_kind), Some(Kind::End));
    assert_eq!(Value::default_for(Kind::Custom(100)), None);
    assert_eq!(Value::default(), Value::End);
}

#[test]
fn test_value_kind() {
    assert_eq!(Value::from(1i8).kind(), Kind::Byte);
    assert_eq!(Value::from(true), Value::Byte(1));
    assert_eq!(Value::from(1i16).kind(), Kind::Short);
    assert_eq!(Value::from(1i32).kind(), Kind::Int);
    assert_eq!(Value::from(1i64).kind(), Kind::Long);
    assert_eq!(Value::from(1.0f32).kind(), Kind::Float);
    assert_eq!(Value::from(1.0f64).kind(), Kind::Double);
    assert_eq!(Value::from(vec![1i8]).kind(), Kind::ByteArray);
    assert_eq!(Value::from("x").kind(), Kind::String);
    assert_eq!(Value::from(List::default()).kind(), Kind::List);
    assert_eq!(Value::from(Compound::new()).kind(), Kind::Compound);
    assert_eq!(Value::from(vec![1i32]).kind(), Kind::IntArray);
}

#[test]
fn test_typed_access() {
    let mut value = Value::Int(42);
    assert_eq!(value.as_::<tag::Int>(), Some(&42));
    assert_eq!(value.as_::<tag::Long>(), None);

    *value.as_mut_::<tag::Int>().unwrap() += 1;
    assert_eq!(value.clone().into_::<tag::Int>(), Some(43));
    assert_eq!(value.into_::<tag::String>(), None);
}

#[test]
fn test_index_by_name_and_position() {
    let root = Value::Compound(sample());

    assert_eq!(root.get("LevelName").and_then(Value::as_str), Some("world"));
    assert_eq!(
        root.get("Player")
            .and_then(|p| p.get("Pos"))
            .and_then(|pos| pos.get(1usize)),
        Some(&Value::Double(-64.0))
    );
    let key = String::from("Seed");
    assert_eq!(root.get(&key), Some(&Value::Long(1234567890123)));
    assert_eq!(root.get("missing"), None);
    assert_eq!(root.get(0usize), None);
}

#[test]
fn test_get_mut_by_name() {
    let mut root = Value::Compound(sample());
    *root.get_mut("Seed").unwrap() = Value::Long(7);
    assert_eq!(root.get("Seed"), Some(&Value::Long(7)));

    let mut list = Value::List(List::of::<tag::Int>([1, 2]));
    assert!(list.get_mut(0usize).is_none());
}

#[test]
fn test_compound_insert_replaces() {
    let mut compound = Compound::new();
    assert_eq!(compound.insert("a", 1i32), None);
    assert_eq!(compound.insert("a", "two"), Some(Value::Int(1)));
    assert_eq!(compound.len(), 1);
    assert_eq!(compound.get("a").and_then(Value::as_str), Some("two"));
}

#[test]
fn test_compound_typed_lookup_mismatch_is_absent() {
    let mut compound = sample();
    assert_eq!(compound.get_::<tag::String>("LevelName").map(String::as_str), Some("world"));
    assert_eq!(compound.get_::<tag::Int>("LevelName"), None);
    assert_eq!(compound.get_::<tag::Int>("nope"), None);

    *compound.get_mut_::<tag::Long>("Seed").unwrap() = 5;
    assert_eq!(compound.get("Seed"), Some(&Value::Long(5)));

    assert_eq!(compound.remove_::<tag::Int>("Seed"), None);
    assert!(compound.contains_key("Seed"));
    assert_eq!(compound.remove_::<tag::Long>("Seed"), Some(5));
    assert!(!compound.contains_key("Seed"));
}

#[test]
fn test_compound_preserves_insertion_order() {
    let mut compound = Compound::new();
    compound.insert("z", 1i32);
    compound.insert("a", 2i32);
    compound.insert("m", 3i32);
    assert_eq!(compound.keys().map(String::as_str).collect::<Vec<_>>(), ["z", "a", "m"]);

    compound.remove("a");
    assert_eq!(compound.keys().map(String::as_str).collect::<Vec<_>>(), ["z", "m"]);
}

#[test]
fn test_compound_equality_ignores_order() {
    let a: Compound = [("x", 1i32), ("y", 2i32)].into_iter().collect();
    let b: Compound = [("y", 2i32), ("x", 1i32)].into_iter().collect();
    assert_eq!(a, b);
}

#[test]
fn test_compound_rename() {
    let mut compound: Compound = [("a", 1i32), ("b", 2i32), ("c", 3i32)].into_iter().collect();

    assert!(compound.rename("b", "beta"));
    assert_eq!(
        compound.keys().map(String::as_str).collect::<Vec<_>>(),
        ["a", "beta", "c"]
    );
    assert!(!compound.rename("a", "c"));
    assert!(!compound.rename("missing", "d"));
    assert!(compound.rename("a", "a"));
    assert_eq!(compound.get("beta"), Some(&Value::Int(2)));
}

#[test]
fn test_compound_extend_and_iter() {
    let mut compound = Compound::new();
    compound.extend([("a", 1i8), ("b", 2i8)]);
    let sum: i32 = compound
        .values()
        .filter_map(|v| v.as_::<tag::Byte>())
        .map(|b| *b as i32)
        .sum();
    assert_eq!(sum, 3);

    for (_, value) in compound.iter_mut() {
        *value = Value::Byte(0);
    }
    assert!(compound.values().all(|v| *v == Value::Byte(0)));

    let names: Vec<String> = compound.into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn test_float_equality_uses_bits() {
    let nan = f32::from_bits(0x7fc0_0001);
    assert_eq!(Value::Float(nan), Value::Float(nan));
    assert_ne!(Value::Float(nan), Value::Float(f32::from_bits(0x7fc0_0002)));
    assert_ne!(Value::Double(0.0), Value::Double(-0.0));
    assert_eq!(Value::Double(f64::INFINITY), Value::Double(f64::INFINITY));
}

#[test]
fn test_clone_is_deep() {
    let original = sample();
    let mut copy = original.clone();
    copy.get_mut_::<tag::Compound>("Player")
        .unwrap()
        .insert("Health", 1.0f32);

    assert_eq!(
        original
            .get_::<tag::Compound>("Player")
            .and_then(|p| p.get_::<tag::Float>("Health")),
        Some(&20.0)
    );
    assert_ne!(original, copy);
}

#[test]
fn test_equality_is_structural() {
    assert_eq!(sample(), sample());
    assert_ne!(Value::Int(1), Value::Long(1));
    assert_ne!(
        Value::List(List::of::<tag::Int>([1, 2])),
        Value::List(List::of::<tag::Int>([2, 1]))
    );
}

#[test]
fn test_named_tag() {
    let mut tag = NamedTag::compound("root");
    assert_eq!(tag.name(), "root");
    assert_eq!(tag.kind(), Kind::Compound);

    tag.as_compound_mut().unwrap().insert("a", 5i32);
    tag.set_name("renamed");
    assert_eq!(tag.name(), "renamed");
    assert_eq!(tag.as_compound().map(Compound::len), Some(1));

    let old = tag.set_value(3i16);
    assert_eq!(old.as_compound().map(Compound::len), Some(1));
    assert_eq!(tag.value(), &Value::Short(3));
    assert!(tag.as_compound().is_none());

    *tag.value_mut() = Value::Byte(1);
    let (name, value) = tag.into_parts();
    assert_eq!(name, "renamed");
    assert_eq!(value, Value::Byte(1));
}

#[test]
fn test_named_tag_equality_includes_name() {
    assert_ne!(NamedTag::compound("a"), NamedTag::compound("b"));
    assert_eq!(NamedTag::new("a", 1i32), NamedTag::new("a", 1i32));
}
