//! Tests for reading and writing NBT data

use nbt_select::{
    BigEndian, CodecOptions, Compound, Error, ErrorKind, Kind, KindRegistry, LittleEndian, List,
    NamedTag, Value, from_reader_be, from_slice_be, from_slice_le, from_slice_with, read,
    read_with, tag, to_vec_be, to_vec_le, to_writer_be, write, write_with,
};

/// Helper to wrap a single entry in an unnamed root compound
fn root_with(name: &str, value: impl Into<Value>) -> NamedTag {
    let mut root = NamedTag::compound("");
    root.as_compound_mut().unwrap().insert(name, value);
    root
}

fn round_trip(tag: &NamedTag) {
    let be = to_vec_be(tag).unwrap();
    assert_eq!(&from_slice_be(&be).unwrap(), tag);
    let le = to_vec_le(tag).unwrap();
    assert_eq!(&from_slice_le(&le).unwrap(), tag);
}

fn scenario() -> NamedTag {
    let mut b = Compound::new();
    b.insert("c", "hi");
    let mut root = NamedTag::compound("root");
    let compound = root.as_compound_mut().unwrap();
    compound.insert("a", 5i32);
    compound.insert("b", b);
    root
}

#[test]
fn test_scenario_bytes_big_endian() {
    let bytes = to_vec_be(&scenario()).unwrap();
    #[rustfmt::skip]
    let expected = vec![
        0x0a, 0x00, 0x04, b'r', b'o', b'o', b't',
        0x03, 0x00, 0x01, b'a', 0x00, 0x00, 0x00, 0x05,
        0x0a, 0x00, 0x01, b'b',
        0x08, 0x00, 0x01, b'c', 0x00, 0x02, b'h', b'i',
        0x00,
        0x00,
    ];
    assert_eq!(bytes, expected);
    assert_eq!(from_slice_be(&bytes).unwrap(), scenario());
}

#[test]
fn test_scenario_bytes_little_endian() {
    let bytes = to_vec_le(&scenario()).unwrap();
    #[rustfmt::skip]
    let expected = vec![
        0x0a, 0x04, 0x00, b'r', b'o', b'o', b't',
        0x03, 0x01, 0x00, b'a', 0x05, 0x00, 0x00, 0x00,
        0x0a, 0x01, 0x00, b'b',
        0x08, 0x01, 0x00, b'c', 0x02, 0x00, b'h', b'i',
        0x00,
        0x00,
    ];
    assert_eq!(bytes, expected);
    assert_eq!(from_slice_le(&bytes).unwrap(), scenario());
}

#[test]
fn test_read_simple_int_big_endian() {
    let data = [10, 0, 0, 3, 0, 3, b'i', b'n', b't', 0x12, 0x34, 0x56, 0x78, 0];
    let root = from_slice_be(&data).unwrap();
    assert_eq!(root.value().get("int"), Some(&Value::Int(0x12345678)));
}

#[test]
fn test_read_simple_int_little_endian() {
    let data = [10, 0, 0, 3, 3, 0, b'i', b'n', b't', 0x78, 0x56, 0x34, 0x12, 0];
    let root = from_slice_le(&data).unwrap();
    assert_eq!(root.value().get("int"), Some(&Value::Int(0x12345678)));
}

#[test]
fn test_integer_boundaries_round_trip() {
    for value in [i8::MIN, -1, 0, 1, i8::MAX] {
        round_trip(&root_with("v", value));
    }
    for value in [i16::MIN, -1, 0, i16::MAX] {
        round_trip(&root_with("v", value));
    }
    for value in [i32::MIN, -1, 0, i32::MAX] {
        round_trip(&root_with("v", value));
    }
    for value in [i64::MIN, -1, 0, i64::MAX] {
        round_trip(&root_with("v", value));
    }
}

#[test]
fn test_float_boundaries_round_trip() {
    for value in [
        0.0f32,
        -0.0,
        f32::MIN,
        f32::MAX,
        f32::MIN_POSITIVE,
        f32::INFINITY,
        f32::NEG_INFINITY,
        f32::NAN,
        f32::from_bits(0x7f80_0001),
        f32::from_bits(0xffc0_dead),
    ] {
        let named = root_with("f", value);
        let decoded = from_slice_be(&to_vec_be(&named).unwrap()).unwrap();
        let bits = decoded
            .value()
            .get("f")
            .and_then(|v| v.as_::<tag::Float>())
            .map(|f| f.to_bits());
        assert_eq!(bits, Some(value.to_bits()));
        round_trip(&named);
    }
    for value in [
        0.0f64,
        -0.0,
        f64::MIN,
        f64::MAX,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NAN,
        f64::from_bits(0x7ff0_0000_0000_0001),
    ] {
        round_trip(&root_with("d", value));
    }
}

#[test]
fn test_arrays_and_strings_round_trip() {
    round_trip(&root_with("empty_bytes", Vec::<i8>::new()));
    round_trip(&root_with("bytes", vec![i8::MIN, -1, 0, 1, i8::MAX]));
    round_trip(&root_with("empty_ints", Vec::<i32>::new()));
    round_trip(&root_with("ints", vec![i32::MIN, 0, i32::MAX]));
    round_trip(&root_with("empty_string", ""));
    round_trip(&root_with("string", "Hello, 世界! 🦀"));
    round_trip(&root_with("", "unnamed entry"));
}

#[test]
fn test_containers_round_trip() {
    let mut nested = List::new(Kind::List);
    nested.push(List::of::<tag::Int>([1, 2])).unwrap();
    nested.push(List::of::<tag::Int>([])).unwrap();
    nested.push(List::of::<tag::String>(["x".to_string()])).unwrap();

    let mut compounds = List::new(Kind::Compound);
    for i in 0..3i32 {
        let mut entry = Compound::new();
        entry.insert("i", i);
        compounds.push(entry).unwrap();
    }

    let mut root = NamedTag::compound("level");
    let compound = root.as_compound_mut().unwrap();
    compound.insert("empty_compound", Compound::new());
    compound.insert("empty_list", List::default());
    compound.insert("typed_empty_list", List::new(Kind::Short));
    compound.insert("nested", nested);
    compound.insert("compounds", compounds);
    compound.insert("doubles", List::of::<tag::Double>([f64::NAN, -0.0]));
    round_trip(&root);
}

#[test]
fn test_non_compound_roots_round_trip() {
    round_trip(&NamedTag::new("answer", 42i32));
    round_trip(&NamedTag::new("list", List::of::<tag::Byte>([1, 2, 3])));
    round_trip(&NamedTag::new("s", "text"));
}

#[test]
fn test_empty_list_encoding() {
    let bytes = to_vec_be(&root_with("l", List::default())).unwrap();
    assert_eq!(bytes, [10, 0, 0, 9, 0, 1, b'l', 0, 0, 0, 0, 0, 0]);

    let bytes = to_vec_be(&root_with("l", List::new(Kind::Int))).unwrap();
    assert_eq!(bytes, [10, 0, 0, 9, 0, 1, b'l', 3, 0, 0, 0, 0, 0]);
}

#[test]
fn test_compound_order_is_preserved() {
    let mut root = NamedTag::compound("");
    let compound = root.as_compound_mut().unwrap();
    for name in ["zeta", "alpha", "mid"] {
        compound.insert(name, 0i8);
    }
    let decoded = from_slice_be(&to_vec_be(&root).unwrap()).unwrap();
    let names: Vec<&str> = decoded
        .as_compound()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(names, ["zeta", "alpha", "mid"]);
}

#[test]
fn test_negative_length() {
    let data = [10, 0, 0, 7, 0, 1, b'a', 0xff, 0xff, 0xff, 0xff, 0];
    let err = from_slice_be(&data).unwrap_err();
    assert!(matches!(
        err,
        Error::NegativeLength {
            length: -1,
            offset: 7
        }
    ));
    assert_eq!(err.kind(), ErrorKind::MalformedStream);
    assert_eq!(err.offset(), Some(7));
}

#[test]
fn test_negative_list_count() {
    let data = [10, 0, 0, 9, 0, 1, b'l', 3, 0x80, 0, 0, 0, 0];
    let err = from_slice_be(&data).unwrap_err();
    assert!(matches!(err, Error::NegativeLength { offset: 8, .. }));
}

#[test]
fn test_truncated_input() {
    let bytes = to_vec_be(&scenario()).unwrap();
    for cut in 0..bytes.len() {
        let err = from_slice_be(&bytes[..cut]).unwrap_err();
        assert!(matches!(err, Error::EndOfFile(_)), "cut at {cut}: {err}");
        assert!(err.is_fatal());
    }
}

#[test]
fn test_truncated_array_does_not_overallocate() {
    // Claims i32::MAX bytes, provides four.
    let data = [7, 0, 0, 0x7f, 0xff, 0xff, 0xff, 1, 2, 3, 4];
    assert!(matches!(from_slice_be(&data), Err(Error::EndOfFile(11))));
}

#[test]
fn test_end_root_is_rejected() {
    assert!(matches!(from_slice_be(&[0]), Err(Error::UnexpectedEnd(0))));
}

#[test]
fn test_non_empty_end_list_is_rejected() {
    let data = [10, 0, 0, 9, 0, 1, b'l', 0, 0, 0, 0, 1, 0];
    assert!(matches!(from_slice_be(&data), Err(Error::UnexpectedEnd(7))));
}

#[test]
fn test_unknown_kind() {
    let data = [10, 0, 0, 0x64, 0, 1, b'u', 1, 2, 3, 0];
    let err = from_slice_be(&data).unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownKind {
            id: 0x64,
            offset: Some(7)
        }
    ));
    assert_eq!(err.kind(), ErrorKind::UnknownKind);
}

#[test]
fn test_invalid_utf8() {
    let data = [10, 0, 0, 8, 0, 1, b's', 0, 2, 0xff, 0xfe, 0];
    assert!(matches!(from_slice_be(&data), Err(Error::InvalidString(7))));

    let data = [10, 0, 0, 1, 0, 1, 0xc0, 5, 0];
    assert!(matches!(from_slice_be(&data), Err(Error::InvalidString(4))));
}

#[test]
fn test_trailing_data() {
    let mut bytes = to_vec_be(&scenario()).unwrap();
    bytes.extend_from_slice(&[1, 2, 3]);
    assert!(matches!(from_slice_be(&bytes), Err(Error::TrailingData(3))));

    // Stream readers stop after the root.
    let mut reader = bytes.as_slice();
    assert_eq!(from_reader_be(&mut reader).unwrap(), scenario());
    assert_eq!(reader, [1, 2, 3]);
}

#[test]
fn test_depth_limit() {
    fn nested(levels: usize) -> NamedTag {
        let mut value = Compound::new();
        value.insert("leaf", 1i8);
        for _ in 1..levels {
            let mut outer = Compound::new();
            outer.insert("c", value);
            value = outer;
        }
        NamedTag::new("", value)
    }

    let options = CodecOptions {
        max_depth: 4,
        ..CodecOptions::default()
    };
    let registry = KindRegistry::new();

    let ok = to_vec_be(&nested(4)).unwrap();
    assert_eq!(
        from_slice_with::<BigEndian>(&ok, &registry, &options).unwrap(),
        nested(4)
    );

    let deep = to_vec_be(&nested(5)).unwrap();
    let err = from_slice_with::<BigEndian>(&deep, &registry, &options).unwrap_err();
    assert!(matches!(err, Error::DepthLimitExceeded { limit: 4, .. }));
    assert_eq!(err.kind(), ErrorKind::MalformedStream);
}

#[test]
fn test_deeply_nested_lists_are_bounded_by_default() {
    let mut data = vec![9, 0, 0];
    for _ in 0..10_000 {
        data.extend_from_slice(&[9, 0, 0, 0, 1]);
    }
    let err = from_slice_be(&data).unwrap_err();
    assert!(matches!(
        err,
        Error::DepthLimitExceeded {
            limit: CodecOptions::DEFAULT_MAX_DEPTH,
            ..
        }
    ));
}

#[test]
fn test_encode_end_is_rejected() {
    let err = to_vec_be(&NamedTag::new("x", Value::End)).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEnd(0)));

    let err = to_vec_be(&root_with("x", Value::End)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedStream);
}

#[test]
fn test_encode_oversized_string() {
    let long = "a".repeat(u16::MAX as usize + 1);
    let err = to_vec_be(&root_with("s", long.as_str())).unwrap_err();
    assert!(matches!(err, Error::StringTooLong(65536)));
    assert_eq!(err.kind(), ErrorKind::Oversized);

    let err = to_vec_be(&NamedTag::new(long.as_str(), 1i8)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Oversized);

    let max = "b".repeat(u16::MAX as usize);
    round_trip(&root_with("s", max.as_str()));
}

#[test]
fn test_writer_entry_points_agree() {
    let tag = scenario();
    let expected = to_vec_be(&tag).unwrap();

    let mut buf = Vec::new();
    to_writer_be(&tag, &mut buf).unwrap();
    assert_eq!(buf, expected);

    let mut buf = Vec::new();
    write::<BigEndian>(&tag, &mut buf).unwrap();
    assert_eq!(buf, expected);

    let mut buf = Vec::new();
    write_with::<LittleEndian>(&tag, &mut buf, &CodecOptions::default()).unwrap();
    assert_eq!(buf, to_vec_le(&tag).unwrap());

    assert_eq!(read::<BigEndian>(expected.as_slice()).unwrap(), tag);
    assert_eq!(
        read_with::<BigEndian>(expected.as_slice(), &KindRegistry::new(), &CodecOptions::default())
            .unwrap(),
        tag
    );
}

#[test]
fn test_byte_orders_differ_only_in_primitives() {
    let tag = root_with("n", 0x0102i16);
    let be = to_vec_be(&tag).unwrap();
    let le = to_vec_le(&tag).unwrap();
    assert_eq!(be, [10, 0, 0, 2, 0, 1, b'n', 1, 2, 0]);
    assert_eq!(le, [10, 0, 0, 2, 1, 0, b'n', 2, 1, 0]);
}

#[cfg(feature = "mutf8")]
#[test]
fn test_modified_utf8() {
    use nbt_select::TextEncoding;

    let options = CodecOptions {
        text: TextEncoding::Mutf8,
        ..CodecOptions::default()
    };
    let tag = root_with("nul", "a\0b");

    let mut bytes = Vec::new();
    write_with::<BigEndian>(&tag, &mut bytes, &options).unwrap();
    assert_eq!(&bytes[9..16], [0, 4, b'a', 0xc0, 0x80, b'b', 0]);

    let decoded = from_slice_with::<BigEndian>(&bytes, &KindRegistry::new(), &options).unwrap();
    assert_eq!(decoded, tag);

    let crab = root_with("c", "🦀");
    let mut bytes = Vec::new();
    write_with::<BigEndian>(&crab, &mut bytes, &options).unwrap();
    // Supplementary characters are written as a surrogate pair, three bytes each.
    assert_eq!(bytes[7..9], [0, 6]);
    let decoded = from_slice_with::<BigEndian>(&bytes, &KindRegistry::new(), &options).unwrap();
    assert_eq!(decoded, crab);
}

#[cfg(feature = "mutf8")]
#[test]
fn test_modified_utf8_rejects_invalid_bytes() {
    use nbt_select::TextEncoding;

    let options = CodecOptions {
        text: TextEncoding::Mutf8,
        ..CodecOptions::default()
    };
    // Compound "" { String "s": [b'a', 0xff] }
    let bytes = [10, 0, 0, 8, 0, 1, b's', 0, 2, b'a', 0xff, 0];
    let err = from_slice_with::<BigEndian>(&bytes, &KindRegistry::new(), &options).unwrap_err();
    assert!(matches!(err, Error::InvalidString(7)));
    assert_eq!(err.kind(), ErrorKind::MalformedStream);

    // The same bytes in a name.
    let bytes = [10, 0, 0, 3, 0, 2, b'a', 0xff, 0, 0, 0, 1, 0];
    let err = from_slice_with::<BigEndian>(&bytes, &KindRegistry::new(), &options).unwrap_err();
    assert!(matches!(err, Error::InvalidString(4)));
}
