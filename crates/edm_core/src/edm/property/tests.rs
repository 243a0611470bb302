use edm_testkit::{ByteBuilder, float_property, uint_property};

use crate::edm::decode::{DecodeOptions, DecodeWarning, Decoder};
use crate::edm::property::{PropertyValue, Value, ValueKind, read_property_list, read_string_uint_dict, write_property_list, write_string_uint_dict};
use crate::edm::writer::Writer;
use crate::edm::{EdmError, Key};

#[test]
fn index_table_preserves_insertion_order() {
	let bytes = ByteBuilder::new().u32(3).string(b"zeta").u32(1).string(b"alpha").u32(2).string(b"mid").u32(3).build();
	let mut dec = Decoder::new(&bytes, DecodeOptions::default());
	let table = read_string_uint_dict(&mut dec, "index_a").expect("table decodes");
	assert_eq!(table.keys().map(String::as_str).collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
	assert!(dec.into_warnings().is_empty());
}

#[test]
fn index_table_duplicate_keeps_position_and_last_value() {
	let bytes = ByteBuilder::new().u32(3).string(b"a").u32(1).string(b"b").u32(2).string(b"a").u32(9).build();
	let mut dec = Decoder::new(&bytes, DecodeOptions::default());
	let table = read_string_uint_dict(&mut dec, "index_a").expect("table decodes");
	assert_eq!(table.iter().map(|(k, v)| (k.as_str(), *v)).collect::<Vec<_>>(), vec![("a", 9), ("b", 2)]);

	let warnings = dec.into_warnings();
	assert_eq!(
		warnings,
		vec![DecodeWarning::DuplicateKey {
			at: 22,
			table: "index_a",
			key: "a".to_owned(),
		}]
	);
}

#[test]
fn duplicate_warning_can_be_disabled() {
	let bytes = ByteBuilder::new().u32(2).string(b"a").u32(1).string(b"a").u32(2).build();
	let options = DecodeOptions {
		warn_on_duplicate_keys: false,
		..DecodeOptions::default()
	};
	let mut dec = Decoder::new(&bytes, options);
	let table = read_string_uint_dict(&mut dec, "index_b").expect("table decodes");
	assert_eq!(table.get("a"), Some(&2));
	assert!(dec.into_warnings().is_empty());
}

#[test]
fn index_table_round_trips() {
	let bytes = ByteBuilder::new().u32(2).string(b"one").u32(1).string(b"two").u32(2).build();
	let mut dec = Decoder::new(&bytes, DecodeOptions::default());
	let table = read_string_uint_dict(&mut dec, "index_a").expect("table decodes");
	let mut w = Writer::new();
	write_string_uint_dict(&mut w, &table).expect("table encodes");
	assert_eq!(w.finish().0, bytes);
}

#[test]
fn property_list_decodes_typed_records() {
	let mut b = ByteBuilder::new();
	b.u32(3);
	float_property(&mut b, "opacity", 0.5);
	uint_property(&mut b, "lod", 4);
	b.string(b"model::AnimatedProperty<osg::Vec2f>").string(b"uvShift").u32(11).u32(1);
	b.f64(0.25).f32(1.0).f32(2.0);
	let bytes = b.build();

	let mut dec = Decoder::new(&bytes, DecodeOptions::default());
	let list = read_property_list(&mut dec).expect("list decodes");
	assert_eq!(list.get("opacity"), Some(&PropertyValue::Constant(Value::Float(0.5))));
	assert_eq!(list.get("lod"), Some(&PropertyValue::Constant(Value::UInt(4))));
	assert_eq!(
		list.get("uvShift"),
		Some(&PropertyValue::Animated {
			kind: ValueKind::Vec2f,
			argument: 11,
			keys: vec![Key {
				frame: 0.25,
				value: Value::Vec2f([1.0, 2.0]),
			}],
		})
	);

	let mut w = Writer::new();
	write_property_list(&mut w, &list).expect("list encodes");
	let (encoded, log) = w.finish();
	assert_eq!(encoded, bytes);
	assert_eq!(log.get("model::Property<float>"), Some(&1));
}

#[test]
fn property_list_duplicate_is_last_write_wins() {
	let mut b = ByteBuilder::new();
	b.u32(3);
	float_property(&mut b, "x", 1.0);
	float_property(&mut b, "y", 2.0);
	float_property(&mut b, "x", 3.0);
	let bytes = b.build();

	let mut dec = Decoder::new(&bytes, DecodeOptions::default());
	let list = read_property_list(&mut dec).expect("list decodes");
	assert_eq!(list.keys().map(String::as_str).collect::<Vec<_>>(), vec!["x", "y"]);
	assert_eq!(list.get("x"), Some(&PropertyValue::Constant(Value::Float(3.0))));
	assert!(matches!(dec.into_warnings().as_slice(), [DecodeWarning::DuplicateKey { table: "properties", .. }]));
}

#[test]
fn property_list_rejects_non_property_records() {
	let bytes = ByteBuilder::new().u32(1).string(b"model::Node").u32(0).u32(0).u32(0).build();
	let mut dec = Decoder::new(&bytes, DecodeOptions::default());
	let err = read_property_list(&mut dec).expect_err("nodes are not properties");
	assert!(matches!(
		err,
		EdmError::UnexpectedRecord {
			at: 4,
			expected: "property",
			found: "model::Node"
		}
	));
}

#[test]
fn animated_key_kind_mismatch_fails_to_encode() {
	let mut list = crate::edm::PropertyList::new();
	list.insert(
		"bad".to_owned(),
		PropertyValue::Animated {
			kind: ValueKind::Float,
			argument: 1,
			keys: vec![Key {
				frame: 0.0,
				value: Value::UInt(3),
			}],
		},
	);
	let err = write_property_list(&mut Writer::new(), &list).expect_err("key kind differs");
	assert!(matches!(err, EdmError::PropertyKindMismatch { expected: "float", found: "unsigned int", .. }));
}
