#![allow(missing_docs)]

use edm_testkit::sample_file;
use edmio::edm::{
	ArgStream, Connector, EdmFile, Key, MaterialValue, Node, Opaque, PositionKey, Property, PropertyValue, RotationKey, Value, ValueKind,
	write_named_type, Record, Writer,
};

#[test]
fn edited_file_survives_a_round_trip() {
	let mut file = EdmFile::from_bytes(&sample_file()).expect("sample decodes").file;

	file.root.materials[0].set(MaterialValue::Name("кабина".to_owned()));
	file.connectors.push(Connector {
		name: "pnt_tail".to_owned(),
		data: Opaque([0x10; 16]),
	});
	file.root.properties.insert(
		"glow".to_owned(),
		PropertyValue::Animated {
			kind: ValueKind::Vec4f,
			argument: 3,
			keys: vec![Key {
				frame: 0.25,
				value: Value::Vec4f([1.0, 1.0, 0.0, 1.0]),
			}],
		},
	);
	let Some(Node::ArgPosition(gear)) = file.root.nodes.get_mut(3) else {
		panic!("fourth node is the gear position node");
	};
	let keys = [
		PositionKey {
			frame: 0.0,
			value: [0.0, 0.0, 0.0],
		},
		PositionKey {
			frame: 1.0,
			value: [0.0, -1.5, 0.0],
		},
	];
	gear.position = vec![ArgStream::from_samples(13, &keys).expect("samples pack")];

	let bytes = file.encode().expect("edited file encodes");
	let decoded = EdmFile::from_bytes(&bytes).expect("edited file decodes");
	assert!(decoded.warnings.is_empty());
	assert_eq!(decoded.file, file);

	let reread = decoded.file;
	assert_eq!(reread.root.materials[0].name(), Some("кабина"));
	assert_eq!(reread.connectors[1].name, "pnt_tail");
	let Node::ArgPosition(gear) = &reread.root.nodes[3] else {
		panic!("gear position node");
	};
	assert_eq!(gear.position[0].samples::<PositionKey>().expect("typed keys"), keys.to_vec());
}

#[test]
fn rotation_samples_are_readable_as_quaternions() {
	let file = EdmFile::from_bytes(&sample_file()).expect("sample decodes").file;
	let Node::ArgRotation(rudder) = &file.root.nodes[2] else {
		panic!("third node is the rudder");
	};
	let keys = rudder.rotation[0].samples::<RotationKey>().expect("typed keys");
	assert_eq!(keys.len(), 2);
	assert!(keys.iter().all(|key| key.frame == 0.0 && key.value == [0.0; 4]));
}

#[test]
fn type_log_counts_every_named_record() {
	let file = EdmFile::from_bytes(&sample_file()).expect("sample decodes").file;
	let (_, log) = file.encode_with_log().expect("encodes");
	let total: usize = log.values().sum();
	// Root, seven children, five properties across root and material, one connector, one render node.
	assert_eq!(total, 1 + 7 + 5 + 1 + 1);
	assert_eq!(log.get_index(0).map(|(name, count)| (*name, *count)), Some(("model::RootNode", 1)));
}

#[test]
fn standalone_records_encode_with_their_type_name() {
	let record = Record::Property(Property {
		name: "lod".to_owned(),
		value: PropertyValue::Constant(Value::UInt(2)),
	});
	let mut w = Writer::new();
	write_named_type(&mut w, &record).expect("encodes");
	let (bytes, log) = w.finish();

	let name = b"model::Property<unsigned int>";
	assert_eq!(&bytes[..4], &(name.len() as u32).to_le_bytes());
	assert_eq!(&bytes[4..4 + name.len()], name);
	assert_eq!(log.get("model::Property<unsigned int>"), Some(&1));
}
