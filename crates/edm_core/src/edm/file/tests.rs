use edm_testkit::{ByteBuilder, render_node, root_node, sample_file};

use crate::edm::decode::{DecodeOptions, DecodeWarning};
use crate::edm::file::{EdmFile, ObjectList};
use crate::edm::node::Node;
use crate::edm::{EdmError, IndexBuffer};

/// Header, empty indexes, root node, sentinel and reserved block.
fn prelude(b: &mut ByteBuilder) {
	b.bytes(b"EDM").u16(8).u32(0).u32(0);
	root_node(b);
	b.i32(-1).zeros(1648);
}

#[test]
fn sample_file_decodes_every_section() {
	let decoded = EdmFile::from_bytes(&sample_file()).expect("sample decodes");
	assert!(decoded.warnings.is_empty(), "unexpected warnings: {:?}", decoded.warnings);
	let file = decoded.file;

	assert_eq!(file.version, 8);
	assert_eq!(file.index_a.get("model::RootNode"), Some(&1));
	assert_eq!(file.index_a.get_index(1).map(|(name, _)| name.as_str()), Some("model::RenderNode"));
	assert_eq!(file.index_b.get("__gv_bytes_fvec4"), Some(&108));

	assert_eq!(file.root.name, "sample_model");
	assert_eq!(file.root.properties.len(), 2);
	assert_eq!(file.root.reserved_a.as_bytes()[0], 0x11);
	assert_eq!(file.root.materials.len(), 1);
	assert_eq!(file.root.nodes.len(), 7);
	assert_eq!(file.reserved.as_bytes()[1647], 0x77);

	assert_eq!(file.connectors.len(), 1);
	assert_eq!(file.connectors[0].name, "pnt_wing");
	assert_eq!(file.connectors[0].data.as_bytes(), &[0x88; 16]);

	let [render] = file.render_nodes.as_slice() else {
		panic!("expected one render node");
	};
	assert_eq!(render.name, "hull_mesh");
	assert_eq!(render.indices, IndexBuffer::U16(vec![0, 1, 2]));
	assert_eq!(file.list_order, [ObjectList::Connectors, ObjectList::RenderNodes]);
}

#[test]
fn sample_file_re_encodes_exactly() {
	let bytes = sample_file();
	let file = EdmFile::from_bytes(&bytes).expect("sample decodes").file;
	let (encoded, log) = file.encode_with_log().expect("sample encodes");
	assert_eq!(encoded, bytes);
	assert_eq!(log.get("model::RootNode"), Some(&1));
	assert_eq!(log.get("model::RenderNode"), Some(&1));
	assert_eq!(log.get("model::Connector"), Some(&1));
	assert_eq!(log.get("model::Property<float>"), Some(&2));
	assert_eq!(log.get("model::ArgScaleNode"), Some(&1));
}

#[test]
fn trailing_bytes_are_a_warning() {
	let mut bytes = sample_file();
	let end = bytes.len();
	bytes.extend_from_slice(&[1, 2, 3]);
	let decoded = EdmFile::from_bytes(&bytes).expect("decodes despite trailing data");
	assert_eq!(decoded.warnings, vec![DecodeWarning::TrailingData { at: end, remaining: 3 }]);
}

#[test]
fn only_version_eight_is_accepted() {
	for version in [7_u16, 9] {
		let mut bytes = sample_file();
		bytes[3..5].copy_from_slice(&version.to_le_bytes());
		let err = EdmFile::from_bytes(&bytes).expect_err("wrong version");
		assert!(matches!(err, EdmError::VersionMismatch { expected: 8, found } if found == version));
	}
}

#[test]
fn bad_magic_is_rejected() {
	let mut bytes = sample_file();
	bytes[0] = b'X';
	assert!(matches!(EdmFile::from_bytes(&bytes), Err(EdmError::ConstantMismatch { at: 0, .. })));
}

#[test]
fn root_sentinel_is_checked() {
	let mut b = ByteBuilder::new();
	b.bytes(b"EDM").u16(8).u32(0).u32(0);
	root_node(&mut b);
	let sentinel_at = b.len();
	b.i32(0).zeros(1648).u32(0);
	let err = EdmFile::from_bytes(&b.build()).expect_err("sentinel is 0");
	assert!(matches!(err, EdmError::ConstantMismatch { at, .. } if at == sentinel_at));
}

#[test]
fn root_must_be_a_root_node() {
	let mut b = ByteBuilder::new();
	b.bytes(b"EDM").u16(8).u32(0).u32(0);
	b.string(b"model::Node").zeros(12);
	let err = EdmFile::from_bytes(&b.build()).expect_err("plain node at the top");
	assert!(matches!(
		err,
		EdmError::UnexpectedRecord {
			at: 13,
			expected: "model::RootNode",
			found: "model::Node"
		}
	));
}

#[test]
fn a_missing_object_list_is_rejected() {
	let mut b = ByteBuilder::new();
	prelude(&mut b);
	b.u32(1).string(b"CONNECTORS").u32(0);
	let err = EdmFile::from_bytes(&b.build()).expect_err("one list");
	assert!(matches!(err, EdmError::ObjectListMismatch { .. }));
}

#[test]
fn a_repeated_or_unknown_object_list_is_rejected() {
	let mut b = ByteBuilder::new();
	prelude(&mut b);
	b.u32(2).string(b"CONNECTORS").u32(0).string(b"CONNECTORS").u32(0);
	match EdmFile::from_bytes(&b.build()) {
		Err(EdmError::ObjectListMismatch { found, .. }) => assert_eq!(found, vec!["CONNECTORS", "CONNECTORS"]),
		other => panic!("expected object list mismatch, got {other:?}"),
	}

	let mut b = ByteBuilder::new();
	prelude(&mut b);
	b.u32(2).string(b"CONNECTORS").u32(0).string(b"LIGHTS").u32(0);
	assert!(matches!(EdmFile::from_bytes(&b.build()), Err(EdmError::ObjectListMismatch { .. })));
}

#[test]
fn object_list_order_is_preserved() {
	let mut b = ByteBuilder::new();
	prelude(&mut b);
	b.u32(2).string(b"RENDER_NODES").u32(1);
	render_node(&mut b, "a", 0);
	b.string(b"CONNECTORS").u32(0);
	let bytes = b.build();

	let file = EdmFile::from_bytes(&bytes).expect("reversed lists decode").file;
	assert_eq!(file.list_order, [ObjectList::RenderNodes, ObjectList::Connectors]);
	assert!(file.connectors.is_empty());
	assert_eq!(file.encode().expect("encodes"), bytes);
}

#[test]
fn connector_list_rejects_other_records() {
	let mut b = ByteBuilder::new();
	prelude(&mut b);
	b.u32(2).string(b"CONNECTORS").u32(1);
	render_node(&mut b, "stray", 0);
	b.string(b"RENDER_NODES").u32(0);
	assert!(matches!(
		EdmFile::from_bytes(&b.build()),
		Err(EdmError::UnexpectedRecord {
			expected: "model::Connector",
			..
		})
	));
}

#[test]
fn material_of_resolves_the_render_node_material() {
	let mut file = EdmFile::from_bytes(&sample_file()).expect("sample decodes").file;
	let material = file.material_of(&file.render_nodes[0]).expect("material 0 exists");
	assert_eq!(material.name(), Some("hull"));

	file.render_nodes[0].material = 3;
	assert!(file.material_of(&file.render_nodes[0]).is_none());
}

#[test]
fn nodes_walks_depth_first() {
	let mut file = EdmFile::from_bytes(&sample_file()).expect("sample decodes").file;
	let names: Vec<Option<&str>> = file.nodes().map(Node::name).collect();
	assert_eq!(names, vec![None, None, Some("rudder"), Some("gear"), Some("scale"), Some("flap"), Some("lights")]);

	let nested = Node::Root(file.root.clone());
	file.root.nodes.insert(1, nested);
	let names: Vec<Option<&str>> = file.nodes().map(Node::name).collect();
	assert_eq!(names.len(), 15);
	assert_eq!(names[1], Some("sample_model"));
	assert_eq!(names[4], Some("rudder"));
	assert_eq!(names[14], Some("lights"));
}

#[test]
fn lenient_options_are_threaded_through() {
	let bytes = sample_file();
	let decoded = EdmFile::decode(&bytes, DecodeOptions::lenient()).expect("lenient decode");
	assert!(decoded.warnings.is_empty());
	assert_eq!(decoded.file.encode().expect("encodes"), bytes);
}

#[test]
fn encoding_refuses_other_versions() {
	let mut file = EdmFile::from_bytes(&sample_file()).expect("sample decodes").file;
	file.version = 7;
	let err = file.encode().expect_err("version 7 is not writable");
	assert!(matches!(err, EdmError::VersionMismatch { expected: 8, found: 7 }));
}
