use edm_testkit::{ByteBuilder, POSITION_WIDTH, ROTATION_WIDTH, arg_stream, render_node};

use crate::edm::decode::{DecodeOptions, DecodeWarning, Decoder};
use crate::edm::registry::read_named_node;
use crate::edm::writer::Writer;
use crate::edm::{EdmError, IndexBuffer, Node, PositionKey, RotationKey};

fn decode_node(bytes: &[u8], options: DecodeOptions) -> (crate::edm::Result<Node>, Vec<DecodeWarning>, usize) {
	let mut dec = Decoder::new(bytes, options);
	let node = read_named_node(&mut dec);
	let pos = dec.pos();
	(node, dec.into_warnings(), pos)
}

fn assert_round_trip(bytes: &[u8]) -> Node {
	let (node, warnings, pos) = decode_node(bytes, DecodeOptions::default());
	let node = node.expect("node decodes");
	assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
	assert_eq!(pos, bytes.len(), "node consumes exactly its bytes");

	let mut w = Writer::new();
	node.write_named(&mut w).expect("node encodes");
	assert_eq!(w.finish().0, bytes);
	node
}

#[test]
fn transform_node_reads_base_then_matrix() {
	let mut b = ByteBuilder::new();
	b.string(b"model::TransformNode").u32(1).u32(2).u32(3);
	for idx in 0..16 {
		b.f64(f64::from(idx));
	}
	let Node::Transform(node) = assert_round_trip(&b.build()) else {
		panic!("expected transform node");
	};
	assert_eq!(node.base.0, [1, 2, 3]);
	assert_eq!(node.matrix[0], [0.0, 1.0, 2.0, 3.0]);
	assert_eq!(node.matrix[3], [12.0, 13.0, 14.0, 15.0]);
}

#[test]
fn rotation_node_is_bracketed_by_zero_guards() {
	let mut b = ByteBuilder::new();
	b.string(b"model::ArgRotationNode").string(b"rudder").fill(0x5A, 248).u32(0).u32(1);
	arg_stream(&mut b, 2, 3, ROTATION_WIDTH, 0);
	b.u32(0);
	let Node::ArgRotation(node) = assert_round_trip(&b.build()) else {
		panic!("expected rotation node");
	};
	assert_eq!(node.name, "rudder");
	assert_eq!(node.base.as_bytes()[0], 0x5A);
	assert_eq!(node.rotation.len(), 1);
	assert_eq!(node.rotation[0].samples::<RotationKey>().expect("keys").len(), 3);
}

#[test]
fn rotation_node_leading_guard_must_be_zero() {
	let mut b = ByteBuilder::new();
	b.string(b"model::ArgRotationNode").string(b"r").zeros(248).u32(1);
	let (node, _, _) = decode_node(&b.build(), DecodeOptions::default());
	assert!(matches!(node, Err(EdmError::ConstantMismatch { .. })));
}

#[test]
fn position_node_keeps_its_trailer() {
	let mut b = ByteBuilder::new();
	b.string(b"model::ArgPositionNode").string(b"gear").zeros(248).u32(1);
	arg_stream(&mut b, 5, 2, POSITION_WIDTH, 0);
	b.u32(10).u32(20);
	let Node::ArgPosition(node) = assert_round_trip(&b.build()) else {
		panic!("expected position node");
	};
	assert_eq!(node.trailer, [10, 20]);
	assert_eq!(node.position[0].samples::<PositionKey>().expect("keys").len(), 2);
}

#[test]
fn animation_node_reads_position_then_rotation() {
	let mut b = ByteBuilder::new();
	b.string(b"model::ArgAnimationNode").string(b"flap").zeros(248);
	b.u32(1);
	arg_stream(&mut b, 1, 1, POSITION_WIDTH, 0);
	b.u32(1);
	arg_stream(&mut b, 2, 2, ROTATION_WIDTH, 0);
	b.u32(0);
	let Node::ArgAnimation(node) = assert_round_trip(&b.build()) else {
		panic!("expected animation node");
	};
	assert_eq!(node.position[0].argument, 1);
	assert_eq!(node.rotation[0].argument, 2);
	assert_eq!(node.rotation[0].samples.len(), 80);
}

#[test]
fn visibility_node_uses_sixteen_byte_samples() {
	let mut b = ByteBuilder::new();
	b.string(b"model::ArgVisibilityNode").string(b"lamp").zeros(8).u32(1);
	b.u32(4).u32(2).f64(-1.0).f64(0.0).f64(0.5).f64(1.5);
	let Node::ArgVisibility(node) = assert_round_trip(&b.build()) else {
		panic!("expected visibility node");
	};
	let ranges = node.visibility[0].samples::<crate::edm::VisibilityRange>().expect("ranges");
	assert_eq!(ranges[1].start, 0.5);
	assert_eq!(ranges[1].end, 1.5);
}

#[test]
fn scale_node_with_zero_trailer() {
	let mut b = ByteBuilder::new();
	b.string(b"model::ArgScaleNode").string(b"s").zeros(248).zeros(12);
	assert!(matches!(assert_round_trip(&b.build()), Node::ArgScale(_)));
}

#[test]
fn scale_node_non_zero_trailer_is_strict_by_default() {
	let mut b = ByteBuilder::new();
	b.string(b"model::ArgScaleNode").string(b"s").zeros(248).zeros(11).u8(1);
	let (node, _, _) = decode_node(&b.build(), DecodeOptions::default());
	match node {
		Err(EdmError::ConstantMismatch { at, found, .. }) => {
			assert_eq!(at, 4 + 19 + 4 + 1 + 248);
			assert_eq!(found[11], 1);
		}
		other => panic!("expected constant mismatch, got {other:?}"),
	}
}

#[test]
fn scale_node_non_zero_trailer_is_kept_when_lenient() {
	let mut b = ByteBuilder::new();
	b.string(b"model::ArgScaleNode").string(b"s").zeros(248).zeros(11).u8(1);
	let bytes = b.build();
	let (node, warnings, _) = decode_node(&bytes, DecodeOptions::lenient());
	let node = node.expect("lenient decode");
	assert!(matches!(warnings.as_slice(), [DecodeWarning::NonZeroScaleTrailer { .. }]));

	let mut w = Writer::new();
	node.write_named(&mut w).expect("encodes");
	assert_eq!(w.finish().0, bytes);
}

#[test]
fn render_node_reads_name_before_base_data() {
	let mut b = ByteBuilder::new();
	render_node(&mut b, "hull", 0);
	let Node::Render(node) = assert_round_trip(&b.build()) else {
		panic!("expected render node");
	};
	assert_eq!(node.name, "hull");
	assert_eq!(node.base.0, [0, 1, 2]);
	assert_eq!(node.int_sections.iter().map(|s| s.0.clone()).collect::<Vec<_>>(), vec![vec![7], vec![1, 2]]);
	assert_eq!(node.vertices.len(), 3);
	assert_eq!(node.vertices.stride(), 9);
	assert_eq!(node.vertices.get(2).expect("third vertex")[0], 18.0);
	assert_eq!(node.indices, IndexBuffer::U8(vec![0, 1, 2]));
}

#[test]
fn node_names() {
	let mut b = ByteBuilder::new();
	render_node(&mut b, "hull", 1);
	let (node, _, _) = decode_node(&b.build(), DecodeOptions::default());
	let node = node.expect("decodes");
	assert_eq!(node.name(), Some("hull"));
	assert_eq!(node.type_name().as_str(), "model::RenderNode");

	let plain = ByteBuilder::new().string(b"model::Node").zeros(12).build();
	let (node, _, _) = decode_node(&plain, DecodeOptions::default());
	assert_eq!(node.expect("decodes").name(), None);
}
