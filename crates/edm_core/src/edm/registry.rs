//! Closed table of self-describing record types.
//!
//! A named record is a length-prefixed type name followed by that type's payload.
//! The set of names is fixed for format version 8; anything else is an error.

use serde::Serialize;

use crate::edm::connector::Connector;
use crate::edm::decode::Decoder;
use crate::edm::node::{
	ArgAnimationNode, ArgPositionNode, ArgRotationNode, ArgScaleNode, ArgVisibilityNode, Node, PlainNode, RenderNode, RootNode,
	TransformNode,
};
use crate::edm::property::{Property, ValueKind};
use crate::edm::writer::Writer;
use crate::edm::{EdmError, Result};

/// Every record type the decoder knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TypeName {
	/// `model::Node`
	Node,
	/// `model::TransformNode`
	TransformNode,
	/// `model::ArgRotationNode`
	ArgRotationNode,
	/// `model::ArgPositionNode`
	ArgPositionNode,
	/// `model::ArgScaleNode`
	ArgScaleNode,
	/// `model::ArgAnimationNode`
	ArgAnimationNode,
	/// `model::ArgVisibilityNode`
	ArgVisibilityNode,
	/// `model::RenderNode`
	RenderNode,
	/// `model::RootNode`
	RootNode,
	/// `model::Connector`
	Connector,
	/// `model::Property<T>`
	Property(ValueKind),
	/// `model::AnimatedProperty<T>`
	AnimatedProperty(ValueKind),
}

/// Registration table, built at compile time.
pub const TYPE_TABLE: [TypeName; 20] = [
	TypeName::Node,
	TypeName::TransformNode,
	TypeName::ArgRotationNode,
	TypeName::ArgPositionNode,
	TypeName::ArgScaleNode,
	TypeName::ArgAnimationNode,
	TypeName::ArgVisibilityNode,
	TypeName::RenderNode,
	TypeName::RootNode,
	TypeName::Connector,
	TypeName::Property(ValueKind::Float),
	TypeName::Property(ValueKind::UInt),
	TypeName::Property(ValueKind::Vec2f),
	TypeName::Property(ValueKind::Vec3f),
	TypeName::Property(ValueKind::Vec4f),
	TypeName::AnimatedProperty(ValueKind::Float),
	TypeName::AnimatedProperty(ValueKind::UInt),
	TypeName::AnimatedProperty(ValueKind::Vec2f),
	TypeName::AnimatedProperty(ValueKind::Vec3f),
	TypeName::AnimatedProperty(ValueKind::Vec4f),
];

impl TypeName {
	/// Wire spelling of the type name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Node => "model::Node",
			Self::TransformNode => "model::TransformNode",
			Self::ArgRotationNode => "model::ArgRotationNode",
			Self::ArgPositionNode => "model::ArgPositionNode",
			Self::ArgScaleNode => "model::ArgScaleNode",
			Self::ArgAnimationNode => "model::ArgAnimationNode",
			Self::ArgVisibilityNode => "model::ArgVisibilityNode",
			Self::RenderNode => "model::RenderNode",
			Self::RootNode => "model::RootNode",
			Self::Connector => "model::Connector",
			Self::Property(kind) => match kind {
				ValueKind::Float => "model::Property<float>",
				ValueKind::UInt => "model::Property<unsigned int>",
				ValueKind::Vec2f => "model::Property<osg::Vec2f>",
				ValueKind::Vec3f => "model::Property<osg::Vec3f>",
				ValueKind::Vec4f => "model::Property<osg::Vec4f>",
			},
			Self::AnimatedProperty(kind) => match kind {
				ValueKind::Float => "model::AnimatedProperty<float>",
				ValueKind::UInt => "model::AnimatedProperty<unsigned int>",
				ValueKind::Vec2f => "model::AnimatedProperty<osg::Vec2f>",
				ValueKind::Vec3f => "model::AnimatedProperty<osg::Vec3f>",
				ValueKind::Vec4f => "model::AnimatedProperty<osg::Vec4f>",
			},
		}
	}

	/// Look up a wire type name.
	pub fn from_name(name: &str) -> Option<Self> {
		TYPE_TABLE.iter().copied().find(|item| item.as_str() == name)
	}
}

/// A decoded named record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Record {
	/// Any node kind.
	Node(Node),
	/// Attachment point.
	Connector(Connector),
	/// Property list entry.
	Property(Property),
}

impl Record {
	/// Type name this record was decoded from.
	pub fn type_name(&self) -> TypeName {
		match self {
			Self::Node(node) => node.type_name(),
			Self::Connector(_) => TypeName::Connector,
			Self::Property(property) => property.value.type_name(),
		}
	}
}

/// Read a type name and decode the record it names.
pub fn read_named_type(dec: &mut Decoder<'_>) -> Result<Record> {
	let at = dec.pos();
	let name = dec.read_string()?;
	let type_name = TypeName::from_name(&name).ok_or(EdmError::UnknownType { at, name })?;

	Ok(match type_name {
		TypeName::Node => Record::Node(Node::Node(PlainNode::read(dec)?)),
		TypeName::TransformNode => Record::Node(Node::Transform(TransformNode::read(dec)?)),
		TypeName::ArgRotationNode => Record::Node(Node::ArgRotation(ArgRotationNode::read(dec)?)),
		TypeName::ArgPositionNode => Record::Node(Node::ArgPosition(ArgPositionNode::read(dec)?)),
		TypeName::ArgScaleNode => Record::Node(Node::ArgScale(ArgScaleNode::read(dec)?)),
		TypeName::ArgAnimationNode => Record::Node(Node::ArgAnimation(ArgAnimationNode::read(dec)?)),
		TypeName::ArgVisibilityNode => Record::Node(Node::ArgVisibility(ArgVisibilityNode::read(dec)?)),
		TypeName::RenderNode => Record::Node(Node::Render(RenderNode::read(dec)?)),
		TypeName::RootNode => Record::Node(Node::Root(RootNode::read(dec)?)),
		TypeName::Connector => Record::Connector(Connector::read(dec)?),
		TypeName::Property(kind) => Record::Property(Property::read_constant(dec, kind)?),
		TypeName::AnimatedProperty(kind) => Record::Property(Property::read_animated(dec, kind)?),
	})
}

/// Read a named record that must be a node.
pub fn read_named_node(dec: &mut Decoder<'_>) -> Result<Node> {
	let at = dec.pos();
	match read_named_type(dec)? {
		Record::Node(node) => Ok(node),
		other => Err(EdmError::UnexpectedRecord {
			at,
			expected: "node",
			found: other.type_name().as_str(),
		}),
	}
}

/// Write a record with its type name.
pub fn write_named_type(w: &mut Writer, record: &Record) -> Result<()> {
	match record {
		Record::Node(node) => node.write_named(w),
		Record::Connector(connector) => connector.write_named(w),
		Record::Property(property) => {
			w.write_type_name(property.value.type_name().as_str())?;
			property.write(w)
		}
	}
}
