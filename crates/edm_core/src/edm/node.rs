//! Scene node kinds.
//!
//! Node payloads have no length prefix and each kind lays its fields out in its own
//! order, so every reader consumes exactly its own bytes and nothing else.

use serde::Serialize;

use crate::edm::anim::{ArgStream, PositionKey, RotationKey, VisibilityRange, read_streams, write_streams};
use crate::edm::decode::{DecodeWarning, Decoder};
use crate::edm::geometry::{IndexBuffer, IntSection, VertexBuffer};
use crate::edm::material::Material;
use crate::edm::opaque::Opaque;
use crate::edm::property::{PropertyList, read_property_list, write_property_list};
use crate::edm::registry::{TypeName, read_named_node};
use crate::edm::writer::Writer;
use crate::edm::{EdmError, Result};

/// Row-major 4x4 double matrix in stored order.
pub type Matrix4d = [[f64; 4]; 4];

/// Zero `u32` guard that brackets some argument-stream lists.
const ZERO_GUARD: [u8; 4] = [0; 4];

/// Shared three-word header of plain, transform and render nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BaseData(pub [u32; 3]);

impl BaseData {
	fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		let words = dec.read_u32s_le(3)?;
		Ok(Self([words[0], words[1], words[2]]))
	}

	fn write(&self, w: &mut Writer) {
		w.write_u32s_le(&self.0);
	}
}

/// `model::Node`: base data only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlainNode {
	/// Opaque base words.
	pub base: BaseData,
}

impl PlainNode {
	/// Read the record payload.
	pub fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		Ok(Self { base: BaseData::read(dec)? })
	}
}

/// `model::TransformNode`: base data and a local transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformNode {
	/// Opaque base words.
	pub base: BaseData,
	/// Local transform.
	pub matrix: Matrix4d,
}

impl TransformNode {
	/// Read the record payload.
	pub fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		let base = BaseData::read(dec)?;
		let matrix = read_matrix4d(dec)?;
		Ok(Self { base, matrix })
	}
}

/// `model::ArgRotationNode`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgRotationNode {
	/// Node name.
	pub name: String,
	/// Unidentified animation base block.
	pub base: Opaque<248>,
	/// Rotation streams, 40-byte samples.
	pub rotation: Vec<ArgStream>,
}

impl ArgRotationNode {
	/// Read the record payload.
	pub fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		let name = dec.read_string()?;
		let base = Opaque::read(dec)?;
		dec.expect_constant(&ZERO_GUARD)?;
		let rotation = read_streams::<RotationKey>(dec)?;
		dec.expect_constant(&ZERO_GUARD)?;
		Ok(Self { name, base, rotation })
	}
}

/// `model::ArgPositionNode`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgPositionNode {
	/// Node name.
	pub name: String,
	/// Unidentified animation base block.
	pub base: Opaque<248>,
	/// Position streams, 32-byte samples.
	pub position: Vec<ArgStream>,
	/// Two unidentified trailing words.
	pub trailer: [u32; 2],
}

impl ArgPositionNode {
	/// Read the record payload.
	pub fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		let name = dec.read_string()?;
		let base = Opaque::read(dec)?;
		let position = read_streams::<PositionKey>(dec)?;
		let trailer = [dec.read_u32_le()?, dec.read_u32_le()?];
		Ok(Self {
			name,
			base,
			position,
			trailer,
		})
	}
}

/// `model::ArgScaleNode`.
///
/// No sample with scale data has been seen, so the trailer is expected to be zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgScaleNode {
	/// Node name.
	pub name: String,
	/// Unidentified animation base block.
	pub base: Opaque<248>,
	/// Trailing bytes; all zero unless decoded leniently.
	pub trailer: Opaque<12>,
}

impl ArgScaleNode {
	/// Read the record payload.
	pub fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		let name = dec.read_string()?;
		let base = Opaque::read(dec)?;
		let at = dec.pos();
		let trailer: Opaque<12> = Opaque::read(dec)?;
		if !trailer.is_zeroed() {
			if dec.options().strict_scale_trailer {
				return Err(EdmError::ConstantMismatch {
					at,
					expected: vec![0; 12],
					found: trailer.as_bytes().to_vec(),
				});
			}
			dec.warn(DecodeWarning::NonZeroScaleTrailer { at });
		}
		Ok(Self { name, base, trailer })
	}
}

/// `model::ArgAnimationNode`: position then rotation streams.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgAnimationNode {
	/// Node name.
	pub name: String,
	/// Unidentified animation base block.
	pub base: Opaque<248>,
	/// Position streams, 32-byte samples.
	pub position: Vec<ArgStream>,
	/// Rotation streams, 40-byte samples.
	pub rotation: Vec<ArgStream>,
}

impl ArgAnimationNode {
	/// Read the record payload.
	pub fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		let name = dec.read_string()?;
		let base = Opaque::read(dec)?;
		let position = read_streams::<PositionKey>(dec)?;
		let rotation = read_streams::<RotationKey>(dec)?;
		dec.expect_constant(&ZERO_GUARD)?;
		Ok(Self {
			name,
			base,
			position,
			rotation,
		})
	}
}

/// `model::ArgVisibilityNode`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgVisibilityNode {
	/// Node name.
	pub name: String,
	/// Unidentified bytes between name and streams.
	pub header: Opaque<8>,
	/// Visibility interval streams, 16-byte samples.
	pub visibility: Vec<ArgStream>,
}

impl ArgVisibilityNode {
	/// Read the record payload.
	pub fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		let name = dec.read_string()?;
		let header = Opaque::read(dec)?;
		let visibility = read_streams::<VisibilityRange>(dec)?;
		Ok(Self { name, header, visibility })
	}
}

/// `model::RenderNode`: drawable geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
	/// Node name.
	pub name: String,
	/// Opaque base words.
	pub base: BaseData,
	/// Index into the root node's material list.
	pub material: u32,
	/// Sentinel-terminated int runs of unknown meaning.
	pub int_sections: Vec<IntSection>,
	/// Vertex lanes, laid out per the material's vertex format.
	pub vertices: VertexBuffer,
	/// Triangle-list indices.
	pub indices: IndexBuffer,
}

impl RenderNode {
	/// Read the record payload. Unlike other kinds the name comes before base data.
	pub fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		let name = dec.read_string()?;
		let base = BaseData::read(dec)?;
		let material = dec.read_u32_le()?;
		let int_sections = dec.read_list(IntSection::read)?;
		let vertices = VertexBuffer::read(dec)?;
		let indices = IndexBuffer::read(dec)?;
		Ok(Self {
			name,
			base,
			material,
			int_sections,
			vertices,
			indices,
		})
	}

	/// Write the record payload.
	pub fn write(&self, w: &mut Writer) -> Result<()> {
		w.write_string(&self.name)?;
		self.base.write(w);
		w.write_u32_le(self.material);
		w.write_list(&self.int_sections, |w, section| section.write(w))?;
		self.vertices.write(w)?;
		self.indices.write(w)
	}
}

/// `model::RootNode`: top of the hierarchy, owning materials and child nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootNode {
	/// Model name.
	pub name: String,
	/// Root record version word.
	pub version: u32,
	/// Model-wide properties.
	pub properties: PropertyList,
	/// Unidentified block after the properties.
	pub reserved_a: Opaque<145>,
	/// Material table referenced by render nodes.
	pub materials: Vec<Material>,
	/// Unidentified block before the node list.
	pub reserved_b: Opaque<8>,
	/// Scene hierarchy nodes.
	pub nodes: Vec<Node>,
}

impl RootNode {
	/// Read the record payload.
	pub fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		let name = dec.read_string()?;
		let version = dec.read_u32_le()?;
		let properties = read_property_list(dec)?;
		let reserved_a = Opaque::read(dec)?;
		let materials = dec.read_list(Material::read)?;
		let reserved_b = Opaque::read(dec)?;
		let nodes = dec.read_list(read_named_node)?;
		Ok(Self {
			name,
			version,
			properties,
			reserved_a,
			materials,
			reserved_b,
			nodes,
		})
	}

	/// Write the record payload.
	pub fn write(&self, w: &mut Writer) -> Result<()> {
		w.write_string(&self.name)?;
		w.write_u32_le(self.version);
		write_property_list(w, &self.properties)?;
		self.reserved_a.write(w);
		w.write_list(&self.materials, |w, material| material.write(w))?;
		self.reserved_b.write(w);
		w.write_list(&self.nodes, |w, node| node.write_named(w))
	}
}

/// Any node kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
	/// `model::Node`
	Node(PlainNode),
	/// `model::TransformNode`
	Transform(TransformNode),
	/// `model::ArgRotationNode`
	ArgRotation(ArgRotationNode),
	/// `model::ArgPositionNode`
	ArgPosition(ArgPositionNode),
	/// `model::ArgScaleNode`
	ArgScale(ArgScaleNode),
	/// `model::ArgAnimationNode`
	ArgAnimation(ArgAnimationNode),
	/// `model::ArgVisibilityNode`
	ArgVisibility(ArgVisibilityNode),
	/// `model::RenderNode`
	Render(RenderNode),
	/// `model::RootNode`
	Root(RootNode),
}

impl Node {
	/// Record type of this node.
	pub fn type_name(&self) -> TypeName {
		match self {
			Self::Node(_) => TypeName::Node,
			Self::Transform(_) => TypeName::TransformNode,
			Self::ArgRotation(_) => TypeName::ArgRotationNode,
			Self::ArgPosition(_) => TypeName::ArgPositionNode,
			Self::ArgScale(_) => TypeName::ArgScaleNode,
			Self::ArgAnimation(_) => TypeName::ArgAnimationNode,
			Self::ArgVisibility(_) => TypeName::ArgVisibilityNode,
			Self::Render(_) => TypeName::RenderNode,
			Self::Root(_) => TypeName::RootNode,
		}
	}

	/// Node name; plain and transform nodes carry none.
	pub fn name(&self) -> Option<&str> {
		match self {
			Self::Node(_) | Self::Transform(_) => None,
			Self::ArgRotation(node) => Some(&node.name),
			Self::ArgPosition(node) => Some(&node.name),
			Self::ArgScale(node) => Some(&node.name),
			Self::ArgAnimation(node) => Some(&node.name),
			Self::ArgVisibility(node) => Some(&node.name),
			Self::Render(node) => Some(&node.name),
			Self::Root(node) => Some(&node.name),
		}
	}

	/// Write the node payload without its type name.
	pub fn write(&self, w: &mut Writer) -> Result<()> {
		match self {
			Self::Node(node) => node.base.write(w),
			Self::Transform(node) => {
				node.base.write(w);
				write_matrix4d(w, &node.matrix);
			}
			Self::ArgRotation(node) => {
				w.write_string(&node.name)?;
				node.base.write(w);
				w.write_bytes(&ZERO_GUARD);
				write_streams::<RotationKey>(w, &node.rotation)?;
				w.write_bytes(&ZERO_GUARD);
			}
			Self::ArgPosition(node) => {
				w.write_string(&node.name)?;
				node.base.write(w);
				write_streams::<PositionKey>(w, &node.position)?;
				w.write_u32s_le(&node.trailer);
			}
			Self::ArgScale(node) => {
				w.write_string(&node.name)?;
				node.base.write(w);
				node.trailer.write(w);
			}
			Self::ArgAnimation(node) => {
				w.write_string(&node.name)?;
				node.base.write(w);
				write_streams::<PositionKey>(w, &node.position)?;
				write_streams::<RotationKey>(w, &node.rotation)?;
				w.write_bytes(&ZERO_GUARD);
			}
			Self::ArgVisibility(node) => {
				w.write_string(&node.name)?;
				node.header.write(w);
				write_streams::<VisibilityRange>(w, &node.visibility)?;
			}
			Self::Render(node) => node.write(w)?,
			Self::Root(node) => node.write(w)?,
		}
		Ok(())
	}

	/// Write the type name and payload.
	pub fn write_named(&self, w: &mut Writer) -> Result<()> {
		w.write_type_name(self.type_name().as_str())?;
		self.write(w)
	}
}

fn read_matrix4d(dec: &mut Decoder<'_>) -> Result<Matrix4d> {
	let flat = dec.read_f64s_le(16)?;
	let mut out = [[0.0; 4]; 4];
	for (row, chunk) in out.iter_mut().zip(flat.chunks_exact(4)) {
		row.copy_from_slice(chunk);
	}
	Ok(out)
}

fn write_matrix4d(w: &mut Writer, matrix: &Matrix4d) {
	for row in matrix {
		w.write_f64s_le(row);
	}
}

#[cfg(test)]
mod tests;
