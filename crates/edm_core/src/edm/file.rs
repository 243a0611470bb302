use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::edm::connector::Connector;
use crate::edm::decode::{DecodeOptions, DecodeWarning, Decoder};
use crate::edm::header::EdmHeader;
use crate::edm::material::Material;
use crate::edm::node::{Node, RenderNode, RootNode};
use crate::edm::opaque::Opaque;
use crate::edm::property::{IndexTable, read_string_uint_dict, write_string_uint_dict};
use crate::edm::registry::{Record, TypeName, read_named_node, read_named_type};
use crate::edm::writer::{TypeLog, Writer};
use crate::edm::{EdmError, Result};

/// `i32` sentinel that follows the root node.
pub const ROOT_SENTINEL: i32 = -1;

/// Top-level named list holding the model's connectors.
pub const CONNECTORS: &str = "CONNECTORS";

/// Top-level named list holding the model's render nodes.
pub const RENDER_NODES: &str = "RENDER_NODES";

/// One of the two top-level named lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectList {
	/// `CONNECTORS`
	Connectors,
	/// `RENDER_NODES`
	RenderNodes,
}

impl ObjectList {
	/// Wire spelling of the list name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Connectors => CONNECTORS,
			Self::RenderNodes => RENDER_NODES,
		}
	}
}

/// Whole decoded `.edm` container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdmFile {
	/// Container version, always [`EdmHeader::VERSION`].
	pub version: u16,
	/// First auxiliary `name -> u32` index.
	pub index_a: IndexTable,
	/// Second auxiliary `name -> u32` index.
	pub index_b: IndexTable,
	/// Root of the node hierarchy.
	pub root: RootNode,
	/// Unidentified block after the root sentinel.
	pub reserved: Opaque<1648>,
	/// Attachment points.
	pub connectors: Vec<Connector>,
	/// Drawable nodes.
	pub render_nodes: Vec<RenderNode>,
	/// Order the two named lists appeared in.
	pub list_order: [ObjectList; 2],
}

/// Successful decode result.
#[derive(Debug)]
pub struct Decoded {
	/// The decoded container.
	pub file: EdmFile,
	/// Non-fatal findings, in stream order.
	pub warnings: Vec<DecodeWarning>,
}

impl EdmFile {
	/// Read and decode a file from disk with default options.
	pub fn open(path: impl AsRef<Path>) -> Result<Decoded> {
		Self::open_with(path, DecodeOptions::default())
	}

	/// Read and decode a file from disk.
	pub fn open_with(path: impl AsRef<Path>, options: DecodeOptions) -> Result<Decoded> {
		let bytes = fs::read(path)?;
		Self::decode(&bytes, options)
	}

	/// Decode a container held in memory with default options.
	pub fn from_bytes(bytes: &[u8]) -> Result<Decoded> {
		Self::decode(bytes, DecodeOptions::default())
	}

	/// Decode a container held in memory.
	pub fn decode(bytes: &[u8], options: DecodeOptions) -> Result<Decoded> {
		let mut dec = Decoder::new(bytes, options);

		let header = EdmHeader::parse(&mut dec)?;
		let index_a = read_string_uint_dict(&mut dec, "index_a")?;
		let index_b = read_string_uint_dict(&mut dec, "index_b")?;

		let root_at = dec.pos();
		let root = match read_named_node(&mut dec)? {
			Node::Root(root) => root,
			other => {
				return Err(EdmError::UnexpectedRecord {
					at: root_at,
					expected: TypeName::RootNode.as_str(),
					found: other.type_name().as_str(),
				});
			}
		};

		dec.expect_constant(&ROOT_SENTINEL.to_le_bytes())?;
		let reserved = Opaque::read(&mut dec)?;

		let (connectors, render_nodes, list_order) = read_object_lists(&mut dec)?;

		if dec.remaining() > 0 {
			let at = dec.pos();
			let remaining = dec.remaining();
			dec.warn(DecodeWarning::TrailingData { at, remaining });
		}

		let file = Self {
			version: header.version,
			index_a,
			index_b,
			root,
			reserved,
			connectors,
			render_nodes,
			list_order,
		};
		tracing::debug!(
			version = file.version,
			nodes = file.root.nodes.len(),
			materials = file.root.materials.len(),
			connectors = file.connectors.len(),
			render_nodes = file.render_nodes.len(),
			bytes = bytes.len(),
			"decoded edm file"
		);

		Ok(Decoded {
			file,
			warnings: dec.into_warnings(),
		})
	}

	/// Encode back to bytes.
	pub fn encode(&self) -> Result<Vec<u8>> {
		self.encode_with_log().map(|(bytes, _)| bytes)
	}

	/// Encode back to bytes, also returning per-record-type emission counts.
	///
	/// Fails with [`EdmError::VersionMismatch`] unless `version` is [`EdmHeader::VERSION`].
	pub fn encode_with_log(&self) -> Result<(Vec<u8>, TypeLog)> {
		if self.version != EdmHeader::VERSION {
			return Err(EdmError::VersionMismatch {
				expected: EdmHeader::VERSION,
				found: self.version,
			});
		}
		let mut w = Writer::new();
		EdmHeader { version: self.version }.write(&mut w);
		write_string_uint_dict(&mut w, &self.index_a)?;
		write_string_uint_dict(&mut w, &self.index_b)?;
		w.write_type_name(TypeName::RootNode.as_str())?;
		self.root.write(&mut w)?;
		w.write_i32_le(ROOT_SENTINEL);
		self.reserved.write(&mut w);

		w.write_len(self.list_order.len())?;
		for list in self.list_order {
			w.write_string(list.as_str())?;
			match list {
				ObjectList::Connectors => w.write_list(&self.connectors, |w, connector| connector.write_named(w))?,
				ObjectList::RenderNodes => w.write_list(&self.render_nodes, |w, node| {
					w.write_type_name(TypeName::RenderNode.as_str())?;
					node.write(w)
				})?,
			}
		}

		let (bytes, log) = w.finish();
		tracing::debug!(bytes = bytes.len(), record_types = log.len(), "encoded edm file");
		Ok((bytes, log))
	}

	/// Encode and write to disk.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
		fs::write(path, self.encode()?)?;
		Ok(())
	}

	/// Material a render node refers to.
	pub fn material_of(&self, node: &RenderNode) -> Option<&Material> {
		self.root.materials.get(node.material as usize)
	}

	/// Depth-first walk over the root's node list.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		let mut stack: Vec<&Node> = self.root.nodes.iter().rev().collect();
		std::iter::from_fn(move || {
			let node = stack.pop()?;
			if let Node::Root(root) = node {
				stack.extend(root.nodes.iter().rev());
			}
			Some(node)
		})
	}
}

type ObjectLists = (Vec<Connector>, Vec<RenderNode>, [ObjectList; 2]);

fn read_object_lists(dec: &mut Decoder<'_>) -> Result<ObjectLists> {
	let at = dec.pos();
	let count = dec.read_count()?;
	if count != 2 {
		return Err(EdmError::ObjectListMismatch {
			at,
			found: vec![format!("{count} lists")],
		});
	}

	let mut connectors = None;
	let mut render_nodes = None;
	let mut seen = Vec::with_capacity(2);
	for _ in 0..count {
		let name = dec.read_string()?;
		seen.push(name.clone());
		match name.as_str() {
			CONNECTORS if connectors.is_none() => connectors = Some(dec.read_list(read_connector)?),
			RENDER_NODES if render_nodes.is_none() => render_nodes = Some(dec.read_list(read_render_node)?),
			_ => return Err(EdmError::ObjectListMismatch { at, found: seen }),
		}
	}

	let list_order = if seen[0] == CONNECTORS {
		[ObjectList::Connectors, ObjectList::RenderNodes]
	} else {
		[ObjectList::RenderNodes, ObjectList::Connectors]
	};
	match (connectors, render_nodes) {
		(Some(connectors), Some(render_nodes)) => Ok((connectors, render_nodes, list_order)),
		_ => Err(EdmError::ObjectListMismatch { at, found: seen }),
	}
}

fn read_connector(dec: &mut Decoder<'_>) -> Result<Connector> {
	let at = dec.pos();
	match read_named_type(dec)? {
		Record::Connector(connector) => Ok(connector),
		other => Err(EdmError::UnexpectedRecord {
			at,
			expected: TypeName::Connector.as_str(),
			found: other.type_name().as_str(),
		}),
	}
}

fn read_render_node(dec: &mut Decoder<'_>) -> Result<RenderNode> {
	let at = dec.pos();
	match read_named_node(dec)? {
		Node::Render(node) => Ok(node),
		other => Err(EdmError::UnexpectedRecord {
			at,
			expected: TypeName::RenderNode.as_str(),
			found: other.type_name().as_str(),
		}),
	}
}

#[cfg(test)]
mod tests;
