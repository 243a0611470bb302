mod anim;
mod bytes;
mod codepage;
mod connector;
mod decode;
mod error;
mod file;
mod geometry;
mod header;
mod material;
mod node;
mod opaque;
mod property;
mod registry;
mod writer;

/// Argument stream and typed sample layouts.
pub use anim::{ArgStream, PositionKey, RotationKey, Sample, VisibilityRange, read_streams, write_streams};
/// Bounded little-endian read cursor.
pub use bytes::Cursor;
/// Attachment point record.
pub use connector::Connector;
/// Decode driver, options and warnings.
pub use decode::{DecodeOptions, DecodeWarning, Decoder, PREALLOC_BYTES};
/// Error and result aliases.
pub use error::{EdmError, Result};
/// Whole-file container and its decode result.
pub use file::{CONNECTORS, Decoded, EdmFile, ObjectList, RENDER_NODES, ROOT_SENTINEL};
/// Render node geometry containers.
pub use geometry::{INDEX_BUFFER_GUARD, INT_SECTION_SENTINEL, IndexBuffer, IntSection, VertexBuffer};
/// File header representation.
pub use header::EdmHeader;
/// Material property bag types.
pub use material::{Material, MaterialKey, MaterialValue, Matrix4f, TEXTURE_INFIX, TEXTURE_PREFIX, Texture, VertexFormat};
/// Node kinds.
pub use node::{
	ArgAnimationNode, ArgPositionNode, ArgRotationNode, ArgScaleNode, ArgVisibilityNode, BaseData, Matrix4d, Node, PlainNode, RenderNode,
	RootNode, TransformNode,
};
/// Fixed-size unidentified byte blocks.
pub use opaque::Opaque;
/// Index tables and typed property lists.
pub use property::{
	IndexTable, Key, Property, PropertyList, PropertyValue, Value, ValueKind, read_property_list, read_string_uint_dict, write_property_list,
	write_string_uint_dict,
};
/// Closed record type table and named-record dispatch.
pub use registry::{Record, TYPE_TABLE, TypeName, read_named_node, read_named_type, write_named_type};
/// Byte sink and record emission log.
pub use writer::{TypeLog, Writer};
