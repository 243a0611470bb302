use indexmap::IndexMap;
use serde::Serialize;

use crate::edm::decode::Decoder;
use crate::edm::opaque::Opaque;
use crate::edm::property::{PropertyList, read_property_list, write_property_list};
use crate::edm::writer::Writer;
use crate::edm::{EdmError, Result};

/// Row-major 4x4 float matrix in stored order.
pub type Matrix4f = [[f32; 4]; 4];

/// Literal bytes before a texture name.
pub const TEXTURE_PREFIX: [u8; 8] = [0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF];

/// Literal bytes between a texture name and its matrix: `u32` values `2, 2, 10, 6`.
pub const TEXTURE_INFIX: [u8; 16] = [2, 0, 0, 0, 2, 0, 0, 0, 10, 0, 0, 0, 6, 0, 0, 0];

/// Smallest vertex format blob that holds every known channel count.
pub const VERTEX_FORMAT_MIN_LEN: usize = 5;

/// Closed set of material entry names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialKey {
	/// `BLENDING`
	Blending,
	/// `CULLING`
	Culling,
	/// `DEPTH_BIAS`
	DepthBias,
	/// `TEXTURE_COORDINATES_CHANNELS`
	TextureCoordinatesChannels,
	/// `MATERIAL_NAME`
	MaterialName,
	/// `NAME`
	Name,
	/// `SHADOWS`
	Shadows,
	/// `VERTEX_FORMAT`
	VertexFormat,
	/// `UNIFORMS`
	Uniforms,
	/// `ANIMATED_UNIFORMS`
	AnimatedUniforms,
	/// `TEXTURES`
	Textures,
}

impl MaterialKey {
	/// Every recognized key.
	pub const ALL: [Self; 11] = [
		Self::Blending,
		Self::Culling,
		Self::DepthBias,
		Self::TextureCoordinatesChannels,
		Self::MaterialName,
		Self::Name,
		Self::Shadows,
		Self::VertexFormat,
		Self::Uniforms,
		Self::AnimatedUniforms,
		Self::Textures,
	];

	/// Wire spelling.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Blending => "BLENDING",
			Self::Culling => "CULLING",
			Self::DepthBias => "DEPTH_BIAS",
			Self::TextureCoordinatesChannels => "TEXTURE_COORDINATES_CHANNELS",
			Self::MaterialName => "MATERIAL_NAME",
			Self::Name => "NAME",
			Self::Shadows => "SHADOWS",
			Self::VertexFormat => "VERTEX_FORMAT",
			Self::Uniforms => "UNIFORMS",
			Self::AnimatedUniforms => "ANIMATED_UNIFORMS",
			Self::Textures => "TEXTURES",
		}
	}

	/// Look up a wire spelling.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.iter().copied().find(|key| key.as_str() == name)
	}
}

/// Channel counts extracted from a vertex format blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VertexFormat {
	/// Position lanes per vertex.
	pub position: u8,
	/// Normal lanes per vertex.
	pub normal: u8,
	/// Texture coordinate lanes per vertex.
	pub texture: u8,
	/// Length of the channel blob on the wire.
	pub channels: u32,
}

impl VertexFormat {
	/// Lanes consumed by all known channels.
	pub fn stride(&self) -> usize {
		usize::from(self.position) + usize::from(self.normal) + usize::from(self.texture)
	}

	/// Read the length-prefixed channel blob; reserved bytes 2, 3 and 5.. must be zero.
	pub fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		let channels = dec.read_u32_le()?;
		let at = dec.pos();
		let data = dec.read_exact(channels as usize)?;
		if data.len() < VERTEX_FORMAT_MIN_LEN {
			return Err(EdmError::MalformedVertexFormat { at, len: data.len() });
		}
		for (index, value) in data.iter().copied().enumerate() {
			let reserved = matches!(index, 2 | 3) || index >= VERTEX_FORMAT_MIN_LEN;
			if reserved && value != 0 {
				return Err(EdmError::VertexFormatReserved { at, index, value });
			}
		}
		Ok(Self {
			position: data[0],
			normal: data[1],
			texture: data[4],
			channels,
		})
	}

	/// Write the channel blob, zero-filling reserved bytes.
	pub fn write(&self, w: &mut Writer) -> Result<()> {
		let len = self.channels as usize;
		if len < VERTEX_FORMAT_MIN_LEN {
			return Err(EdmError::MalformedVertexFormat { at: w.len(), len });
		}
		let mut data = vec![0_u8; len];
		data[0] = self.position;
		data[1] = self.normal;
		data[4] = self.texture;
		w.write_u32_le(self.channels);
		w.write_bytes(&data);
		Ok(())
	}
}

/// Texture binding: a texture name and its coordinate transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Texture {
	/// Texture file stem.
	pub name: String,
	/// Texture coordinate matrix.
	pub matrix: Matrix4f,
}

impl Texture {
	fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		dec.expect_constant(&TEXTURE_PREFIX)?;
		let name = dec.read_string()?;
		dec.expect_constant(&TEXTURE_INFIX)?;
		let flat = dec.read_f32s_le(16)?;
		let mut matrix = [[0.0; 4]; 4];
		for (row, chunk) in matrix.iter_mut().zip(flat.chunks_exact(4)) {
			row.copy_from_slice(chunk);
		}
		Ok(Self { name, matrix })
	}

	fn write(&self, w: &mut Writer) -> Result<()> {
		w.write_bytes(&TEXTURE_PREFIX);
		w.write_string(&self.name)?;
		w.write_bytes(&TEXTURE_INFIX);
		for row in &self.matrix {
			w.write_f32s_le(row);
		}
		Ok(())
	}
}

/// Payload of one material entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MaterialValue {
	/// Blend mode enum.
	Blending(u8),
	/// Face culling enum.
	Culling(u8),
	/// Depth bias.
	DepthBias(u32),
	/// Unidentified texture channel table.
	TextureCoordinatesChannels(Opaque<52>),
	/// Shader/material template name.
	MaterialName(String),
	/// Material instance name.
	Name(String),
	/// Shadow mode enum.
	Shadows(u8),
	/// Vertex lane layout.
	VertexFormat(VertexFormat),
	/// Shader uniforms.
	Uniforms(PropertyList),
	/// Argument-driven shader uniforms.
	AnimatedUniforms(PropertyList),
	/// Texture bindings.
	Textures(Vec<Texture>),
}

impl MaterialValue {
	/// Key this value is stored under.
	pub fn key(&self) -> MaterialKey {
		match self {
			Self::Blending(_) => MaterialKey::Blending,
			Self::Culling(_) => MaterialKey::Culling,
			Self::DepthBias(_) => MaterialKey::DepthBias,
			Self::TextureCoordinatesChannels(_) => MaterialKey::TextureCoordinatesChannels,
			Self::MaterialName(_) => MaterialKey::MaterialName,
			Self::Name(_) => MaterialKey::Name,
			Self::Shadows(_) => MaterialKey::Shadows,
			Self::VertexFormat(_) => MaterialKey::VertexFormat,
			Self::Uniforms(_) => MaterialKey::Uniforms,
			Self::AnimatedUniforms(_) => MaterialKey::AnimatedUniforms,
			Self::Textures(_) => MaterialKey::Textures,
		}
	}

	fn read(dec: &mut Decoder<'_>, key: MaterialKey) -> Result<Self> {
		Ok(match key {
			MaterialKey::Blending => Self::Blending(dec.read_u8()?),
			MaterialKey::Culling => Self::Culling(dec.read_u8()?),
			MaterialKey::DepthBias => Self::DepthBias(dec.read_u32_le()?),
			MaterialKey::TextureCoordinatesChannels => Self::TextureCoordinatesChannels(Opaque::read(dec)?),
			MaterialKey::MaterialName => Self::MaterialName(dec.read_string()?),
			MaterialKey::Name => Self::Name(dec.read_string()?),
			MaterialKey::Shadows => Self::Shadows(dec.read_u8()?),
			MaterialKey::VertexFormat => Self::VertexFormat(VertexFormat::read(dec)?),
			MaterialKey::Uniforms => Self::Uniforms(read_property_list(dec)?),
			MaterialKey::AnimatedUniforms => Self::AnimatedUniforms(read_property_list(dec)?),
			MaterialKey::Textures => Self::Textures(dec.read_list(Texture::read)?),
		})
	}

	fn write(&self, w: &mut Writer) -> Result<()> {
		match self {
			Self::Blending(value) | Self::Culling(value) | Self::Shadows(value) => w.write_u8(*value),
			Self::DepthBias(value) => w.write_u32_le(*value),
			Self::TextureCoordinatesChannels(block) => block.write(w),
			Self::MaterialName(value) | Self::Name(value) => w.write_string(value)?,
			Self::VertexFormat(format) => format.write(w)?,
			Self::Uniforms(list) | Self::AnimatedUniforms(list) => write_property_list(w, list)?,
			Self::Textures(textures) => w.write_list(textures, |w, texture| texture.write(w))?,
		}
		Ok(())
	}
}

/// Ordered bag of material entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Material {
	/// Entries in stream order; a repeated key keeps its first position.
	pub entries: IndexMap<MaterialKey, MaterialValue>,
}

impl Material {
	/// Read a count-prefixed run of `(name, payload)` entries.
	pub fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		let count = dec.read_count()?;
		let mut entries = IndexMap::with_capacity(count.min(MaterialKey::ALL.len()));
		for _ in 0..count {
			let at = dec.pos();
			let name = dec.read_string()?;
			let key = MaterialKey::from_name(&name).ok_or(EdmError::UnrecognizedMaterialKey { at, key: name })?;
			let value = MaterialValue::read(dec, key)?;
			if entries.insert(key, value).is_some() {
				dec.note_duplicate(at, "material", key.as_str());
			}
		}
		Ok(Self { entries })
	}

	/// Write every entry in order.
	pub fn write(&self, w: &mut Writer) -> Result<()> {
		w.write_len(self.entries.len())?;
		for value in self.entries.values() {
			w.write_string(value.key().as_str())?;
			value.write(w)?;
		}
		Ok(())
	}

	/// Insert or replace an entry under its own key.
	pub fn set(&mut self, value: MaterialValue) -> Option<MaterialValue> {
		self.entries.insert(value.key(), value)
	}

	/// Entry stored under `key`.
	pub fn get(&self, key: MaterialKey) -> Option<&MaterialValue> {
		self.entries.get(&key)
	}

	/// `NAME` entry, if present.
	pub fn name(&self) -> Option<&str> {
		match self.get(MaterialKey::Name)? {
			MaterialValue::Name(name) => Some(name),
			_ => None,
		}
	}

	/// `MATERIAL_NAME` entry, if present.
	pub fn material_name(&self) -> Option<&str> {
		match self.get(MaterialKey::MaterialName)? {
			MaterialValue::MaterialName(name) => Some(name),
			_ => None,
		}
	}

	/// `VERTEX_FORMAT` entry, if present.
	pub fn vertex_format(&self) -> Option<VertexFormat> {
		match self.get(MaterialKey::VertexFormat)? {
			MaterialValue::VertexFormat(format) => Some(*format),
			_ => None,
		}
	}

	/// `TEXTURES` entry, or an empty slice.
	pub fn textures(&self) -> &[Texture] {
		match self.get(MaterialKey::Textures) {
			Some(MaterialValue::Textures(textures)) => textures,
			_ => &[],
		}
	}
}
