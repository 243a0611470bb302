use serde::Serialize;

use crate::edm::decode::Decoder;
use crate::edm::writer::Writer;
use crate::edm::{EdmError, Result};

/// Terminator of an int section: `-1` as an unsigned 32-bit value.
pub const INT_SECTION_SENTINEL: u32 = u32::MAX;

/// Literal `u32` that follows every index-buffer header.
pub const INDEX_BUFFER_GUARD: u32 = 5;

/// Run of one or two `u32` values terminated by [`INT_SECTION_SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntSection(pub Vec<u32>);

impl IntSection {
	/// Longest run the format allows.
	pub const MAX_LEN: usize = 2;

	/// Read values until the sentinel, failing if the run is not 1 or 2 long.
	pub fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		let at = dec.pos();
		let mut values = Vec::with_capacity(Self::MAX_LEN);
		loop {
			let value = dec.read_u32_le()?;
			if value == INT_SECTION_SENTINEL {
				break;
			}
			values.push(value);
			if values.len() > Self::MAX_LEN {
				return Err(EdmError::MalformedIntSection { at, len: values.len() });
			}
		}
		if values.is_empty() {
			return Err(EdmError::MalformedIntSection { at, len: 0 });
		}
		Ok(Self(values))
	}

	/// Write the values and the sentinel.
	pub fn write(&self, w: &mut Writer) -> Result<()> {
		let len = self.0.len();
		if !(1..=Self::MAX_LEN).contains(&len) || self.0.contains(&INT_SECTION_SENTINEL) {
			return Err(EdmError::MalformedIntSection { at: w.len(), len });
		}
		w.write_u32s_le(&self.0);
		w.write_u32_le(INT_SECTION_SENTINEL);
		Ok(())
	}
}

/// Flat `f32` vertex data grouped into fixed-size vertices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexBuffer {
	stride: usize,
	data: Vec<f32>,
}

impl VertexBuffer {
	/// Group `data` by `stride`; the length must be an exact multiple of a non-zero stride.
	pub fn from_flat(data: Vec<f32>, stride: usize) -> Result<Self> {
		if stride == 0 || data.len() % stride != 0 {
			return Err(EdmError::RaggedVertexData { len: data.len(), stride });
		}
		Ok(Self { stride, data })
	}

	/// Floats per vertex.
	pub fn stride(&self) -> usize {
		self.stride
	}

	/// Number of vertices.
	pub fn len(&self) -> usize {
		self.data.len() / self.stride
	}

	/// Whether the buffer holds no vertices.
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Lanes of vertex `index`.
	pub fn get(&self, index: usize) -> Option<&[f32]> {
		let start = index.checked_mul(self.stride)?;
		self.data.get(start..start.checked_add(self.stride)?)
	}

	/// Iterate vertices as `stride`-long slices.
	pub fn iter(&self) -> std::slice::ChunksExact<'_, f32> {
		self.data.chunks_exact(self.stride)
	}

	/// Underlying flat data.
	pub fn as_flat(&self) -> &[f32] {
		&self.data
	}

	/// Read `vertex count`, `stride`, then `count * stride` floats.
	pub fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		let count = dec.read_count()?;
		let stride = dec.read_u32_le()? as usize;
		let at = dec.pos();
		let total = count.checked_mul(stride).ok_or(EdmError::MalformedVertexBuffer { at, len: usize::MAX, stride })?;
		let data = dec.read_f32s_le(total)?;
		Self::from_flat(data, stride).map_err(|_| EdmError::MalformedVertexBuffer { at, len: total, stride })
	}

	/// Write the vertex count, stride and flat data.
	pub fn write(&self, w: &mut Writer) -> Result<()> {
		w.write_len(self.len())?;
		w.write_len(self.stride)?;
		w.write_f32s_le(&self.data);
		Ok(())
	}
}

/// Triangle-list indices, stored 8 or 16 bits wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum IndexBuffer {
	/// Discriminant `0`.
	U8(Vec<u8>),
	/// Discriminant `1`.
	U16(Vec<u16>),
}

impl IndexBuffer {
	/// Number of indices.
	pub fn len(&self) -> usize {
		match self {
			Self::U8(items) => items.len(),
			Self::U16(items) => items.len(),
		}
	}

	/// Whether the buffer is empty.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Index at `position`, widened.
	pub fn get(&self, position: usize) -> Option<u32> {
		match self {
			Self::U8(items) => items.get(position).map(|item| u32::from(*item)),
			Self::U16(items) => items.get(position).map(|item| u32::from(*item)),
		}
	}

	/// Iterate indices, widened.
	pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
		(0..self.len()).filter_map(|position| self.get(position))
	}

	/// Wire discriminant byte.
	pub fn discriminant(&self) -> u8 {
		match self {
			Self::U8(_) => 0,
			Self::U16(_) => 1,
		}
	}

	/// Read discriminant, entry count, guard, then the indices.
	pub fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		let at = dec.pos();
		let discriminant = dec.read_u8()?;
		let entries = dec.read_count()?;
		dec.expect_constant(&INDEX_BUFFER_GUARD.to_le_bytes())?;
		match discriminant {
			0 => Ok(Self::U8(dec.read_u8s(entries)?)),
			1 => Ok(Self::U16(dec.read_u16s_le(entries)?)),
			_ => Err(EdmError::UnsupportedIndexWidth { at, discriminant }),
		}
	}

	/// Write discriminant, entry count, guard, then the indices.
	pub fn write(&self, w: &mut Writer) -> Result<()> {
		w.write_u8(self.discriminant());
		w.write_len(self.len())?;
		w.write_u32_le(INDEX_BUFFER_GUARD);
		match self {
			Self::U8(items) => w.write_u8s(items),
			Self::U16(items) => w.write_u16s_le(items),
		}
		Ok(())
	}
}
