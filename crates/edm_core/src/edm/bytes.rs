use crate::edm::codepage;
use crate::edm::{EdmError, Result};

/// Simple bounded cursor over an immutable byte slice.
///
/// All numeric reads are little-endian; the format has no other byte order.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

macro_rules! read_le {
	($name:ident, $many:ident, $ty:ty) => {
		#[doc = concat!("Read a little-endian `", stringify!($ty), "`.")]
		pub fn $name(&mut self) -> Result<$ty> {
			Ok(<$ty>::from_le_bytes(self.read_array()?))
		}

		#[doc = concat!("Read `count` consecutive little-endian `", stringify!($ty), "` values.")]
		pub fn $many(&mut self, count: usize) -> Result<Vec<$ty>> {
			const WIDTH: usize = std::mem::size_of::<$ty>();
			let need = count.checked_mul(WIDTH).ok_or(EdmError::UnexpectedEof {
				at: self.pos,
				need: usize::MAX,
				rem: self.remaining(),
			})?;
			let raw = self.read_exact(need)?;
			Ok(raw
				.chunks_exact(WIDTH)
				.map(|chunk| {
					let mut buf = [0_u8; WIDTH];
					buf.copy_from_slice(chunk);
					<$ty>::from_le_bytes(buf)
				})
				.collect())
		}
	};
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(EdmError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read a fixed-size byte array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	read_le!(read_u8, read_u8s, u8);
	read_le!(read_i8, read_i8s, i8);
	read_le!(read_u16_le, read_u16s_le, u16);
	read_le!(read_i16_le, read_i16s_le, i16);
	read_le!(read_u32_le, read_u32s_le, u32);
	read_le!(read_i32_le, read_i32s_le, i32);
	read_le!(read_f32_le, read_f32s_le, f32);
	read_le!(read_f64_le, read_f64s_le, f64);

	/// Read a `u32` byte length followed by that many raw bytes.
	pub fn read_blob(&mut self) -> Result<&'a [u8]> {
		let len = self.read_u32_le()? as usize;
		self.read_exact(len)
	}

	/// Read a `u32` byte length followed by that many code-page bytes.
	pub fn read_string(&mut self) -> Result<String> {
		let len = self.read_u32_le()? as usize;
		let start = self.pos;
		let raw = self.read_exact(len)?;
		raw.iter()
			.enumerate()
			.map(|(idx, byte)| codepage::decode_byte(*byte).ok_or(EdmError::Undecodable { at: start + idx, byte: *byte }))
			.collect()
	}

	/// Consume `expected.len()` bytes and fail unless they match exactly.
	pub fn expect_constant(&mut self, expected: &[u8]) -> Result<()> {
		let at = self.pos;
		let found = self.read_exact(expected.len())?;
		if found != expected {
			return Err(EdmError::ConstantMismatch {
				at,
				expected: expected.to_vec(),
				found: found.to_vec(),
			});
		}
		Ok(())
	}
}
