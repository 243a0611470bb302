use indexmap::IndexMap;

use crate::edm::codepage;
use crate::edm::{EdmError, Result};

/// Per-record-type emission counts, in first-written order.
pub type TypeLog = IndexMap<&'static str, usize>;

/// Growable little-endian byte sink, the mirror image of [`crate::edm::Cursor`].
#[derive(Debug, Default)]
pub struct Writer {
	buf: Vec<u8>,
	type_log: TypeLog,
}

macro_rules! write_le {
	($name:ident, $many:ident, $ty:ty) => {
		#[doc = concat!("Write a little-endian `", stringify!($ty), "`.")]
		pub fn $name(&mut self, value: $ty) {
			self.buf.extend_from_slice(&value.to_le_bytes());
		}

		#[doc = concat!("Write consecutive little-endian `", stringify!($ty), "` values without a count.")]
		pub fn $many(&mut self, values: &[$ty]) {
			self.buf.reserve(values.len() * std::mem::size_of::<$ty>());
			for value in values {
				self.buf.extend_from_slice(&value.to_le_bytes());
			}
		}
	};
}

impl Writer {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Bytes written so far.
	pub fn len(&self) -> usize {
		self.buf.len()
	}

	/// Whether nothing has been written yet.
	pub fn is_empty(&self) -> bool {
		self.buf.is_empty()
	}

	/// Write raw bytes verbatim.
	pub fn write_bytes(&mut self, bytes: &[u8]) {
		self.buf.extend_from_slice(bytes);
	}

	write_le!(write_u8, write_u8s, u8);
	write_le!(write_i8, write_i8s, i8);
	write_le!(write_u16_le, write_u16s_le, u16);
	write_le!(write_i16_le, write_i16s_le, i16);
	write_le!(write_u32_le, write_u32s_le, u32);
	write_le!(write_i32_le, write_i32s_le, i32);
	write_le!(write_f32_le, write_f32s_le, f32);
	write_le!(write_f64_le, write_f64s_le, f64);

	/// Write a collection length as a `u32` prefix.
	pub fn write_len(&mut self, len: usize) -> Result<()> {
		let len = u32::try_from(len).map_err(|_| EdmError::LengthOverflow { len })?;
		self.write_u32_le(len);
		Ok(())
	}

	/// Write a `u32` byte length followed by the raw bytes.
	pub fn write_blob(&mut self, bytes: &[u8]) -> Result<()> {
		self.write_len(bytes.len())?;
		self.write_bytes(bytes);
		Ok(())
	}

	/// Write a `u32` byte length followed by the code-page encoded text.
	pub fn write_string(&mut self, value: &str) -> Result<()> {
		let encoded = value
			.chars()
			.map(|ch| codepage::encode_char(ch).ok_or(EdmError::Unencodable { ch }))
			.collect::<Result<Vec<u8>>>()?;
		self.write_len(encoded.len())?;
		self.write_bytes(&encoded);
		Ok(())
	}

	/// Write a `u32` count followed by each element through `write_item`.
	pub fn write_list<T>(&mut self, items: &[T], mut write_item: impl FnMut(&mut Self, &T) -> Result<()>) -> Result<()> {
		self.write_len(items.len())?;
		for item in items {
			write_item(self, item)?;
		}
		Ok(())
	}

	/// Write a record type name and count it in the type log.
	pub fn write_type_name(&mut self, name: &'static str) -> Result<()> {
		self.write_string(name)?;
		*self.type_log.entry(name).or_insert(0) += 1;
		Ok(())
	}

	/// Counts of each record type name written so far.
	pub fn type_log(&self) -> &TypeLog {
		&self.type_log
	}

	/// Finish writing and return the bytes with the type log.
	pub fn finish(self) -> (Vec<u8>, TypeLog) {
		(self.buf, self.type_log)
	}
}
