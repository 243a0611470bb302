use std::ops::{Deref, DerefMut};

use serde::Serialize;

use crate::edm::bytes::Cursor;
use crate::edm::{EdmError, Result};

/// Most bytes reserved up front for one decoded list.
pub const PREALLOC_BYTES: usize = 64 * 1024;

/// Behavior switches and limits for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Fail on a non-zero `ArgScaleNode` trailer instead of keeping it with a warning.
	pub strict_scale_trailer: bool,
	/// Report duplicate keys in index tables, property lists and materials.
	pub warn_on_duplicate_keys: bool,
	/// Maximum element count accepted from any list prefix.
	pub max_list_len: usize,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			strict_scale_trailer: true,
			warn_on_duplicate_keys: true,
			max_list_len: 1 << 24,
		}
	}
}

impl DecodeOptions {
	/// Preset that keeps unknown scale-node trailers rather than rejecting them.
	pub fn lenient() -> Self {
		Self {
			strict_scale_trailer: false,
			..Self::default()
		}
	}
}

/// Non-fatal findings collected during a decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DecodeWarning {
	/// Bytes remain after the expected end of the structure.
	TrailingData {
		/// Offset where the structure ended.
		at: usize,
		/// Unconsumed byte count.
		remaining: usize,
	},
	/// A key was seen twice; the later value replaced the earlier one.
	DuplicateKey {
		/// Offset of the repeated key.
		at: usize,
		/// Which table held the key.
		table: &'static str,
		/// Repeated key.
		key: String,
	},
	/// `ArgScaleNode` trailer held non-zero bytes and was kept verbatim.
	NonZeroScaleTrailer {
		/// Offset of the trailer.
		at: usize,
	},
}

/// Cursor plus decode options and the warnings gathered so far.
///
/// Derefs to [`Cursor`] so record readers call primitive reads directly.
pub struct Decoder<'a> {
	cursor: Cursor<'a>,
	options: DecodeOptions,
	warnings: Vec<DecodeWarning>,
}

impl<'a> Decoder<'a> {
	/// Create a decoder over `bytes`.
	pub fn new(bytes: &'a [u8], options: DecodeOptions) -> Self {
		Self {
			cursor: Cursor::new(bytes),
			options,
			warnings: Vec::new(),
		}
	}

	/// Active options.
	pub fn options(&self) -> &DecodeOptions {
		&self.options
	}

	/// Record a warning and emit it through `tracing`.
	pub fn warn(&mut self, warning: DecodeWarning) {
		match &warning {
			DecodeWarning::TrailingData { at, remaining } => {
				tracing::warn!(at, remaining, "edm parse ended with unconsumed data");
			}
			DecodeWarning::DuplicateKey { at, table, key } => {
				tracing::warn!(at, table, key = key.as_str(), "duplicate key, later value wins");
			}
			DecodeWarning::NonZeroScaleTrailer { at } => {
				tracing::warn!(at, "non-zero ArgScaleNode trailer kept verbatim");
			}
		}
		self.warnings.push(warning);
	}

	/// Note a repeated key if duplicate reporting is enabled.
	pub fn note_duplicate(&mut self, at: usize, table: &'static str, key: impl Into<String>) {
		if self.options.warn_on_duplicate_keys {
			self.warn(DecodeWarning::DuplicateKey { at, table, key: key.into() });
		}
	}

	/// Read a `u32` count prefix and check it against `max_list_len`.
	pub fn read_count(&mut self) -> Result<usize> {
		let at = self.cursor.pos();
		let count = self.cursor.read_u32_le()? as usize;
		if count > self.options.max_list_len {
			return Err(EdmError::ListTooLarge {
				at,
				count,
				max: self.options.max_list_len,
			});
		}
		Ok(count)
	}

	/// Pre-allocation length for `count` elements of `T`.
	///
	/// Bounded by the bytes left and by [`PREALLOC_BYTES`]; larger lists grow as they are read.
	pub fn capacity_for<T>(&self, count: usize) -> usize {
		let budget = PREALLOC_BYTES / std::mem::size_of::<T>().max(1);
		count.min(self.cursor.remaining()).min(budget)
	}

	/// Read a `u32` count followed by that many elements through `read_item`.
	pub fn read_list<T>(&mut self, mut read_item: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
		let count = self.read_count()?;
		let mut items = Vec::with_capacity(self.capacity_for::<T>(count));
		for _ in 0..count {
			items.push(read_item(self)?);
		}
		Ok(items)
	}

	/// Finish decoding and hand back the collected warnings.
	pub fn into_warnings(self) -> Vec<DecodeWarning> {
		self.warnings
	}
}

impl<'a> Deref for Decoder<'a> {
	type Target = Cursor<'a>;

	fn deref(&self) -> &Self::Target {
		&self.cursor
	}
}

impl DerefMut for Decoder<'_> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.cursor
	}
}
