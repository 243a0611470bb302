use serde::{Serialize, Serializer};

use crate::edm::bytes::Cursor;
use crate::edm::writer::Writer;
use crate::edm::Result;

/// Fixed-size run of unidentified bytes, kept verbatim so it re-encodes exactly.
#[derive(Clone, PartialEq, Eq)]
pub struct Opaque<const N: usize>(pub [u8; N]);

impl<const N: usize> Opaque<N> {
	/// Block of `N` zero bytes.
	pub fn zeroed() -> Self {
		Self([0; N])
	}

	/// Read exactly `N` bytes.
	pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self(cursor.read_array()?))
	}

	/// Write the bytes back unchanged.
	pub fn write(&self, w: &mut Writer) {
		w.write_bytes(&self.0);
	}

	/// Whether every byte is zero.
	pub fn is_zeroed(&self) -> bool {
		self.0.iter().all(|byte| *byte == 0)
	}

	/// Raw bytes.
	pub fn as_bytes(&self) -> &[u8; N] {
		&self.0
	}
}

impl<const N: usize> Default for Opaque<N> {
	fn default() -> Self {
		Self::zeroed()
	}
}

impl<const N: usize> std::fmt::Debug for Opaque<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.is_zeroed() {
			write!(f, "Opaque<{N}>(zeroed)")
		} else {
			write!(f, "Opaque<{N}>({:02x?})", &self.0[..N.min(16)])
		}
	}
}

impl<const N: usize> Serialize for Opaque<N> {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.serialize_bytes(&self.0)
	}
}
