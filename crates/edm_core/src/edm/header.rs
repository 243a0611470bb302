use crate::edm::bytes::Cursor;
use crate::edm::writer::Writer;
use crate::edm::{EdmError, Result};

/// Parsed `.edm` file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdmHeader {
	/// Container version.
	pub version: u16,
}

impl EdmHeader {
	/// Leading file magic.
	pub const MAGIC: &'static [u8; 3] = b"EDM";
	/// The only supported container version.
	pub const VERSION: u16 = 8;
	/// Magic plus version.
	pub const SIZE: usize = 5;

	/// Parse magic and version; stops right after the version on a mismatch.
	pub fn parse(cursor: &mut Cursor<'_>) -> Result<Self> {
		cursor.expect_constant(Self::MAGIC)?;
		let version = cursor.read_u16_le()?;
		if version != Self::VERSION {
			return Err(EdmError::VersionMismatch {
				expected: Self::VERSION,
				found: version,
			});
		}
		Ok(Self { version })
	}

	/// Write magic and version.
	pub fn write(&self, w: &mut Writer) {
		w.write_bytes(Self::MAGIC);
		w.write_u16_le(self.version);
	}
}
