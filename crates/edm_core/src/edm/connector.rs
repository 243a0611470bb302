use serde::Serialize;

use crate::edm::Result;
use crate::edm::decode::Decoder;
use crate::edm::opaque::Opaque;
use crate::edm::registry::TypeName;
use crate::edm::writer::Writer;

/// Named attachment point (`model::Connector`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connector {
	/// Connector name.
	pub name: String,
	/// Unidentified payload following the name.
	pub data: Opaque<16>,
}

impl Connector {
	/// Read the record payload.
	pub fn read(dec: &mut Decoder<'_>) -> Result<Self> {
		let name = dec.read_string()?;
		let data = Opaque::read(dec)?;
		Ok(Self { name, data })
	}

	/// Write the record payload.
	pub fn write(&self, w: &mut Writer) -> Result<()> {
		w.write_string(&self.name)?;
		self.data.write(w);
		Ok(())
	}

	/// Write the type name and payload.
	pub fn write_named(&self, w: &mut Writer) -> Result<()> {
		w.write_type_name(TypeName::Connector.as_str())?;
		self.write(w)
	}
}
