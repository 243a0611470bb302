use indexmap::IndexMap;
use serde::Serialize;

use crate::edm::decode::Decoder;
use crate::edm::registry::{Record, TypeName, read_named_type};
use crate::edm::writer::Writer;
use crate::edm::{EdmError, Result};

/// Order-preserving `string -> u32` table. Later duplicates overwrite in place.
pub type IndexTable = IndexMap<String, u32>;

/// Order-preserving property bag keyed by property name.
pub type PropertyList = IndexMap<String, PropertyValue>;

/// Element type carried by a property record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueKind {
	/// `float`
	Float,
	/// `unsigned int`
	UInt,
	/// `osg::Vec2f`
	Vec2f,
	/// `osg::Vec3f`
	Vec3f,
	/// `osg::Vec4f`
	Vec4f,
}

impl ValueKind {
	/// Every kind, in type-table order.
	pub const ALL: [Self; 5] = [Self::Float, Self::UInt, Self::Vec2f, Self::Vec3f, Self::Vec4f];

	/// Type argument spelling used inside record type names.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Float => "float",
			Self::UInt => "unsigned int",
			Self::Vec2f => "osg::Vec2f",
			Self::Vec3f => "osg::Vec3f",
			Self::Vec4f => "osg::Vec4f",
		}
	}
}

/// One scalar or vector property value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Value {
	/// 32-bit float.
	Float(f32),
	/// 32-bit unsigned integer.
	UInt(u32),
	/// Two floats.
	Vec2f([f32; 2]),
	/// Three floats.
	Vec3f([f32; 3]),
	/// Four floats.
	Vec4f([f32; 4]),
}

impl Value {
	/// Kind tag of this value.
	pub fn kind(&self) -> ValueKind {
		match self {
			Self::Float(_) => ValueKind::Float,
			Self::UInt(_) => ValueKind::UInt,
			Self::Vec2f(_) => ValueKind::Vec2f,
			Self::Vec3f(_) => ValueKind::Vec3f,
			Self::Vec4f(_) => ValueKind::Vec4f,
		}
	}

	fn read(dec: &mut Decoder<'_>, kind: ValueKind) -> Result<Self> {
		Ok(match kind {
			ValueKind::Float => Self::Float(dec.read_f32_le()?),
			ValueKind::UInt => Self::UInt(dec.read_u32_le()?),
			ValueKind::Vec2f => Self::Vec2f([dec.read_f32_le()?, dec.read_f32_le()?]),
			ValueKind::Vec3f => Self::Vec3f([dec.read_f32_le()?, dec.read_f32_le()?, dec.read_f32_le()?]),
			ValueKind::Vec4f => Self::Vec4f([dec.read_f32_le()?, dec.read_f32_le()?, dec.read_f32_le()?, dec.read_f32_le()?]),
		})
	}

	fn write(&self, w: &mut Writer) {
		match self {
			Self::Float(value) => w.write_f32_le(*value),
			Self::UInt(value) => w.write_u32_le(*value),
			Self::Vec2f(value) => w.write_f32s_le(value),
			Self::Vec3f(value) => w.write_f32s_le(value),
			Self::Vec4f(value) => w.write_f32s_le(value),
		}
	}
}

/// Keyframe of an animated property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Key {
	/// Key position on the argument axis.
	pub frame: f64,
	/// Value at `frame`.
	pub value: Value,
}

/// Payload of a property record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PropertyValue {
	/// `model::Property<T>`: a fixed value.
	Constant(Value),
	/// `model::AnimatedProperty<T>`: keys driven by an argument.
	Animated {
		/// Element type of every key.
		kind: ValueKind,
		/// Driving argument id.
		argument: u32,
		/// Keys in stream order.
		keys: Vec<Key>,
	},
}

impl PropertyValue {
	/// Record type that encodes this value.
	pub fn type_name(&self) -> TypeName {
		match self {
			Self::Constant(value) => TypeName::Property(value.kind()),
			Self::Animated { kind, .. } => TypeName::AnimatedProperty(*kind),
		}
	}
}

/// Named property record as it appears in a property list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
	/// Property name.
	pub name: String,
	/// Property payload.
	pub value: PropertyValue,
}

impl Property {
	/// Read the payload of a `model::Property<T>` record.
	pub fn read_constant(dec: &mut Decoder<'_>, kind: ValueKind) -> Result<Self> {
		let name = dec.read_string()?;
		let value = Value::read(dec, kind)?;
		Ok(Self {
			name,
			value: PropertyValue::Constant(value),
		})
	}

	/// Read the payload of a `model::AnimatedProperty<T>` record.
	pub fn read_animated(dec: &mut Decoder<'_>, kind: ValueKind) -> Result<Self> {
		let name = dec.read_string()?;
		let argument = dec.read_u32_le()?;
		let keys = dec.read_list(|dec| {
			Ok(Key {
				frame: dec.read_f64_le()?,
				value: Value::read(dec, kind)?,
			})
		})?;
		Ok(Self {
			name,
			value: PropertyValue::Animated { kind, argument, keys },
		})
	}

	/// Write the record payload, without its type name.
	pub fn write(&self, w: &mut Writer) -> Result<()> {
		write_property_body(w, &self.name, &self.value)
	}
}

fn write_property_body(w: &mut Writer, name: &str, value: &PropertyValue) -> Result<()> {
	w.write_string(name)?;
	match value {
		PropertyValue::Constant(value) => value.write(w),
		PropertyValue::Animated { kind, argument, keys } => {
			w.write_u32_le(*argument);
			w.write_list(keys, |w, key| {
				if key.value.kind() != *kind {
					return Err(EdmError::PropertyKindMismatch {
						name: name.to_owned(),
						expected: kind.as_str(),
						found: key.value.kind().as_str(),
					});
				}
				w.write_f64_le(key.frame);
				key.value.write(w);
				Ok(())
			})?;
		}
	}
	Ok(())
}

/// Read a count-prefixed `(string, u32)` table.
pub fn read_string_uint_dict(dec: &mut Decoder<'_>, table: &'static str) -> Result<IndexTable> {
	let count = dec.read_count()?;
	let mut out = IndexTable::with_capacity(dec.capacity_for::<(String, u32)>(count));
	for _ in 0..count {
		let at = dec.pos();
		let key = dec.read_string()?;
		let value = dec.read_u32_le()?;
		if out.insert(key.clone(), value).is_some() {
			dec.note_duplicate(at, table, key);
		}
	}
	Ok(out)
}

/// Write a `(string, u32)` table.
pub fn write_string_uint_dict(w: &mut Writer, table: &IndexTable) -> Result<()> {
	w.write_len(table.len())?;
	for (key, value) in table {
		w.write_string(key)?;
		w.write_u32_le(*value);
	}
	Ok(())
}

/// Read a count-prefixed list of property records into a name-keyed bag.
pub fn read_property_list(dec: &mut Decoder<'_>) -> Result<PropertyList> {
	let count = dec.read_count()?;
	let mut out = PropertyList::with_capacity(dec.capacity_for::<(String, PropertyValue)>(count));
	for _ in 0..count {
		let at = dec.pos();
		let property = match read_named_type(dec)? {
			Record::Property(property) => property,
			other => {
				return Err(EdmError::UnexpectedRecord {
					at,
					expected: "property",
					found: other.type_name().as_str(),
				});
			}
		};
		if out.insert(property.name.clone(), property.value).is_some() {
			dec.note_duplicate(at, "properties", property.name);
		}
	}
	Ok(out)
}

/// Write a property bag as typed records.
pub fn write_property_list(w: &mut Writer, list: &PropertyList) -> Result<()> {
	w.write_len(list.len())?;
	for (name, value) in list {
		w.write_type_name(value.type_name().as_str())?;
		write_property_body(w, name, value)?;
	}
	Ok(())
}

#[cfg(test)]
mod tests;
