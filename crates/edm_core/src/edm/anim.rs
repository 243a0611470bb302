//! Argument-indexed keyframe streams.
//!
//! A stream stores only its argument id, a sample count and raw sample bytes. The width
//! of one sample is not on the wire; it is fixed by the node kind that owns the stream,
//! so every read and write names the [`Sample`] type explicitly.

use serde::Serialize;

use crate::edm::bytes::Cursor;
use crate::edm::decode::Decoder;
use crate::edm::writer::Writer;
use crate::edm::{EdmError, Result};

/// Fixed-width sample layout stored in an [`ArgStream`].
pub trait Sample: Sized {
	/// Bytes per sample.
	const WIDTH: usize;

	/// Parse one sample.
	fn parse(cursor: &mut Cursor<'_>) -> Result<Self>;

	/// Serialize one sample.
	fn emit(&self, w: &mut Writer);
}

/// Rotation key: frame then a quaternion stored `x, y, z, w`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotationKey {
	/// Key position on the argument axis.
	pub frame: f64,
	/// Quaternion components in stored order.
	pub value: [f64; 4],
}

/// Position key: frame then a translation vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionKey {
	/// Key position on the argument axis.
	pub frame: f64,
	/// Translation.
	pub value: [f64; 3],
}

/// Interval of the argument axis in which the owner is visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibilityRange {
	/// Interval start.
	pub start: f64,
	/// Interval end.
	pub end: f64,
}

impl Sample for RotationKey {
	const WIDTH: usize = 40;

	fn parse(cursor: &mut Cursor<'_>) -> Result<Self> {
		let frame = cursor.read_f64_le()?;
		let quat = cursor.read_f64s_le(4)?;
		Ok(Self {
			frame,
			value: [quat[0], quat[1], quat[2], quat[3]],
		})
	}

	fn emit(&self, w: &mut Writer) {
		w.write_f64_le(self.frame);
		w.write_f64s_le(&self.value);
	}
}

impl Sample for PositionKey {
	const WIDTH: usize = 32;

	fn parse(cursor: &mut Cursor<'_>) -> Result<Self> {
		let frame = cursor.read_f64_le()?;
		let pos = cursor.read_f64s_le(3)?;
		Ok(Self {
			frame,
			value: [pos[0], pos[1], pos[2]],
		})
	}

	fn emit(&self, w: &mut Writer) {
		w.write_f64_le(self.frame);
		w.write_f64s_le(&self.value);
	}
}

impl Sample for VisibilityRange {
	const WIDTH: usize = 16;

	fn parse(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			start: cursor.read_f64_le()?,
			end: cursor.read_f64_le()?,
		})
	}

	fn emit(&self, w: &mut Writer) {
		w.write_f64_le(self.start);
		w.write_f64_le(self.end);
	}
}

/// One `(argument, sample_count, raw samples)` stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgStream {
	/// Argument id driving this stream.
	pub argument: u32,
	/// Number of samples.
	pub sample_count: u32,
	/// `sample_count` samples of the owner's sample width, undecoded.
	pub samples: Vec<u8>,
}

impl ArgStream {
	/// Read one stream whose samples are `S::WIDTH` bytes wide.
	pub fn read<S: Sample>(dec: &mut Decoder<'_>) -> Result<Self> {
		let argument = dec.read_u32_le()?;
		let sample_count = dec.read_u32_le()?;
		let need = (sample_count as usize).checked_mul(S::WIDTH).ok_or(EdmError::UnexpectedEof {
			at: dec.pos(),
			need: usize::MAX,
			rem: dec.remaining(),
		})?;
		let samples = dec.read_exact(need)?.to_vec();
		Ok(Self {
			argument,
			sample_count,
			samples,
		})
	}

	/// Write the stream, checking the raw bytes against `S::WIDTH`.
	pub fn write<S: Sample>(&self, w: &mut Writer) -> Result<()> {
		let expected = self.sample_count as usize * S::WIDTH;
		if self.samples.len() != expected {
			return Err(EdmError::SampleLengthMismatch {
				argument: self.argument,
				expected,
				found: self.samples.len(),
			});
		}
		w.write_u32_le(self.argument);
		w.write_u32_le(self.sample_count);
		w.write_bytes(&self.samples);
		Ok(())
	}

	/// Build a stream from typed samples.
	pub fn from_samples<S: Sample>(argument: u32, samples: &[S]) -> Result<Self> {
		let sample_count = u32::try_from(samples.len()).map_err(|_| EdmError::LengthOverflow { len: samples.len() })?;
		let mut w = Writer::new();
		for sample in samples {
			sample.emit(&mut w);
		}
		let (samples, _) = w.finish();
		Ok(Self {
			argument,
			sample_count,
			samples,
		})
	}

	/// Decode the raw bytes as `S` samples.
	pub fn samples<S: Sample>(&self) -> Result<Vec<S>> {
		let expected = self.sample_count as usize * S::WIDTH;
		if self.samples.len() != expected {
			return Err(EdmError::SampleLengthMismatch {
				argument: self.argument,
				expected,
				found: self.samples.len(),
			});
		}
		let mut cursor = Cursor::new(&self.samples);
		(0..self.sample_count).map(|_| S::parse(&mut cursor)).collect()
	}
}

/// Read a count-prefixed list of streams with `S`-wide samples.
pub fn read_streams<S: Sample>(dec: &mut Decoder<'_>) -> Result<Vec<ArgStream>> {
	dec.read_list(ArgStream::read::<S>)
}

/// Write a count-prefixed list of streams with `S`-wide samples.
pub fn write_streams<S: Sample>(w: &mut Writer, streams: &[ArgStream]) -> Result<()> {
	w.write_list(streams, |w, stream| stream.write::<S>(w))
}
