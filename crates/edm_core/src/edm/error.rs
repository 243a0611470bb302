use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, EdmError>;

/// Errors produced while decoding or encoding `.edm` data.
///
/// Every decode failure is fatal for the whole file: the stream carries no
/// per-record length, so once a read goes wrong the cursor can not be resynced.
#[derive(Debug, Error)]
pub enum EdmError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Unsupported container version.
	#[error("unsupported edm version {found} (expected {expected})")]
	VersionMismatch {
		/// The only version this codec reads.
		expected: u16,
		/// Version found in the header.
		found: u16,
	},
	/// A literal byte guard did not match.
	#[error("constant mismatch at {at}: expected {expected:02x?}, found {found:02x?}")]
	ConstantMismatch {
		/// Offset of the guard.
		at: usize,
		/// Bytes the format requires.
		expected: Vec<u8>,
		/// Bytes present in the stream.
		found: Vec<u8>,
	},
	/// Type name is not part of the closed record set.
	#[error("unknown record type {name:?} at {at}")]
	UnknownType {
		/// Offset of the type-name string.
		at: usize,
		/// Decoded type name.
		name: String,
	},
	/// A known record type showed up where another kind was required.
	#[error("unexpected record at {at}: expected {expected}, found {found}")]
	UnexpectedRecord {
		/// Offset of the type-name string.
		at: usize,
		/// Required record kind.
		expected: &'static str,
		/// Record type name actually present.
		found: &'static str,
	},
	/// Material entry name outside the recognized key set.
	#[error("unrecognized material key {key:?} at {at}")]
	UnrecognizedMaterialKey {
		/// Offset of the key string.
		at: usize,
		/// Decoded key.
		key: String,
	},
	/// Sentinel-terminated int section was not 1 or 2 entries long.
	#[error("malformed int section at {at}: {len} values before sentinel")]
	MalformedIntSection {
		/// Offset of the section start.
		at: usize,
		/// Number of values read before giving up.
		len: usize,
	},
	/// Index buffer discriminant byte outside `{0, 1}`.
	#[error("unsupported index width discriminant {discriminant} at {at}")]
	UnsupportedIndexWidth {
		/// Offset of the discriminant byte.
		at: usize,
		/// Discriminant value.
		discriminant: u8,
	},
	/// Vertex format blob too short to hold the known channel counts.
	#[error("malformed vertex format at {at}: {len} channel bytes")]
	MalformedVertexFormat {
		/// Offset of the channel blob.
		at: usize,
		/// Blob length.
		len: usize,
	},
	/// Vertex format reserved channel byte was non-zero.
	#[error("vertex format reserved byte {index} is {value} at {at}")]
	VertexFormatReserved {
		/// Offset of the channel blob.
		at: usize,
		/// Index of the offending byte inside the blob.
		index: usize,
		/// Offending value.
		value: u8,
	},
	/// Flat vertex data can not be grouped by its stride.
	#[error("malformed vertex buffer at {at}: {len} floats with stride {stride}")]
	MalformedVertexBuffer {
		/// Offset of the vertex data.
		at: usize,
		/// Number of floats.
		len: usize,
		/// Declared stride.
		stride: usize,
	},
	/// Flat vertex data handed to the model can not be grouped by its stride.
	#[error("{len} floats can not be grouped by stride {stride}")]
	RaggedVertexData {
		/// Number of floats.
		len: usize,
		/// Requested stride.
		stride: usize,
	},
	/// Top-level object lists were not exactly `CONNECTORS` and `RENDER_NODES`.
	#[error("object list mismatch at {at}: found {found:?}")]
	ObjectListMismatch {
		/// Offset of the list block.
		at: usize,
		/// Names seen, in stream order.
		found: Vec<String>,
	},
	/// Count prefix exceeded the configured limit.
	#[error("list too large at {at}: count={count}, max={max}")]
	ListTooLarge {
		/// Offset of the count prefix.
		at: usize,
		/// Declared element count.
		count: usize,
		/// Configured ceiling.
		max: usize,
	},
	/// String byte with no mapping in the code page.
	#[error("undecodable string byte 0x{byte:02x} at {at}")]
	Undecodable {
		/// Offset of the byte.
		at: usize,
		/// Byte value.
		byte: u8,
	},
	/// Character with no mapping in the code page.
	#[error("character {ch:?} can not be encoded")]
	Unencodable {
		/// Offending character.
		ch: char,
	},
	/// Raw samples do not match `sample_count * width`.
	#[error("argument {argument}: expected {expected} sample bytes, found {found}")]
	SampleLengthMismatch {
		/// Argument id of the stream.
		argument: u32,
		/// Byte length implied by the count.
		expected: usize,
		/// Byte length present.
		found: usize,
	},
	/// Animated property key holds a value of another kind than the property.
	#[error("property {name:?}: key value kind {found} does not match {expected}")]
	PropertyKindMismatch {
		/// Property name.
		name: String,
		/// Kind declared by the property type.
		expected: &'static str,
		/// Kind of the offending key.
		found: &'static str,
	},
	/// Length does not fit the u32 prefix.
	#[error("length {len} does not fit a u32 prefix")]
	LengthOverflow {
		/// Offending length.
		len: usize,
	},
}
