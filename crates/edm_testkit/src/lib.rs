//! Shared test helpers for workspace crates.
//!
//! Streams are assembled by hand here, independently of the codec, so tests compare the
//! decoder against bytes it did not produce itself.

/// Little-endian byte stream builder.
#[derive(Debug, Default, Clone)]
pub struct ByteBuilder {
	buf: Vec<u8>,
}

impl ByteBuilder {
	/// Empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Current length.
	pub fn len(&self) -> usize {
		self.buf.len()
	}

	/// Whether nothing was written.
	pub fn is_empty(&self) -> bool {
		self.buf.is_empty()
	}

	/// Append raw bytes.
	pub fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
		self.buf.extend_from_slice(bytes);
		self
	}

	/// Append `n` copies of `byte`.
	pub fn fill(&mut self, byte: u8, n: usize) -> &mut Self {
		self.buf.resize(self.buf.len() + n, byte);
		self
	}

	/// Append `n` zero bytes.
	pub fn zeros(&mut self, n: usize) -> &mut Self {
		self.fill(0, n)
	}

	/// Append a `u8`.
	pub fn u8(&mut self, value: u8) -> &mut Self {
		self.bytes(&[value])
	}

	/// Append a `u16`.
	pub fn u16(&mut self, value: u16) -> &mut Self {
		self.bytes(&value.to_le_bytes())
	}

	/// Append a `u32`.
	pub fn u32(&mut self, value: u32) -> &mut Self {
		self.bytes(&value.to_le_bytes())
	}

	/// Append an `i32`.
	pub fn i32(&mut self, value: i32) -> &mut Self {
		self.bytes(&value.to_le_bytes())
	}

	/// Append an `f32`.
	pub fn f32(&mut self, value: f32) -> &mut Self {
		self.bytes(&value.to_le_bytes())
	}

	/// Append an `f64`.
	pub fn f64(&mut self, value: f64) -> &mut Self {
		self.bytes(&value.to_le_bytes())
	}

	/// Append a length-prefixed string; callers pass ASCII or pre-encoded bytes.
	pub fn string(&mut self, value: &[u8]) -> &mut Self {
		self.u32(value.len() as u32).bytes(value)
	}

	/// Clone out the bytes written so far.
	pub fn build(&self) -> Vec<u8> {
		self.buf.clone()
	}
}

/// Rotation sample width in bytes.
pub const ROTATION_WIDTH: usize = 40;
/// Position sample width in bytes.
pub const POSITION_WIDTH: usize = 32;
/// Visibility sample width in bytes.
pub const VISIBILITY_WIDTH: usize = 16;

/// Append an argument stream with `count` samples of `width` bytes filled with `fill`.
pub fn arg_stream(b: &mut ByteBuilder, argument: u32, count: u32, width: usize, fill: u8) {
	b.u32(argument).u32(count).fill(fill, count as usize * width);
}

/// Append a `model::Property<float>` record.
pub fn float_property(b: &mut ByteBuilder, name: &str, value: f32) {
	b.string(b"model::Property<float>").string(name.as_bytes()).f32(value);
}

/// Append a `model::Property<unsigned int>` record.
pub fn uint_property(b: &mut ByteBuilder, name: &str, value: u32) {
	b.string(b"model::Property<unsigned int>").string(name.as_bytes()).u32(value);
}

/// Append a vertex format entry payload with the given blob length.
pub fn vertex_format(b: &mut ByteBuilder, position: u8, normal: u8, texture: u8, len: usize) {
	let mut blob = vec![0_u8; len];
	blob[0] = position;
	blob[1] = normal;
	blob[4] = texture;
	b.u32(len as u32).bytes(&blob);
}

/// Append one texture binding.
pub fn texture(b: &mut ByteBuilder, name: &str) {
	b.bytes(&[0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]).string(name.as_bytes());
	b.u32(2).u32(2).u32(10).u32(6);
	for idx in 0..16 {
		b.f32(if idx % 5 == 0 { 1.0 } else { 0.0 });
	}
}

/// Append a material with every recognized key.
pub fn full_material(b: &mut ByteBuilder) {
	b.u32(11);
	b.string(b"NAME").string(b"hull");
	b.string(b"MATERIAL_NAME").string(b"def_material");
	b.string(b"BLENDING").u8(0);
	b.string(b"CULLING").u8(1);
	b.string(b"SHADOWS").u8(3);
	b.string(b"DEPTH_BIAS").u32(0);
	b.string(b"VERTEX_FORMAT");
	vertex_format(b, 4, 3, 2, 26);
	b.string(b"TEXTURE_COORDINATES_CHANNELS").fill(0xAB, 52);
	b.string(b"UNIFORMS").u32(2);
	float_property(b, "specPower", 12.5);
	uint_property(b, "diffuseShift", 3);
	b.string(b"ANIMATED_UNIFORMS").u32(1);
	b.string(b"model::AnimatedProperty<osg::Vec3f>").string(b"selfIlluminationColor").u32(7).u32(2);
	b.f64(0.0).f32(0.0).f32(0.0).f32(0.0);
	b.f64(1.0).f32(1.0).f32(0.5).f32(0.25);
	b.string(b"TEXTURES").u32(1);
	texture(b, "hull_diff");
}

/// Append a `model::RenderNode` record with three 9-lane vertices and one triangle.
pub fn render_node(b: &mut ByteBuilder, name: &str, index_discriminant: u8) {
	b.string(b"model::RenderNode").string(name.as_bytes());
	b.u32(0).u32(1).u32(2);
	b.u32(0);
	b.u32(2).u32(7).u32(u32::MAX).u32(1).u32(2).u32(u32::MAX);
	b.u32(3).u32(9);
	for idx in 0..27 {
		b.f32(idx as f32);
	}
	b.u8(index_discriminant).u32(3).u32(5);
	match index_discriminant {
		0 => {
			b.u8(0).u8(1).u8(2);
		}
		_ => {
			b.u16(0).u16(1).u16(2);
		}
	}
}

/// Append a `model::RootNode` record holding one node of every child kind.
pub fn root_node(b: &mut ByteBuilder) {
	b.string(b"model::RootNode").string(b"sample_model").u32(0);
	b.u32(2);
	float_property(b, "opacity", 0.5);
	uint_property(b, "lod", 2);
	b.fill(0x11, 145);
	b.u32(1);
	full_material(b);
	b.zeros(8);
	b.u32(7);

	b.string(b"model::Node").u32(0).u32(0).u32(0);

	b.string(b"model::TransformNode").u32(1).u32(2).u32(3);
	for idx in 0..16 {
		b.f64(if idx % 5 == 0 { 1.0 } else { 0.0 });
	}

	b.string(b"model::ArgRotationNode").string(b"rudder").fill(0x22, 248).u32(0);
	b.u32(1);
	arg_stream(b, 12, 2, ROTATION_WIDTH, 0);
	b.u32(0);

	b.string(b"model::ArgPositionNode").string(b"gear").fill(0x33, 248);
	b.u32(1);
	arg_stream(b, 13, 1, POSITION_WIDTH, 0);
	b.u32(4).u32(5);

	b.string(b"model::ArgScaleNode").string(b"scale").fill(0x44, 248).zeros(12);

	b.string(b"model::ArgAnimationNode").string(b"flap").fill(0x55, 248);
	b.u32(1);
	arg_stream(b, 14, 1, POSITION_WIDTH, 0);
	b.u32(2);
	arg_stream(b, 14, 1, ROTATION_WIDTH, 0);
	arg_stream(b, 15, 0, ROTATION_WIDTH, 0);
	b.u32(0);

	b.string(b"model::ArgVisibilityNode").string(b"lights").fill(0x66, 8);
	b.u32(1);
	b.u32(16).u32(1).f64(-1.0).f64(0.5);
}

/// Complete version 8 file: indexes, root, sentinel, reserved block, both object lists.
pub fn sample_file() -> Vec<u8> {
	let mut b = ByteBuilder::new();
	b.bytes(b"EDM").u16(8);
	b.u32(2).string(b"model::RootNode").u32(1).string(b"model::RenderNode").u32(1);
	b.u32(1).string(b"__gv_bytes_fvec4").u32(108);
	root_node(&mut b);
	b.i32(-1).fill(0x77, 1648);
	b.u32(2);
	b.string(b"CONNECTORS").u32(1);
	b.string(b"model::Connector").string(b"pnt_wing").fill(0x88, 16);
	b.string(b"RENDER_NODES").u32(1);
	render_node(&mut b, "hull_mesh", 1);
	b.build()
}
