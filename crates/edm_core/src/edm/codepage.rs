//! Windows-1251, the single-byte code page used for every EDM string.

/// Upper half of the code page, `0x80..=0xFF`. `None` marks the one unassigned byte.
const HIGH: [Option<char>; 128] = {
	let mut table = [None; 128];
	let punct: [(usize, char); 63] = [
		(0x80, '\u{0402}'),
		(0x81, '\u{0403}'),
		(0x82, '\u{201A}'),
		(0x83, '\u{0453}'),
		(0x84, '\u{201E}'),
		(0x85, '\u{2026}'),
		(0x86, '\u{2020}'),
		(0x87, '\u{2021}'),
		(0x88, '\u{20AC}'),
		(0x89, '\u{2030}'),
		(0x8A, '\u{0409}'),
		(0x8B, '\u{2039}'),
		(0x8C, '\u{040A}'),
		(0x8D, '\u{040C}'),
		(0x8E, '\u{040B}'),
		(0x8F, '\u{040F}'),
		(0x90, '\u{0452}'),
		(0x91, '\u{2018}'),
		(0x92, '\u{2019}'),
		(0x93, '\u{201C}'),
		(0x94, '\u{201D}'),
		(0x95, '\u{2022}'),
		(0x96, '\u{2013}'),
		(0x97, '\u{2014}'),
		(0x99, '\u{2122}'),
		(0x9A, '\u{0459}'),
		(0x9B, '\u{203A}'),
		(0x9C, '\u{045A}'),
		(0x9D, '\u{045C}'),
		(0x9E, '\u{045B}'),
		(0x9F, '\u{045F}'),
		(0xA0, '\u{00A0}'),
		(0xA1, '\u{040E}'),
		(0xA2, '\u{045E}'),
		(0xA3, '\u{0408}'),
		(0xA4, '\u{00A4}'),
		(0xA5, '\u{0490}'),
		(0xA6, '\u{00A6}'),
		(0xA7, '\u{00A7}'),
		(0xA8, '\u{0401}'),
		(0xA9, '\u{00A9}'),
		(0xAA, '\u{0404}'),
		(0xAB, '\u{00AB}'),
		(0xAC, '\u{00AC}'),
		(0xAD, '\u{00AD}'),
		(0xAE, '\u{00AE}'),
		(0xAF, '\u{0407}'),
		(0xB0, '\u{00B0}'),
		(0xB1, '\u{00B1}'),
		(0xB2, '\u{0406}'),
		(0xB3, '\u{0456}'),
		(0xB4, '\u{0491}'),
		(0xB5, '\u{00B5}'),
		(0xB6, '\u{00B6}'),
		(0xB7, '\u{00B7}'),
		(0xB8, '\u{0451}'),
		(0xB9, '\u{2116}'),
		(0xBA, '\u{0454}'),
		(0xBB, '\u{00BB}'),
		(0xBC, '\u{0458}'),
		(0xBD, '\u{0405}'),
		(0xBE, '\u{0455}'),
		(0xBF, '\u{0457}'),
	];
	let mut i = 0;
	while i < punct.len() {
		let (byte, ch) = punct[i];
		table[byte - 0x80] = Some(ch);
		i += 1;
	}
	// 0xC0..=0xFF is the contiguous Cyrillic block U+0410..=U+044F.
	let mut byte: usize = 0xC0;
	while byte <= 0xFF {
		table[byte - 0x80] = char::from_u32(0x0410 + (byte as u32 - 0xC0));
		byte += 1;
	}
	table
};

/// Decode one byte, `None` if the byte is unassigned.
pub fn decode_byte(byte: u8) -> Option<char> {
	if byte < 0x80 {
		Some(char::from(byte))
	} else {
		HIGH[usize::from(byte - 0x80)]
	}
}

/// Encode one character, `None` if the code page has no slot for it.
pub fn encode_char(ch: char) -> Option<u8> {
	if ch.is_ascii() {
		return Some(ch as u8);
	}
	HIGH.iter().position(|slot| *slot == Some(ch)).map(|idx| 0x80 + idx as u8)
}
