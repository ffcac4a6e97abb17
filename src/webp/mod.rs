//! RIFF container walking for WebP buffers.
//!
//! A WebP file is a RIFF envelope whose dimensions live in the first
//! dimension-bearing chunk: `VP8X` (extended), `VP8 ` (lossy) or `VP8L`
//! (lossless), each with its own field layout.

mod parser;

pub use parser::{RiffChunkIter, WebpParser, WebpProbe};

pub const RIFF_MAGIC: [u8; 4] = *b"RIFF";

pub const WEBP_FORM: [u8; 4] = *b"WEBP";

pub const VP8X: [u8; 4] = *b"VP8X";

/// The trailing space is part of the tag; it is what distinguishes the
/// lossy bitstream from `VP8X` and `VP8L`.
pub const VP8: [u8; 4] = *b"VP8 ";

pub const VP8L: [u8; 4] = *b"VP8L";

/// Outer envelope: magic, declared size, form tag.
pub const RIFF_HEADER_LEN: usize = 12;

/// Per-chunk header: 4-byte tag plus little-endian payload length.
pub const CHUNK_HEADER_LEN: usize = 8;

/// Bytes needed from the chunk start to reach the last VP8X canvas byte.
pub const VP8X_MIN_LEN: usize = 18;

/// Bytes needed from the chunk start to reach the last lossy dimension byte.
pub const VP8_MIN_LEN: usize = 18;

/// Bytes needed from the chunk start to reach the last packed VP8L byte.
pub const VP8L_MIN_LEN: usize = 13;

/// Lossy dimensions occupy the low 14 bits of each 16-bit field; the top
/// two bits are upsampling scale.
pub const VP8_DIM_MASK: u32 = 0x3FFF;

/// VP8L packs two 14-bit minus-one values into chunk bytes 9..=12:
/// width spans byte 9 and the low 6 bits of byte 10, height spans the top
/// 2 bits of byte 10, byte 11 and the low 4 bits of byte 12.
pub const VP8L_WIDTH_HIGH_MASK: u8 = 0b0011_1111;
pub const VP8L_WIDTH_HIGH_SHIFT: u32 = 8;
pub const VP8L_HEIGHT_LOW_MASK: u8 = 0b1100_0000;
pub const VP8L_HEIGHT_LOW_SHIFT: u32 = 6;
pub const VP8L_HEIGHT_MID_SHIFT: u32 = 2;
pub const VP8L_HEIGHT_HIGH_MASK: u8 = 0b0000_1111;
pub const VP8L_HEIGHT_HIGH_SHIFT: u32 = 10;

/// Decode the VP8X canvas fields: two 24-bit little-endian values storing
/// width minus one and height minus one.
#[inline]
#[must_use]
pub fn vp8x_dimensions(fields: &[u8; 6]) -> (u32, u32) {
    let width =
        u32::from(fields[0]) | (u32::from(fields[1]) << 8) | (u32::from(fields[2]) << 16);
    let height =
        u32::from(fields[3]) | (u32::from(fields[4]) << 8) | (u32::from(fields[5]) << 16);
    (width + 1, height + 1)
}

/// Decode the lossy frame dimensions: two little-endian 16-bit fields with
/// the scale bits masked off.
#[inline]
#[must_use]
pub fn vp8_dimensions(fields: &[u8; 4]) -> (u32, u32) {
    let width = u32::from(u16::from_le_bytes([fields[0], fields[1]])) & VP8_DIM_MASK;
    let height = u32::from(u16::from_le_bytes([fields[2], fields[3]])) & VP8_DIM_MASK;
    (width, height)
}

/// Decode the lossless dimensions from chunk bytes 9..=12.
#[inline]
#[must_use]
pub fn vp8l_dimensions(fields: &[u8; 4]) -> (u32, u32) {
    let width = u32::from(fields[0])
        | (u32::from(fields[1] & VP8L_WIDTH_HIGH_MASK) << VP8L_WIDTH_HIGH_SHIFT);
    let height = (u32::from(fields[1] & VP8L_HEIGHT_LOW_MASK) >> VP8L_HEIGHT_LOW_SHIFT)
        | (u32::from(fields[2]) << VP8L_HEIGHT_MID_SHIFT)
        | (u32::from(fields[3] & VP8L_HEIGHT_HIGH_MASK) << VP8L_HEIGHT_HIGH_SHIFT);
    (width + 1, height + 1)
}
