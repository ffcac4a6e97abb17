use crate::error::{ProbeError, Result};
use crate::probe::FormatProbe;
use crate::types::{ImageSize, ImageType};

pub const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

const SOS: u8 = 0xDA;
const EOI: u8 = 0xD9;
const RST0: u8 = 0xD0;
const RST7: u8 = 0xD7;

/// 0xC4, 0xC8 and 0xCC are DHT, JPG and DAC, not frame headers.
#[inline]
const fn is_sof_marker(marker: u8) -> bool {
    matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF)
}

#[inline]
const fn is_standalone_marker(marker: u8) -> bool {
    matches!(marker, 0xD8 | 0x01) || (marker >= RST0 && marker <= RST7)
}

/// Walk the marker segments until a start-of-frame carries the dimensions.
///
/// Stops at SOS: the frame header precedes the entropy-coded data, so a
/// prefix with no SOF before SOS has nothing usable.
pub fn dimensions(data: &[u8]) -> Result<ImageSize> {
    if data.len() < 4 {
        return Err(ProbeError::InsufficientData);
    }
    if data[0] != 0xFF || data[1] != 0xD8 {
        return Err(ProbeError::InsufficientData);
    }

    let mut pos: usize = 2;
    while pos < data.len() - 1 {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }
        while pos < data.len() - 1 && data[pos + 1] == 0xFF {
            pos += 1;
        }
        if pos >= data.len() - 1 {
            break;
        }

        let marker = data[pos + 1];
        if marker == 0x00 {
            pos += 2;
            continue;
        }
        if marker == SOS || marker == EOI {
            break;
        }
        if is_standalone_marker(marker) {
            pos += 2;
            continue;
        }

        if pos + 3 >= data.len() {
            break;
        }
        let length = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if length < 2 {
            break;
        }

        if is_sof_marker(marker) {
            // Segment payload: precision, then height and width, big-endian
            if length < 7 || pos + 9 > data.len() {
                return Err(ProbeError::InsufficientData);
            }
            let height = u32::from(u16::from_be_bytes([data[pos + 5], data[pos + 6]]));
            let width = u32::from(u16::from_be_bytes([data[pos + 7], data[pos + 8]]));
            return Ok(ImageSize { width, height });
        }

        pos += 2 + length;
    }

    Err(ProbeError::InsufficientData)
}

pub struct JpegProbe;

impl FormatProbe for JpegProbe {
    fn image_type(&self) -> ImageType {
        ImageType::Jpeg
    }

    fn detect(&self, buffer: &[u8]) -> bool {
        buffer.starts_with(&JPEG_MAGIC)
    }

    fn dimensions(&self, buffer: &[u8]) -> Result<ImageSize> {
        dimensions(buffer)
    }
}
