use crate::error::{ProbeError, Result};
use crate::probe::FormatProbe;
use crate::types::{ImageSize, ImageType};

pub const TIFF_LE: [u8; 2] = *b"II";
pub const TIFF_BE: [u8; 2] = *b"MM";

const TIFF_MAGIC: u16 = 42;

const TAG_IMAGE_WIDTH: u16 = 0x0100;
const TAG_IMAGE_HEIGHT: u16 = 0x0101;

const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;

/// Byte order mark, magic and the offset of the first IFD.
const TIFF_HEADER_LEN: usize = 8;

const IFD_ENTRY_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endian {
    Little,
    Big,
}

impl Endian {
    fn read_u16(self, data: &[u8], offset: usize) -> Option<u16> {
        let end = offset.checked_add(2)?;
        if end > data.len() {
            return None;
        }
        let bytes = [data[offset], data[offset + 1]];
        Some(match self {
            Endian::Little => u16::from_le_bytes(bytes),
            Endian::Big => u16::from_be_bytes(bytes),
        })
    }

    fn read_u32(self, data: &[u8], offset: usize) -> Option<u32> {
        let end = offset.checked_add(4)?;
        if end > data.len() {
            return None;
        }
        let bytes = [
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ];
        Some(match self {
            Endian::Little => u32::from_le_bytes(bytes),
            Endian::Big => u32::from_be_bytes(bytes),
        })
    }
}

/// Walk the first IFD for the `ImageWidth` and `ImageLength` entries.
///
/// Only SHORT and LONG entries are honored; inline values occupy the first
/// bytes of the 4-byte value field in the file's own byte order.
pub fn dimensions(data: &[u8]) -> Result<ImageSize> {
    if data.len() < TIFF_HEADER_LEN {
        return Err(ProbeError::InsufficientData);
    }

    let endian = match [data[0], data[1]] {
        TIFF_LE => Endian::Little,
        TIFF_BE => Endian::Big,
        _ => return Err(ProbeError::InsufficientData),
    };

    if endian.read_u16(data, 2) != Some(TIFF_MAGIC) {
        return Err(ProbeError::InsufficientData);
    }

    let ifd_offset = endian
        .read_u32(data, 4)
        .ok_or(ProbeError::InsufficientData)? as usize;
    let count = endian
        .read_u16(data, ifd_offset)
        .ok_or(ProbeError::InsufficientData)? as usize;

    let mut width = None;
    let mut height = None;

    for i in 0..count {
        let entry = ifd_offset
            .checked_add(2 + i * IFD_ENTRY_LEN)
            .ok_or(ProbeError::InsufficientData)?;
        let tag = endian
            .read_u16(data, entry)
            .ok_or(ProbeError::InsufficientData)?;
        if tag != TAG_IMAGE_WIDTH && tag != TAG_IMAGE_HEIGHT {
            continue;
        }

        let field_type = endian
            .read_u16(data, entry + 2)
            .ok_or(ProbeError::InsufficientData)?;
        let value = match field_type {
            TYPE_SHORT => endian
                .read_u16(data, entry + 8)
                .map(u32::from)
                .ok_or(ProbeError::InsufficientData)?,
            TYPE_LONG => endian
                .read_u32(data, entry + 8)
                .ok_or(ProbeError::InsufficientData)?,
            _ => continue,
        };

        if tag == TAG_IMAGE_WIDTH {
            width = Some(value);
        } else {
            height = Some(value);
        }

        if let (Some(width), Some(height)) = (width, height) {
            return Ok(ImageSize { width, height });
        }
    }

    Err(ProbeError::InsufficientData)
}

pub struct TiffProbe;

impl FormatProbe for TiffProbe {
    fn image_type(&self) -> ImageType {
        ImageType::Tiff
    }

    /// Both the byte order mark and the magic are checked; `II`/`MM` alone
    /// matches too much plain text.
    fn detect(&self, buffer: &[u8]) -> bool {
        if buffer.len() < 4 {
            return false;
        }
        match [buffer[0], buffer[1]] {
            TIFF_LE => buffer[2] == 0x2A && buffer[3] == 0x00,
            TIFF_BE => buffer[2] == 0x00 && buffer[3] == 0x2A,
            _ => false,
        }
    }

    fn dimensions(&self, buffer: &[u8]) -> Result<ImageSize> {
        dimensions(buffer)
    }
}
