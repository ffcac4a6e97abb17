use crate::error::{ProbeError, Result};
use crate::probe::FormatProbe;
use crate::types::{ImageSize, ImageType};

pub const BMP_MAGIC: [u8; 2] = [0x42, 0x4D];

/// File header (14), DIB size field (4), then the widest dimension pair (8).
pub const MIN_BMP_PROBE: usize = 26;

/// BITMAPCOREHEADER, the only DIB variant with 16-bit dimensions.
const CORE_HEADER_SIZE: u32 = 12;

/// Read the DIB header dimensions. Modern headers store them as signed
/// 32-bit values; a negative height marks a top-down bitmap and its
/// magnitude is the pixel height.
pub fn dimensions(data: &[u8]) -> Result<ImageSize> {
    if data.len() < MIN_BMP_PROBE {
        return Err(ProbeError::InsufficientData);
    }

    let dib_size = u32::from_le_bytes([data[14], data[15], data[16], data[17]]);

    if dib_size == CORE_HEADER_SIZE {
        let width = u32::from(u16::from_le_bytes([data[18], data[19]]));
        let height = u32::from(u16::from_le_bytes([data[20], data[21]]));
        return Ok(ImageSize { width, height });
    }

    let width = i32::from_le_bytes([data[18], data[19], data[20], data[21]]);
    let height = i32::from_le_bytes([data[22], data[23], data[24], data[25]]);

    // Width has no top-down convention; a non-positive value is garbage.
    if width <= 0 {
        return Err(ProbeError::InsufficientData);
    }

    Ok(ImageSize {
        width: width.unsigned_abs(),
        height: height.unsigned_abs(),
    })
}

pub struct BmpProbe;

impl FormatProbe for BmpProbe {
    fn image_type(&self) -> ImageType {
        ImageType::Bmp
    }

    fn detect(&self, buffer: &[u8]) -> bool {
        buffer.starts_with(&BMP_MAGIC)
    }

    fn dimensions(&self, buffer: &[u8]) -> Result<ImageSize> {
        dimensions(buffer)
    }
}
