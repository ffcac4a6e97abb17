use crate::error::{ProbeError, Result};
use crate::probe::FormatProbe;
use crate::types::{ImageSize, ImageType};

/// Common prefix of the `GIF87a` and `GIF89a` version signatures.
pub const GIF_MAGIC: [u8; 4] = *b"GIF8";

/// Signature plus the logical screen descriptor's dimension fields.
pub const MIN_GIF_PROBE: usize = 10;

/// Read the logical screen size: little-endian 16-bit fields at offsets
/// 6 and 8.
pub fn dimensions(data: &[u8]) -> Result<ImageSize> {
    if data.len() < MIN_GIF_PROBE {
        return Err(ProbeError::InsufficientData);
    }

    let width = u32::from(u16::from_le_bytes([data[6], data[7]]));
    let height = u32::from(u16::from_le_bytes([data[8], data[9]]));

    Ok(ImageSize { width, height })
}

pub struct GifProbe;

impl FormatProbe for GifProbe {
    fn image_type(&self) -> ImageType {
        ImageType::Gif
    }

    fn detect(&self, buffer: &[u8]) -> bool {
        buffer.starts_with(&GIF_MAGIC)
    }

    fn dimensions(&self, buffer: &[u8]) -> Result<ImageSize> {
        dimensions(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_gif(width: u16, height: u16) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"GIF89a");
        data.extend_from_slice(&width.to_le_bytes());
        data.extend_from_slice(&height.to_le_bytes());
        data.extend_from_slice(&[0x91, 0x00, 0x00]);
        data
    }

    #[test]
    fn test_logical_screen_dimensions() {
        let size = dimensions(&minimal_gif(320, 240)).unwrap();
        assert_eq!((size.width, size.height), (320, 240));
    }

    #[test]
    fn test_rejects_short_descriptor() {
        let data = minimal_gif(320, 240);
        assert!(matches!(
            dimensions(&data[..9]),
            Err(ProbeError::InsufficientData)
        ));
    }

    #[test]
    fn test_detect_accepts_both_versions() {
        let probe = GifProbe;
        assert!(probe.detect(b"GIF89a\x00\x00\x00\x00"));
        assert!(probe.detect(b"GIF87a\x00\x00\x00\x00"));
        assert!(!probe.detect(b"GIF\x00"));
    }
}
