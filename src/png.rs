use crate::error::{ProbeError, Result};
use crate::probe::FormatProbe;
use crate::types::{ImageSize, ImageType};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Signature, IHDR length and tag, then the two 32-bit dimension fields.
pub const MIN_PNG_PROBE: usize = 24;

/// Read the dimensions out of the IHDR chunk, which the format requires to
/// come first. The chunk CRC is not verified; this is a header probe, not a
/// validator.
pub fn dimensions(data: &[u8]) -> Result<ImageSize> {
    if data.len() < MIN_PNG_PROBE {
        return Err(ProbeError::InsufficientData);
    }

    if &data[12..16] != b"IHDR" {
        return Err(ProbeError::InsufficientData);
    }

    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);

    Ok(ImageSize { width, height })
}

pub struct PngProbe;

impl FormatProbe for PngProbe {
    fn image_type(&self) -> ImageType {
        ImageType::Png
    }

    fn detect(&self, buffer: &[u8]) -> bool {
        buffer.starts_with(&PNG_SIGNATURE)
    }

    fn dimensions(&self, buffer: &[u8]) -> Result<ImageSize> {
        dimensions(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_png(width: u32, height: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&PNG_SIGNATURE);
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[8, 2, 0, 0, 0]);
        data
    }

    #[test]
    fn test_reads_ihdr_dimensions() {
        let data = minimal_png(800, 600);
        let size = dimensions(&data).unwrap();
        assert_eq!((size.width, size.height), (800, 600));
    }

    #[test]
    fn test_rejects_short_buffer() {
        let data = minimal_png(800, 600);
        assert!(matches!(
            dimensions(&data[..20]),
            Err(ProbeError::InsufficientData)
        ));
    }

    #[test]
    fn test_rejects_missing_ihdr() {
        let mut data = minimal_png(800, 600);
        data[12..16].copy_from_slice(b"IDAT");
        assert!(matches!(
            dimensions(&data),
            Err(ProbeError::InsufficientData)
        ));
    }

    #[test]
    fn test_detect_requires_full_signature() {
        let probe = PngProbe;
        assert!(probe.detect(&minimal_png(1, 1)));
        assert!(!probe.detect(&PNG_SIGNATURE[..7]));
        assert!(!probe.detect(b"RIFF0000WEBP"));
    }
}
