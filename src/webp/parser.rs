use crate::error::{ProbeError, Result};
use crate::probe::FormatProbe;
use crate::types::{ImageSize, ImageType};

use super::{
    vp8_dimensions, vp8l_dimensions, vp8x_dimensions, CHUNK_HEADER_LEN, RIFF_HEADER_LEN,
    RIFF_MAGIC, VP8, VP8L, VP8L_MIN_LEN, VP8X, VP8X_MIN_LEN, VP8_MIN_LEN,
};

/// Iterator over the chunk stream that follows the outer RIFF header.
///
/// Each item is the chunk tag plus a window starting at the chunk's own
/// header, so decoders index relative to the chunk start. A chunk whose
/// declared payload overruns the buffer is still yielded once (its leading
/// bytes may be decodable) before iteration stops.
pub struct RiffChunkIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RiffChunkIter<'a> {
    /// `data` must already exclude the 12-byte outer header.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for RiffChunkIter<'a> {
    type Item = ([u8; 4], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let window = &self.data[self.pos..];
        if window.len() < CHUNK_HEADER_LEN {
            return None;
        }

        let tag = [window[0], window[1], window[2], window[3]];
        let declared = u32::from_le_bytes([window[4], window[5], window[6], window[7]]);
        // Odd payloads carry a trailing pad byte to keep chunks word-aligned.
        let aligned = u64::from(declared) + u64::from(declared & 1);

        // Advance in u64 so a hostile length field cannot overflow the cursor.
        let advance = CHUNK_HEADER_LEN as u64 + aligned;
        if (window.len() as u64) < advance {
            self.pos = self.data.len();
        } else {
            self.pos += advance as usize;
        }

        Some((tag, window))
    }
}

/// Walks a RIFF-wrapped WebP buffer and reads the dimensions out of the
/// first `VP8X`, `VP8 ` or `VP8L` chunk it meets.
pub struct WebpParser;

impl WebpParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Extract the pixel dimensions without decoding the bitstream.
    ///
    /// The buffer is expected to start at the RIFF magic. The declared
    /// RIFF size and the `WEBP` form tag are not re-validated; detection
    /// happens before this is called.
    pub fn dimensions(&self, data: &[u8]) -> Result<ImageSize> {
        if data.len() < RIFF_HEADER_LEN {
            return Err(ProbeError::InsufficientData);
        }

        for (tag, chunk) in RiffChunkIter::new(&data[RIFF_HEADER_LEN..]) {
            match tag {
                VP8X => return Self::decode_vp8x(chunk),
                VP8 => return Self::decode_vp8(chunk),
                VP8L => return Self::decode_vp8l(chunk),
                _ => {}
            }
        }

        Err(ProbeError::InsufficientData)
    }

    /// Canvas width and height sit at chunk bytes 12..=17, 24-bit each.
    fn decode_vp8x(chunk: &[u8]) -> Result<ImageSize> {
        if chunk.len() < VP8X_MIN_LEN {
            return Err(ProbeError::InsufficientData);
        }
        let (width, height) = vp8x_dimensions(&[
            chunk[12], chunk[13], chunk[14], chunk[15], chunk[16], chunk[17],
        ]);
        Ok(ImageSize { width, height })
    }

    /// Frame width and height sit at chunk bytes 14..=17, past the frame
    /// tag and start code.
    fn decode_vp8(chunk: &[u8]) -> Result<ImageSize> {
        if chunk.len() < VP8_MIN_LEN {
            return Err(ProbeError::InsufficientData);
        }
        let (width, height) = vp8_dimensions(&[chunk[14], chunk[15], chunk[16], chunk[17]]);
        Ok(ImageSize { width, height })
    }

    /// Packed width and height span chunk bytes 9..=12, past the one-byte
    /// lossless signature.
    fn decode_vp8l(chunk: &[u8]) -> Result<ImageSize> {
        if chunk.len() < VP8L_MIN_LEN {
            return Err(ProbeError::InsufficientData);
        }
        let (width, height) = vp8l_dimensions(&[chunk[9], chunk[10], chunk[11], chunk[12]]);
        Ok(ImageSize { width, height })
    }
}

impl Default for WebpParser {
    fn default() -> Self {
        Self::new()
    }
}

pub struct WebpProbe;

impl FormatProbe for WebpProbe {
    fn image_type(&self) -> ImageType {
        ImageType::Webp
    }

    fn detect(&self, buffer: &[u8]) -> bool {
        buffer.starts_with(&RIFF_MAGIC)
    }

    fn dimensions(&self, buffer: &[u8]) -> Result<ImageSize> {
        WebpParser::new().dimensions(buffer)
    }
}
