//! Image format and pixel-dimension detection from leading bytes, without
//! decoding pixel data.
//!
//! The core is a RIFF chunk walker for WebP; sibling probes cover PNG,
//! JPEG, GIF, BMP and TIFF. Every probe is a pure function over a borrowed
//! byte slice, so a prefix of a file is enough and nothing is ever
//! allocated per lookup.

pub mod bmp;
mod error;
pub mod gif;
pub mod jpeg;
pub mod png;
mod probe;
pub mod tiff;
mod types;
pub mod webp;

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

pub use error::{ProbeError, Result};
pub use probe::{FormatProbe, ProbeRegistry};
pub use types::{ImageSize, ImageType, ProbeReport};

/// Leading bytes read by [`probe_file`] before falling back to a full read.
/// All built-in formats keep their dimension fields well inside this.
pub const PROBE_READ_LEN: usize = 64 * 1024;

static DEFAULT_REGISTRY: LazyLock<ProbeRegistry> = LazyLock::new(ProbeRegistry::default_formats);

/// Identify the format of a buffer by its magic bytes.
#[must_use]
pub fn image_type(buffer: &[u8]) -> ImageType {
    DEFAULT_REGISTRY.detect(buffer)
}

/// Decode the pixel dimensions of a buffer using the built-in probe set.
pub fn image_size(buffer: &[u8]) -> Result<ImageSize> {
    Ok(DEFAULT_REGISTRY.probe(buffer)?.size)
}

/// Identify and measure a buffer in one pass.
pub fn probe(buffer: &[u8]) -> Result<ProbeReport> {
    DEFAULT_REGISTRY.probe(buffer)
}

/// Probe a file by its leading bytes.
///
/// Reads up to [`PROBE_READ_LEN`] bytes first. If the decoder reports the
/// prefix is too short and the file may hold more, the whole file is read
/// and probed once more.
pub fn probe_file<P: AsRef<Path>>(path: P) -> Result<ProbeReport> {
    let path = path.as_ref();

    let mut buffer = Vec::with_capacity(PROBE_READ_LEN);
    File::open(path)?
        .take(PROBE_READ_LEN as u64)
        .read_to_end(&mut buffer)?;
    tracing::debug!(path = %path.display(), bytes = buffer.len(), "probing file prefix");

    match DEFAULT_REGISTRY.probe(&buffer) {
        Err(ProbeError::InsufficientData) if buffer.len() == PROBE_READ_LEN => {
            tracing::debug!(path = %path.display(), "prefix too short, rereading whole file");
            let data = std::fs::read(path)?;
            DEFAULT_REGISTRY.probe(&data)
        }
        result => result,
    }
}
