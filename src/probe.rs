use crate::bmp::BmpProbe;
use crate::error::{ProbeError, Result};
use crate::gif::GifProbe;
use crate::jpeg::JpegProbe;
use crate::png::PngProbe;
use crate::tiff::TiffProbe;
use crate::types::{ImageSize, ImageType, ProbeReport};
use crate::webp::WebpProbe;

/// One image format handler: a cheap magic sniff plus a dimension decoder.
///
/// Implementations must be `Send + Sync` so a registry can be shared across
/// threads without synchronization.
pub trait FormatProbe: Send + Sync {
    /// The format this probe recognizes.
    fn image_type(&self) -> ImageType;

    /// Prefix-only magic test. Must never read past the buffer and must not
    /// allocate; it runs once per registered probe on every lookup.
    fn detect(&self, buffer: &[u8]) -> bool;

    /// Decode the pixel dimensions without decoding pixel data.
    fn dimensions(&self, buffer: &[u8]) -> Result<ImageSize>;
}

/// Ordered set of format probes. Lookup tries each probe's sniff in
/// registration order and dispatches to the first match, so prefixes that
/// shadow each other are resolved by registration order alone.
pub struct ProbeRegistry {
    probes: Vec<Box<dyn FormatProbe>>,
}

impl ProbeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { probes: Vec::new() }
    }

    /// The built-in probe set: WebP, PNG, JPEG, GIF, BMP, TIFF.
    #[must_use]
    pub fn default_formats() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(WebpProbe));
        registry.register(Box::new(PngProbe));
        registry.register(Box::new(JpegProbe));
        registry.register(Box::new(GifProbe));
        registry.register(Box::new(BmpProbe));
        registry.register(Box::new(TiffProbe));
        registry
    }

    pub fn register(&mut self, probe: Box<dyn FormatProbe>) {
        self.probes.push(probe);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// Format of the first probe whose sniff claims the buffer, or
    /// [`ImageType::Unknown`] when none does.
    #[must_use]
    pub fn detect(&self, buffer: &[u8]) -> ImageType {
        self.probes
            .iter()
            .find(|probe| probe.detect(buffer))
            .map_or(ImageType::Unknown, |probe| probe.image_type())
    }

    /// Sniff the buffer, then decode dimensions with the matching probe.
    pub fn probe(&self, buffer: &[u8]) -> Result<ProbeReport> {
        let probe = self
            .probes
            .iter()
            .find(|probe| probe.detect(buffer))
            .ok_or(ProbeError::UnknownFormat)?;
        let size = probe.dimensions(buffer)?;
        Ok(ProbeReport {
            image_type: probe.image_type(),
            size,
        })
    }
}

impl Default for ProbeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
