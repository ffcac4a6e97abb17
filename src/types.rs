use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Webp,
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
    Unknown,
}

impl ImageType {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            ImageType::Webp => "webp",
            ImageType::Png => "png",
            ImageType::Jpeg => "jpg",
            ImageType::Gif => "gif",
            ImageType::Bmp => "bmp",
            ImageType::Tiff => "tiff",
            ImageType::Unknown => "bin",
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ImageType::Webp => "WebP",
            ImageType::Png => "PNG",
            ImageType::Jpeg => "JPEG",
            ImageType::Gif => "GIF",
            ImageType::Bmp => "BMP",
            ImageType::Tiff => "TIFF",
            ImageType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Pixel dimensions read from header fields, never from decoded pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Outcome of a successful probe: the recognized format plus its dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    #[serde(rename = "type")]
    pub image_type: ImageType,
    #[serde(flatten)]
    pub size: ImageSize,
}
