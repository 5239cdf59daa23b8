//! Parameter types for image operations.
//!
//! These describe *what* to read and *how* to resample or encode, not the
//! pixel work itself. They are the interface between the pipeline modules
//! and the [`backend`](super::backend), so a mock backend can stand in during
//! tests.
//!
//! ## Types
//!
//! - [`ImageSource`]: where the source pixels come from: a file, a URL, encoded bytes, or a decoded buffer.
//! - [`Quality`]: Lossy encoding quality (1-100, default 90). Clamped on construction.
//! - [`ResizeFilter`]: Resampling kernel used when scaling to the virtual desktop.

use image::RgbImage;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Source image handed to [`ImageBackend::decode`](super::ImageBackend::decode).
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Local file; format guessed from content.
    Path(PathBuf),
    /// Encoded image bytes already in memory.
    Bytes(Vec<u8>),
    /// Already decoded pixels.
    Image(RgbImage),
    /// `http://` or `https://` locator, downloaded by the backend.
    Remote(String),
}

impl ImageSource {
    /// Interpret a command-line argument: `http(s)://` locators are remote,
    /// anything else is a filesystem path.
    pub fn from_arg(arg: &str) -> Self {
        let lower = arg.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageSource::Remote(arg.to_string())
        } else {
            ImageSource::Path(PathBuf::from(arg))
        }
    }

    /// Short human-readable label for logs and CLI output.
    pub fn describe(&self) -> String {
        match self {
            ImageSource::Path(p) => p.display().to_string(),
            ImageSource::Bytes(b) => format!("<{} bytes>", b.len()),
            ImageSource::Image(img) => format!("<{}x{} image>", img.width(), img.height()),
            ImageSource::Remote(url) => url.clone(),
        }
    }
}

impl From<RgbImage> for ImageSource {
    fn from(image: RgbImage) -> Self {
        ImageSource::Image(image)
    }
}

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Resampling kernel for the final resize.
///
/// Catmull-Rom (bicubic) is the default: sharp enough for wallpapers while
/// keeping colour bleed at hard edges to a pixel or two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResizeFilter::Nearest => "nearest",
            ResizeFilter::Triangle => "triangle",
            ResizeFilter::CatmullRom => "catmull-rom",
            ResizeFilter::Gaussian => "gaussian",
            ResizeFilter::Lanczos3 => "lanczos3",
        };
        f.write_str(name)
    }
}

impl FromStr for ResizeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(ResizeFilter::Nearest),
            "triangle" => Ok(ResizeFilter::Triangle),
            "catmull-rom" | "bicubic" => Ok(ResizeFilter::CatmullRom),
            "gaussian" => Ok(ResizeFilter::Gaussian),
            "lanczos3" => Ok(ResizeFilter::Lanczos3),
            other => Err(format!(
                "unknown filter '{other}' (expected nearest, triangle, catmull-rom, gaussian or lanczos3)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_90() {
        assert_eq!(Quality::default().value(), 90);
    }

    #[test]
    fn source_from_arg_detects_remote() {
        assert!(matches!(
            ImageSource::from_arg("https://example.com/wall.jpg"),
            ImageSource::Remote(_)
        ));
        assert!(matches!(
            ImageSource::from_arg("HTTP://example.com/wall.jpg"),
            ImageSource::Remote(_)
        ));
        assert!(matches!(
            ImageSource::from_arg("photos/http-server.png"),
            ImageSource::Path(_)
        ));
    }

    #[test]
    fn describe_in_memory_image() {
        let source = ImageSource::from(RgbImage::new(30, 20));
        assert_eq!(source.describe(), "<30x20 image>");
    }

    #[test]
    fn filter_defaults_to_catmull_rom() {
        assert_eq!(ResizeFilter::default(), ResizeFilter::CatmullRom);
        assert_eq!(FilterType::from(ResizeFilter::Lanczos3), FilterType::Lanczos3);
    }

    #[test]
    fn filter_names_parse_back() {
        for filter in [
            ResizeFilter::Nearest,
            ResizeFilter::Triangle,
            ResizeFilter::CatmullRom,
            ResizeFilter::Gaussian,
            ResizeFilter::Lanczos3,
        ] {
            assert_eq!(filter.to_string().parse::<ResizeFilter>(), Ok(filter));
        }
        assert_eq!("bicubic".parse::<ResizeFilter>(), Ok(ResizeFilter::CatmullRom));
        assert!("sinc".parse::<ResizeFilter>().is_err());
    }
}
