//! Pure Rust image backend on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` with format sniffing |
//! | Download (http/https) | [`fetch_bytes`](super::fetch::fetch_bytes) on `ureq` |
//! | Resize | `image::imageops::resize`, filter from [`ResizeFilter`] |
//! | Encode → PNG / TIFF | `PngEncoder` / `TiffEncoder` |
//! | Encode → JPEG | `JpegEncoder` at the configured [`Quality`] |
//! | Encode → WebP | `WebPEncoder` (lossless) |
//! | Encode → AVIF | `AvifEncoder` (rav1e, speed 6) |

use super::backend::{BackendError, ImageBackend};
use super::fetch::fetch_bytes;
use super::params::{ImageSource, Quality, ResizeFilter};
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tiff::TiffEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader, RgbImage, imageops};
use std::io::{BufWriter, Cursor};
use std::path::Path;

/// Output extensions [`RustBackend::save`](ImageBackend::save) can encode.
pub const SUPPORTED_OUTPUT_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "tif", "tiff", "webp", "avif"];

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustBackend {
    filter: ResizeFilter,
    quality: Quality,
}

impl RustBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn filter(&self) -> ResizeFilter {
        self.filter
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }
}

fn decode_error(source: &ImageSource, reason: impl ToString) -> BackendError {
    BackendError::Decode {
        source_name: source.describe(),
        reason: reason.to_string(),
    }
}

/// Reject empty buffers so downstream aspect maths never divides by zero.
fn ensure_non_empty(image: RgbImage, source: &ImageSource) -> Result<RgbImage, BackendError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(decode_error(source, "image has no pixels"));
    }
    Ok(image)
}

fn decode_bytes(bytes: &[u8], source: &ImageSource) -> Result<DynamicImage, BackendError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()
        .map_err(|e| decode_error(source, e))
}

fn output_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

impl ImageBackend for RustBackend {
    fn decode(&self, source: &ImageSource) -> Result<RgbImage, BackendError> {
        let decoded: DynamicImage = match source {
            ImageSource::Path(path) => ImageReader::open(path)?
                .with_guessed_format()?
                .decode()
                .map_err(|e| decode_error(source, e))?,
            ImageSource::Bytes(bytes) => decode_bytes(bytes, source)?,
            ImageSource::Image(img) => return ensure_non_empty(img.clone(), source),
            ImageSource::Remote(url) => decode_bytes(&fetch_bytes(url)?, source)?,
        };
        ensure_non_empty(decoded.to_rgb8(), source)
    }

    fn resize(&self, image: &RgbImage, width: u32, height: u32) -> RgbImage {
        if image.dimensions() == (width, height) {
            return image.clone();
        }
        imageops::resize(image, width, height, self.filter.into())
    }

    fn save(&self, image: &RgbImage, path: &Path) -> Result<(), BackendError> {
        let ext = output_extension(path);
        if !SUPPORTED_OUTPUT_EXTENSIONS.contains(&ext.as_str()) {
            return Err(BackendError::UnsupportedFormat(ext));
        }

        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        let (width, height) = image.dimensions();
        let buf = image.as_raw();
        let quality = self.quality.value() as u8;

        let result = match ext.as_str() {
            "png" => PngEncoder::new(writer).write_image(buf, width, height, ExtendedColorType::Rgb8),
            "jpg" | "jpeg" => JpegEncoder::new_with_quality(writer, quality).write_image(
                buf,
                width,
                height,
                ExtendedColorType::Rgb8,
            ),
            "tif" | "tiff" => {
                TiffEncoder::new(writer).write_image(buf, width, height, ExtendedColorType::Rgb8)
            }
            "webp" => WebPEncoder::new_lossless(writer).write_image(
                buf,
                width,
                height,
                ExtendedColorType::Rgb8,
            ),
            _ => AvifEncoder::new_with_speed_quality(writer, 6, quality).write_image(
                buf,
                width,
                height,
                ExtendedColorType::Rgb8,
            ),
        };

        result.map_err(|e| BackendError::Encode {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
