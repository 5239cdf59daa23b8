//! Image capability trait and shared types.
//!
//! The [`ImageBackend`] trait covers the operations whose behaviour depends on
//! codecs or resampling: decode, resize, and save. Cropping and pasting are
//! exact pixel copies and live in [`operations`](super::operations).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate.

use super::params::ImageSource;
use image::RgbImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {source_name}: {reason}")]
    Decode { source_name: String, reason: String },
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: String, reason: String },
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("Fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },
}

/// Trait for image capability backends.
///
/// `Sync` so slices can be encoded from rayon workers.
pub trait ImageBackend: Sync {
    /// Load and decode the source into 8-bit RGB.
    fn decode(&self, source: &ImageSource) -> Result<RgbImage, BackendError>;

    /// Resample to exactly `width` × `height`, ignoring aspect ratio.
    fn resize(&self, image: &RgbImage, width: u32, height: u32) -> RgbImage;

    /// Encode to `path`; format chosen from the extension.
    fn save(&self, image: &RgbImage, path: &Path) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use image::imageops::{self, FilterType};
    use std::sync::Mutex;

    /// Mock backend that records operations.
    ///
    /// Decoding returns the in-memory image (or a queued one), resizing uses
    /// nearest-neighbour so colour boundaries stay exact, and saving only
    /// records the path.
    #[derive(Default)]
    pub struct MockBackend {
        pub decode_results: Mutex<Vec<RgbImage>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode(String),
        Resize {
            from: (u32, u32),
            to: (u32, u32),
        },
        Save {
            path: String,
            width: u32,
            height: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_images(images: Vec<RgbImage>) -> Self {
            Self {
                decode_results: Mutex::new(images),
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, source: &ImageSource) -> Result<RgbImage, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Decode(source.describe()));

            match source {
                ImageSource::Image(img) => Ok(img.clone()),
                _ => self.decode_results.lock().unwrap().pop().ok_or_else(|| {
                    BackendError::Decode {
                        source_name: source.describe(),
                        reason: "No mock image".to_string(),
                    }
                }),
            }
        }

        fn resize(&self, image: &RgbImage, width: u32, height: u32) -> RgbImage {
            self.operations.lock().unwrap().push(RecordedOp::Resize {
                from: image.dimensions(),
                to: (width, height),
            });
            imageops::resize(image, width, height, FilterType::Nearest)
        }

        fn save(&self, image: &RgbImage, path: &Path) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Save {
                path: path.to_string_lossy().to_string(),
                width: image.width(),
                height: image.height(),
            });
            Ok(())
        }
    }

    #[test]
    fn mock_decodes_in_memory_image() {
        let backend = MockBackend::new();
        let img = backend
            .decode(&ImageSource::Image(RgbImage::new(80, 60)))
            .unwrap();
        assert_eq!(img.dimensions(), (80, 60));

        let ops = backend.get_operations();
        assert_eq!(ops, vec![RecordedOp::Decode("<80x60 image>".to_string())]);
    }

    #[test]
    fn mock_pops_queued_images_for_paths() {
        let backend = MockBackend::with_images(vec![RgbImage::new(10, 5)]);
        let img = backend
            .decode(&ImageSource::Path("/wall.png".into()))
            .unwrap();
        assert_eq!(img.dimensions(), (10, 5));
        assert!(backend.decode(&ImageSource::Path("/wall.png".into())).is_err());
    }

    #[test]
    fn mock_records_resize() {
        let backend = MockBackend::new();
        let out = backend.resize(&RgbImage::new(400, 300), 200, 100);
        assert_eq!(out.dimensions(), (200, 100));
        assert!(matches!(
            &backend.get_operations()[0],
            RecordedOp::Resize {
                from: (400, 300),
                to: (200, 100)
            }
        ));
    }

    #[test]
    fn mock_serves_queued_image_for_remote() {
        let backend = MockBackend::with_images(vec![RgbImage::new(12, 6)]);
        let img = backend
            .decode(&ImageSource::Remote("https://x/y.jpg".into()))
            .unwrap();
        assert_eq!(img.dimensions(), (12, 6));

        let result = backend.decode(&ImageSource::Remote("https://x/z.jpg".into()));
        assert!(matches!(result, Err(BackendError::Decode { .. })));
    }
}
