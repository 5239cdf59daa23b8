//! Error taxonomy for the fitting pipeline.
//!
//! Two families reach the caller:
//!
//! - [`ConfigurationError`]: the monitor layout or alignment policy is
//!   unusable. Raised before any pixel work; the caller must fix the inputs.
//! - [`BackendError`]: acquiring, decoding or encoding an image failed.
//!   Surfaced unmodified, never retried.
//!
//! [`FitError`] is the union returned by the public entry points.

use crate::align::Alignment;
use crate::imaging::BackendError;
use std::fmt;
use thiserror::Error;

/// How the source image compares to the target aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceShape {
    /// Source is wider than target: the fix is along the horizontal axis.
    Wider,
    /// Source is taller than target: the fix is along the vertical axis.
    Taller,
}

impl fmt::Display for SourceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceShape::Wider => f.write_str("wider"),
            SourceShape::Taller => f.write_str("taller"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("at least one monitor resolution is required")]
    NoMonitors,
    #[error("monitor {index} has an empty resolution ({width}x{height})")]
    ZeroSizedMonitor { index: usize, width: u32, height: u32 },
    #[error("there should be fewer gaps than monitors (got {gaps} gaps for {monitors} monitors)")]
    TooManyGaps { gaps: usize, monitors: usize },
    #[error("only one alignment policy may be set, got: {}", format_policies(.0))]
    ConflictingAlignment(Vec<Alignment>),
    #[error("can't use {alignment} alignment when the image is {shape} than the target")]
    IncompatibleAlignment {
        alignment: Alignment,
        shape: SourceShape,
    },
    #[error("monitors and gaps span {width} px, wider than an image can be (4294967295 px)")]
    LayoutTooWide { width: u64 },
    #[error("invalid monitor resolution '{0}' (expected WIDTHxHEIGHT, e.g. 1920x1080)")]
    InvalidMonitor(String),
}

fn format_policies(policies: &[Alignment]) -> String {
    policies
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug)]
pub enum FitError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Image acquisition failed: {0}")]
    Acquisition(#[from] BackendError),
}
