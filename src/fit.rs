//! Public entry points: one source image in, one seamless composite out.
//!
//! ```text
//! MonitorLayout ──resolve──▶ ResolvedLayout (aspect, width_with_gaps, height)
//!                                   │
//! ImageSource ──decode──▶ RgbImage ─┴─reconcile──▶ crop/pad ──compose──▶ composite
//! ```
//!
//! Every call is independent: buffers are created per call and dropped when
//! it returns.

use crate::align::Alignment;
use crate::compose::{compose, slice_monitors};
use crate::error::FitError;
use crate::imaging::{BackendError, ImageBackend, ImageSource};
use crate::layout::{MonitorLayout, ResolvedLayout};
use crate::reconcile::{Reshape, apply_reshape, plan_reshape};
use image::RgbImage;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What the pipeline did, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    /// Decoded source dimensions.
    pub source: (u32, u32),
    pub alignment: Alignment,
    pub reshape: Reshape,
    pub layout: ResolvedLayout,
}

impl FitReport {
    /// Dimensions of the final gap-free composite.
    pub fn composite(&self) -> (u32, u32) {
        (self.layout.monitors_width, self.layout.target_height)
    }
}

/// A finished composite plus its report.
#[derive(Debug, Clone)]
pub struct Fitted {
    pub image: RgbImage,
    pub report: FitReport,
}

/// Decode `source` and fit it onto `layout`.
pub fn fit(
    backend: &impl ImageBackend,
    source: &ImageSource,
    layout: &MonitorLayout,
    alignment: Alignment,
) -> Result<Fitted, FitError> {
    let resolved = layout.resolve();
    debug!(
        aspect_ratio = resolved.aspect_ratio,
        width_with_gaps = resolved.width_with_gaps,
        target_height = resolved.target_height,
        "resolved monitor layout"
    );

    let image = backend.decode(source)?;
    info!(
        source = %source.describe(),
        width = image.width(),
        height = image.height(),
        "loaded source image"
    );
    fit_decoded(backend, image, resolved, alignment)
}

/// Fit an already decoded image onto `layout`.
pub fn fit_image(
    backend: &impl ImageBackend,
    image: RgbImage,
    layout: &MonitorLayout,
    alignment: Alignment,
) -> Result<RgbImage, FitError> {
    Ok(fit_decoded(backend, image, layout.resolve(), alignment)?.image)
}

fn fit_decoded(
    backend: &impl ImageBackend,
    image: RgbImage,
    layout: ResolvedLayout,
    alignment: Alignment,
) -> Result<Fitted, FitError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(BackendError::Decode {
            source_name: format!("<{width}x{height} image>"),
            reason: "image has no pixels".to_string(),
        }
        .into());
    }

    let reshape = plan_reshape(width, height, layout.aspect_ratio, alignment)?;
    debug!(?reshape, %alignment, "planned reshape");
    let reconciled = apply_reshape(image, reshape);
    let composite = compose(backend, &reconciled, &layout);

    Ok(Fitted {
        image: composite,
        report: FitReport {
            source: (width, height),
            alignment,
            reshape,
            layout,
        },
    })
}

/// Fit `source` onto `layout`, optionally saving the composite to `output`.
///
/// This is the one-call entry point: validation, decode, crop or pad,
/// resize, gap removal, save.
pub fn multi_monitor_resize(
    backend: &impl ImageBackend,
    source: &ImageSource,
    layout: &MonitorLayout,
    alignment: Alignment,
    output: Option<&Path>,
) -> Result<RgbImage, FitError> {
    let fitted = fit(backend, source, layout, alignment)?;
    if let Some(path) = output {
        backend.save(&fitted.image, path)?;
        info!(path = %path.display(), "saved composite");
    }
    Ok(fitted.image)
}

/// File name for monitor `index` (0-based) in a slice directory.
pub fn slice_file_name(index: usize, extension: &str) -> String {
    format!("monitor-{}.{}", index + 1, extension)
}

/// Split `composite` per monitor and encode each slice into `dir`.
///
/// Slices are encoded in parallel. Returns the written paths in monitor order.
pub fn write_slices(
    backend: &impl ImageBackend,
    composite: &RgbImage,
    layout: &ResolvedLayout,
    dir: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>, BackendError> {
    std::fs::create_dir_all(dir)?;
    slice_monitors(composite, layout)
        .into_par_iter()
        .enumerate()
        .map(|(index, slice)| -> Result<PathBuf, BackendError> {
            let path = dir.join(slice_file_name(index, extension));
            backend.save(&slice, &path)?;
            info!(monitor = index, path = %path.display(), "saved monitor slice");
            Ok(path)
        })
        .collect()
}
