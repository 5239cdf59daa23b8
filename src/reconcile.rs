//! Aspect reconciliation: bring the source to the target aspect ratio.
//!
//! Exactly one of two things happens, decided by [`plan_reshape`]:
//!
//! - **Crop**: part of the source is dropped along the axis where it is too
//!   long. The [`Alignment`] picks which edge (or the center) survives.
//! - **Pad**: with [`Alignment::BlackBars`] nothing is dropped; the source is
//!   pasted onto a larger black canvas along the axis where it is too short.
//!
//! ```text
//! source wider than target            source taller than target
//! crop:  ░░[██████████]░░             crop:  ░░ / [██] / ░░   (rows)
//! pad:   ▀▀▀ / ██████ / ▄▄▄           pad:   ▌[██]▐           (columns)
//! ```
//!
//! Planning is pure arithmetic on dimensions; [`reconcile`] applies the plan.
//! Fractional bounds are rounded to the nearest pixel, ties to even.

use crate::align::Alignment;
use crate::error::{ConfigurationError, SourceShape};
use crate::imaging::{crop_box, pad};
use image::RgbImage;
use tracing::debug;

/// What to do to the source so its aspect ratio matches the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reshape {
    /// Aspect ratios already agree.
    Identity,
    /// Keep the `width` × `height` window at (`x`, `y`).
    Crop {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// Paste the source at (`x`, `y`) on a black canvas of the given size.
    Pad {
        canvas_width: u32,
        canvas_height: u32,
        x: u32,
        y: u32,
    },
}

impl Reshape {
    /// Dimensions produced when applied to a `width` × `height` source.
    pub fn output_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        match *self {
            Reshape::Identity => (width, height),
            Reshape::Crop { width, height, .. } => (width, height),
            Reshape::Pad {
                canvas_width,
                canvas_height,
                ..
            } => (canvas_width, canvas_height),
        }
    }
}

/// Round a fractional `[start, end)` span and clamp it into `[0, len]`.
///
/// Returns `(offset, size)`; size is at least one pixel.
fn crop_span(start: f64, end: f64, len: u32) -> (u32, u32) {
    let max = f64::from(len);
    let start = start.round_ties_even().clamp(0.0, max) as u32;
    let end = end.round_ties_even().clamp(0.0, max) as u32;
    let start = start.min(len.saturating_sub(1));
    (start, end.saturating_sub(start).max(1))
}

/// Grow a `len` span symmetrically to `new_len`, returning `(offset, size)`.
///
/// The source starts at `offset` within the grown span.
fn pad_span(len: u32, new_len: f64) -> (u32, u32) {
    let diff = new_len - f64::from(len);
    let start = (-diff / 2.0).round_ties_even().min(0.0);
    let end = (f64::from(len) + diff / 2.0)
        .round_ties_even()
        .max(f64::from(len));
    ((-start) as u32, (end - start) as u32)
}

/// Decide how to reshape a `width` × `height` source for `target_aspect`.
///
/// Fails when `alignment` asks to keep an edge on the axis that is not being
/// cropped: `Top`/`Bottom` on a source wider than the target, `Left`/`Right`
/// on one taller than the target.
pub fn plan_reshape(
    width: u32,
    height: u32,
    target_aspect: f64,
    alignment: Alignment,
) -> Result<Reshape, ConfigurationError> {
    let w = f64::from(width);
    let h = f64::from(height);
    let current_aspect = w / h;

    // Equal ratios count as "taller": nothing is cropped, but a left/right
    // preference is still rejected.
    if current_aspect == target_aspect {
        alignment.check_axis(SourceShape::Taller)?;
        return Ok(Reshape::Identity);
    }

    let reshape = if current_aspect > target_aspect {
        alignment.check_axis(SourceShape::Wider)?;
        if alignment == Alignment::BlackBars {
            let (y, canvas_height) = pad_span(height, w / target_aspect);
            Reshape::Pad {
                canvas_width: width,
                canvas_height,
                x: 0,
                y,
            }
        } else {
            let new_width = h * target_aspect;
            let (x0, x1) = match alignment {
                Alignment::Left => (0.0, new_width),
                Alignment::Right => (w - new_width, w),
                _ => (w / 2.0 - new_width / 2.0, w / 2.0 + new_width / 2.0),
            };
            let (x, crop_width) = crop_span(x0, x1, width);
            Reshape::Crop {
                x,
                y: 0,
                width: crop_width,
                height,
            }
        }
    } else {
        alignment.check_axis(SourceShape::Taller)?;
        if alignment == Alignment::BlackBars {
            let (x, canvas_width) = pad_span(width, h * target_aspect);
            Reshape::Pad {
                canvas_width,
                canvas_height: height,
                x,
                y: 0,
            }
        } else {
            let new_height = w / target_aspect;
            let (y0, y1) = match alignment {
                Alignment::Top => (0.0, new_height),
                Alignment::Bottom => (h - new_height, h),
                _ => (h / 2.0 - new_height / 2.0, h / 2.0 + new_height / 2.0),
            };
            let (y, crop_height) = crop_span(y0, y1, height);
            Reshape::Crop {
                x: 0,
                y,
                width,
                height: crop_height,
            }
        }
    };

    // Sub-pixel differences round away to nothing.
    if reshape.output_dimensions(width, height) == (width, height) {
        return Ok(Reshape::Identity);
    }
    Ok(reshape)
}

/// Crop or pad `image` to `target_aspect` according to `alignment`.
///
/// The result is not resized; its dimensions are those of the planned
/// crop window or padded canvas.
pub fn reconcile(
    image: RgbImage,
    target_aspect: f64,
    alignment: Alignment,
) -> Result<RgbImage, ConfigurationError> {
    let (width, height) = image.dimensions();
    let reshape = plan_reshape(width, height, target_aspect, alignment)?;
    debug!(?reshape, %alignment, width, height, target_aspect, "reconciling aspect ratio");
    Ok(apply_reshape(image, reshape))
}

/// Apply a planned [`Reshape`]. Pixels outside the source become black.
pub fn apply_reshape(image: RgbImage, reshape: Reshape) -> RgbImage {
    match reshape {
        Reshape::Identity => image,
        Reshape::Crop {
            x,
            y,
            width,
            height,
        } => crop_box(&image, x, y, width, height),
        Reshape::Pad {
            canvas_width,
            canvas_height,
            x,
            y,
        } => pad(&image, canvas_width, canvas_height, x, y),
    }
}
