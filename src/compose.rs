//! Composition: scale to the virtual desktop, then drop the gap strips.
//!
//! ```text
//! virtual desktop (resized)     | mon 0 |gap| mon 1 |
//! composite (gap-free)          | mon 0 | mon 1 |
//! ```
//!
//! The gap strips are content that would sit behind the bezels. Cutting them
//! out makes a line crossing a bezel continue at the right height on the
//! neighbouring monitor.

use crate::imaging::{ImageBackend, black_canvas, crop_box, paste};
use crate::layout::ResolvedLayout;
use image::RgbImage;
use tracing::debug;

/// Resize `reconciled` to the virtual desktop and remove the gaps.
///
/// The result is `monitors_width` × `target_height`. Without gaps that is
/// exactly the resized image.
pub fn compose(
    backend: &impl ImageBackend,
    reconciled: &RgbImage,
    layout: &ResolvedLayout,
) -> RgbImage {
    debug!(
        from_width = reconciled.width(),
        from_height = reconciled.height(),
        to_width = layout.width_with_gaps,
        to_height = layout.target_height,
        "resizing to virtual desktop"
    );
    let desktop = backend.resize(reconciled, layout.width_with_gaps, layout.target_height);

    if !layout.has_gaps() {
        return desktop;
    }
    remove_gaps(&desktop, layout)
}

/// Cut every monitor's columns out of the virtual desktop and butt them
/// together left to right.
pub fn remove_gaps(desktop: &RgbImage, layout: &ResolvedLayout) -> RgbImage {
    let mut composite = black_canvas(layout.monitors_width, layout.target_height);
    for segment in &layout.segments {
        debug!(
            monitor = segment.index,
            from_x = segment.virtual_x,
            to_x = segment.output_x,
            width = segment.width,
            "extracting monitor segment"
        );
        let part = crop_box(
            desktop,
            segment.virtual_x,
            0,
            segment.width,
            layout.target_height,
        );
        paste(&mut composite, &part, segment.output_x, 0);
    }
    composite
}

/// Split a gap-free composite into one image per monitor, left to right.
///
/// Each slice is the monitor's width × `target_height`.
pub fn slice_monitors(composite: &RgbImage, layout: &ResolvedLayout) -> Vec<RgbImage> {
    layout
        .segments
        .iter()
        .map(|s| crop_box(composite, s.output_x, 0, s.width, layout.target_height))
        .collect()
}
