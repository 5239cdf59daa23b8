//! CLI output formatting for every command.
//!
//! Output leads with what the user cares about (monitors, dimensions,
//! what happened to the image) and shows file paths as the last detail on a
//! line, after an arrow.
//!
//! # Output Format
//!
//! ## Plan
//!
//! ```text
//! Desktop 4080x1080 (aspect 3.7778)
//! Composite 3840x1080
//! 001 1920x1080
//!     Desktop: x 0..1920
//!     Composite: x 0..1920
//!     Gap: 240px
//! 002 1920x1080
//!     Desktop: x 2160..4080
//!     Composite: x 1920..3840
//! ```
//!
//! ## Fit
//!
//! ```text
//! Source 6000x2000
//!     Alignment: center
//!     Reshape: crop 3556x2000 at (1222, 0)
//! Composite 3840x1080 → wallfit.png
//! ```
//!
//! ## Slice
//!
//! ```text
//! 001 1920x1080 → slices/monitor-1.png
//! 002 1920x1080 → slices/monitor-2.png
//!
//! Wrote 2 slices
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::fit::FitReport;
use crate::layout::{ResolvedLayout, Segment};
use crate::reconcile::Reshape;
use std::path::{Path, PathBuf};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn format_span(start: u32, width: u32) -> String {
    format!("x {}..{}", start, start + width)
}

/// One-line description of what happened to the source before resizing.
pub fn format_reshape(reshape: &Reshape) -> String {
    match *reshape {
        Reshape::Identity => "none (aspect ratio already matches)".to_string(),
        Reshape::Crop {
            x,
            y,
            width,
            height,
        } => format!("crop {width}x{height} at ({x}, {y})"),
        Reshape::Pad {
            canvas_width,
            canvas_height,
            x,
            y,
        } => format!("pad to {canvas_width}x{canvas_height}, image at ({x}, {y})"),
    }
}

// ============================================================================
// Plan
// ============================================================================

pub fn format_layout(layout: &ResolvedLayout) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Desktop {}x{} (aspect {:.4})",
            layout.width_with_gaps, layout.target_height, layout.aspect_ratio
        ),
        format!("Composite {}x{}", layout.monitors_width, layout.target_height),
    ];

    let mut segments = layout.segments.iter().peekable();
    while let Some(segment) = segments.next() {
        lines.push(monitor_header(segment));
        lines.push(format!(
            "{}Desktop: {}",
            indent(1),
            format_span(segment.virtual_x, segment.width)
        ));
        lines.push(format!(
            "{}Composite: {}",
            indent(1),
            format_span(segment.output_x, segment.width)
        ));
        if let Some(next) = segments.peek() {
            let gap = next.virtual_x - (segment.virtual_x + segment.width);
            if gap > 0 {
                lines.push(format!("{}Gap: {}px", indent(1), gap));
            }
        }
    }
    lines
}

fn monitor_header(segment: &Segment) -> String {
    format!(
        "{} {}x{}",
        format_index(segment.index + 1),
        segment.width,
        segment.monitor_height
    )
}

/// Pretty-printed JSON form of the layout for `plan --json`.
pub fn format_layout_json(layout: &ResolvedLayout) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(layout)
}

pub fn print_layout(layout: &ResolvedLayout) {
    for line in format_layout(layout) {
        println!("{}", line);
    }
}

// ============================================================================
// Fit
// ============================================================================

pub fn format_fit_result(report: &FitReport, output: Option<&Path>) -> Vec<String> {
    let (source_w, source_h) = report.source;
    let (out_w, out_h) = report.composite();
    let composite = match output {
        Some(path) => format!("Composite {}x{} → {}", out_w, out_h, path.display()),
        None => format!("Composite {}x{}", out_w, out_h),
    };
    vec![
        format!("Source {}x{}", source_w, source_h),
        format!("{}Alignment: {}", indent(1), report.alignment),
        format!("{}Reshape: {}", indent(1), format_reshape(&report.reshape)),
        composite,
    ]
}

pub fn print_fit_result(report: &FitReport, output: Option<&Path>) {
    for line in format_fit_result(report, output) {
        println!("{}", line);
    }
}

// ============================================================================
// Slice
// ============================================================================

/// One line per written slice, paired with its monitor.
pub fn format_slices(layout: &ResolvedLayout, paths: &[PathBuf]) -> Vec<String> {
    let mut lines: Vec<String> = layout
        .segments
        .iter()
        .zip(paths)
        .map(|(segment, path)| {
            format!(
                "{} {}x{} → {}",
                format_index(segment.index + 1),
                segment.width,
                layout.target_height,
                path.display()
            )
        })
        .collect();

    lines.push(String::new());
    let noun = if paths.len() == 1 { "slice" } else { "slices" };
    lines.push(format!("Wrote {} {}", paths.len(), noun));
    lines
}

pub fn print_slices(layout: &ResolvedLayout, paths: &[PathBuf]) {
    for line in format_slices(layout, paths) {
        println!("{}", line);
    }
}
