//! # wallfit
//!
//! Fits one source image across an arbitrary row of monitors, each with its
//! own resolution, optionally separated by physical gaps (bezels). The result
//! is one seamless composite that can be set as a spanning wallpaper or
//! sliced into one image per monitor.
//!
//! # Architecture: Three-Step Pipeline
//!
//! ```text
//! 1. Resolve    monitors + gaps  →  target aspect ratio, virtual desktop size
//! 2. Reconcile  source image     →  crop (or black-bar pad) to that aspect ratio
//! 3. Compose    reconciled image →  resize to the virtual desktop, drop gap strips
//! ```
//!
//! Steps 1 and 2 are pure arithmetic ([`layout::resolve`], [`reconcile::plan_reshape`])
//! and fail fast with a [`ConfigurationError`] before any pixel is touched.
//! Only step 3 and the final save go through the [`imaging::ImageBackend`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`layout`] | Monitor resolutions and gaps → [`ResolvedLayout`] with per-monitor segments |
//! | [`align`] | [`Alignment`] policy and the legacy exclusive-flag surface |
//! | [`reconcile`] | Crop or pad plan for a source against the target aspect ratio |
//! | [`compose`] | Resize to the virtual desktop, remove gaps, slice per monitor |
//! | [`fit`] | Public entry points: [`fit::multi_monitor_resize`], [`fit::fit_image`] |
//! | [`imaging`] | Decode/resize/save backend on the `image` crate, exact pixel copies |
//! | [`error`] | [`ConfigurationError`] and [`FitError`] |
//! | [`config`] | Layered `wallfit.toml` loading, validation, CLI overrides |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Gaps Are Content, Not Padding
//!
//! The source is resized to the width *including* gaps and the gap columns
//! are then thrown away. A straight line crossing a bezel therefore continues
//! where it would if the bezel were transparent, instead of being squeezed
//! together at the seam.
//!
//! ## Shortest Monitor Wins
//!
//! With mixed heights the composite is as tall as the shortest monitor. Taller
//! monitors receive a slice that is exactly their width and the shared height;
//! no per-monitor vertical offset is applied.
//!
//! ## One Alignment Value
//!
//! The alignment switches of the command line (`--black-bars`,
//! `--prefer-left`, ...) collapse into a single [`Alignment`]. Setting more
//! than one is an error rather than a silent precedence rule, and an
//! axis-incompatible choice (`--prefer-top` on a wide image) is an error too.

pub mod align;
pub mod compose;
pub mod config;
pub mod error;
pub mod fit;
pub mod imaging;
pub mod layout;
pub mod output;
pub mod reconcile;

pub use align::{Alignment, AlignmentFlags};
pub use error::{ConfigurationError, FitError, SourceShape};
pub use fit::{fit_image, multi_monitor_resize};
pub use layout::{Monitor, MonitorLayout, ResolvedLayout, Segment, resolve};

#[cfg(test)]
pub(crate) mod test_helpers;
