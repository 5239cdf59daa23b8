//! Monitor layout resolution.
//!
//! Turns an ordered list of monitor resolutions plus the physical gaps
//! between them into the single canvas the source image must cover:
//!
//! ```text
//!  monitor 0     gap 0   monitor 1
//! ┌──────────┐         ┌──────────────┐
//! │ 1920     │  120px  │ 2560         │
//! │ x1080    │         │ x1440        │
//! └──────────┘         └──────────────┘
//! |<---------- width_with_gaps ---------->|   height = min(1080, 1440)
//! ```
//!
//! Everything here is pure arithmetic; no pixels are touched.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pixel resolution of one physical display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Monitor {
    pub width: u32,
    pub height: u32,
}

impl Monitor {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<[u32; 2]> for Monitor {
    fn from([width, height]: [u32; 2]) -> Self {
        Self { width, height }
    }
}

impl From<Monitor> for [u32; 2] {
    fn from(m: Monitor) -> Self {
        [m.width, m.height]
    }
}

impl fmt::Display for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `2560x1440`.
impl FromStr for Monitor {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigurationError::InvalidMonitor(s.to_string());
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = w.trim().parse().map_err(|_| invalid())?;
        let height = h.trim().parse().map_err(|_| invalid())?;
        Ok(Self { width, height })
    }
}

/// A validated left-to-right monitor arrangement.
///
/// Invariants (checked by [`MonitorLayout::new`]):
/// - at least one monitor, none with a zero dimension
/// - at most `monitors - 1` gaps; gap `i` sits between monitor `i` and `i + 1`
/// - monitor widths plus gaps fit in a `u32`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorLayout {
    monitors: Vec<Monitor>,
    gaps: Vec<u32>,
}

impl MonitorLayout {
    pub fn new(monitors: Vec<Monitor>, gaps: Vec<u32>) -> Result<Self, ConfigurationError> {
        if monitors.is_empty() {
            return Err(ConfigurationError::NoMonitors);
        }
        if gaps.len() >= monitors.len() {
            return Err(ConfigurationError::TooManyGaps {
                gaps: gaps.len(),
                monitors: monitors.len(),
            });
        }
        if let Some((index, m)) = monitors
            .iter()
            .enumerate()
            .find(|(_, m)| m.width == 0 || m.height == 0)
        {
            return Err(ConfigurationError::ZeroSizedMonitor {
                index,
                width: m.width,
                height: m.height,
            });
        }
        let width: u64 = monitors
            .iter()
            .map(|m| u64::from(m.width))
            .chain(gaps.iter().map(|&g| u64::from(g)))
            .sum();
        if width > u64::from(u32::MAX) {
            return Err(ConfigurationError::LayoutTooWide { width });
        }
        Ok(Self { monitors, gaps })
    }

    /// Single-monitor layout without gaps.
    pub fn single(width: u32, height: u32) -> Result<Self, ConfigurationError> {
        Self::new(vec![Monitor::new(width, height)], Vec::new())
    }

    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    pub fn gaps(&self) -> &[u32] {
        &self.gaps
    }

    /// Gap to the right of monitor `index`; 0 past the end of the gap list.
    pub fn gap_after(&self, index: usize) -> u32 {
        self.gaps.get(index).copied().unwrap_or(0)
    }

    /// Compute the virtual desktop for this layout.
    pub fn resolve(&self) -> ResolvedLayout {
        let monitors_width: u32 = self.monitors.iter().map(|m| m.width).sum();
        let width_with_gaps = monitors_width + self.gaps.iter().sum::<u32>();
        let target_height = self
            .monitors
            .iter()
            .map(|m| m.height)
            .min()
            .unwrap_or_default();

        let mut segments = Vec::with_capacity(self.monitors.len());
        let mut virtual_x = 0;
        let mut output_x = 0;
        for (index, monitor) in self.monitors.iter().enumerate() {
            segments.push(Segment {
                index,
                virtual_x,
                output_x,
                width: monitor.width,
                monitor_height: monitor.height,
            });
            virtual_x += monitor.width + self.gap_after(index);
            output_x += monitor.width;
        }

        ResolvedLayout {
            aspect_ratio: width_with_gaps as f64 / target_height as f64,
            width_with_gaps,
            monitors_width,
            target_height,
            segments,
        }
    }
}

/// Validate and resolve in one step.
pub fn resolve(monitors: &[Monitor], gaps: &[u32]) -> Result<ResolvedLayout, ConfigurationError> {
    Ok(MonitorLayout::new(monitors.to_vec(), gaps.to_vec())?.resolve())
}

/// The virtual desktop a layout spans.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLayout {
    /// `width_with_gaps / target_height`.
    pub aspect_ratio: f64,
    /// Sum of monitor widths plus sum of gaps.
    pub width_with_gaps: u32,
    /// Sum of monitor widths only: the width of the final composite.
    pub monitors_width: u32,
    /// Smallest monitor height.
    pub target_height: u32,
    /// One entry per monitor, left to right.
    pub segments: Vec<Segment>,
}

impl ResolvedLayout {
    /// Whether any gap columns must be cut out of the virtual desktop.
    pub fn has_gaps(&self) -> bool {
        self.width_with_gaps != self.monitors_width
    }
}

/// Where one monitor's pixels live, before and after gap removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub index: usize,
    /// Left edge on the virtual desktop (gaps included).
    pub virtual_x: u32,
    /// Left edge in the gap-free composite.
    pub output_x: u32,
    pub width: u32,
    /// Native height of the monitor. Composite rows stop at
    /// [`ResolvedLayout::target_height`] regardless.
    pub monitor_height: u32,
}
