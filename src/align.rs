//! Alignment policy: which part of the source survives when aspect ratios differ.
//!
//! A single enum value replaces the historical set of boolean switches
//! (`black_bars`, `prefer_center`, `prefer_left`, ...). [`Alignment::from_flags`]
//! still accepts that surface for the CLI and rejects more than one switch.
//!
//! Axis rules:
//!
//! | Policy | Valid when the source is... |
//! |---|---|
//! | `Center`, `BlackBars` | either |
//! | `Left`, `Right` | wider than the target (crop along width) |
//! | `Top`, `Bottom` | taller than the target (crop along height) |

use crate::error::{ConfigurationError, SourceShape};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    /// Crop symmetrically around the image center.
    #[default]
    Center,
    /// Keep the left edge, crop from the right.
    Left,
    /// Keep the right edge, crop from the left.
    Right,
    /// Keep the top edge, crop from the bottom.
    Top,
    /// Keep the bottom edge, crop from the top.
    Bottom,
    /// Never crop: letterbox with solid black instead.
    BlackBars,
}

/// Boolean policy switches as exposed by the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentFlags {
    pub black_bars: bool,
    pub prefer_center: bool,
    pub prefer_left: bool,
    pub prefer_right: bool,
    pub prefer_top: bool,
    pub prefer_bottom: bool,
}

impl Alignment {
    /// Collapse exclusive switches into one policy.
    ///
    /// Returns `Ok(None)` when no switch is set so callers can fall back to a
    /// configured or default policy. Two or more switches is an error.
    pub fn from_flags(flags: AlignmentFlags) -> Result<Option<Self>, ConfigurationError> {
        let set: Vec<Alignment> = [
            (flags.black_bars, Alignment::BlackBars),
            (flags.prefer_center, Alignment::Center),
            (flags.prefer_left, Alignment::Left),
            (flags.prefer_right, Alignment::Right),
            (flags.prefer_top, Alignment::Top),
            (flags.prefer_bottom, Alignment::Bottom),
        ]
        .into_iter()
        .filter_map(|(on, policy)| on.then_some(policy))
        .collect();

        match set.as_slice() {
            [] => Ok(None),
            [single] => Ok(Some(*single)),
            _ => Err(ConfigurationError::ConflictingAlignment(set)),
        }
    }

    /// Check that this policy makes sense for a source of the given shape.
    pub fn check_axis(self, shape: SourceShape) -> Result<(), ConfigurationError> {
        let compatible = match (self, shape) {
            (Alignment::Top | Alignment::Bottom, SourceShape::Wider) => false,
            (Alignment::Left | Alignment::Right, SourceShape::Taller) => false,
            _ => true,
        };
        if compatible {
            Ok(())
        } else {
            Err(ConfigurationError::IncompatibleAlignment {
                alignment: self,
                shape,
            })
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alignment::Center => "center",
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Top => "top",
            Alignment::Bottom => "bottom",
            Alignment::BlackBars => "black-bars",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_means_no_explicit_choice() {
        assert_eq!(Alignment::from_flags(AlignmentFlags::default()), Ok(None));
    }

    #[test]
    fn default_policy_is_center() {
        assert_eq!(Alignment::default(), Alignment::Center);
    }

    #[test]
    fn single_flag_selects_policy() {
        let flags = AlignmentFlags {
            prefer_bottom: true,
            ..Default::default()
        };
        assert_eq!(Alignment::from_flags(flags), Ok(Some(Alignment::Bottom)));

        let flags = AlignmentFlags {
            black_bars: true,
            ..Default::default()
        };
        assert_eq!(Alignment::from_flags(flags), Ok(Some(Alignment::BlackBars)));
    }

    #[test]
    fn any_two_flags_conflict() {
        let pairs = [
            AlignmentFlags {
                prefer_left: true,
                prefer_right: true,
                ..Default::default()
            },
            AlignmentFlags {
                black_bars: true,
                prefer_center: true,
                ..Default::default()
            },
            AlignmentFlags {
                prefer_top: true,
                prefer_left: true,
                ..Default::default()
            },
        ];
        for flags in pairs {
            assert!(matches!(
                Alignment::from_flags(flags),
                Err(ConfigurationError::ConflictingAlignment(ref v)) if v.len() == 2
            ));
        }
    }

    #[test]
    fn all_flags_conflict() {
        let flags = AlignmentFlags {
            black_bars: true,
            prefer_center: true,
            prefer_left: true,
            prefer_right: true,
            prefer_top: true,
            prefer_bottom: true,
        };
        assert!(matches!(
            Alignment::from_flags(flags),
            Err(ConfigurationError::ConflictingAlignment(ref v)) if v.len() == 6
        ));
    }

    #[test]
    fn vertical_preferences_reject_wider_source() {
        for policy in [Alignment::Top, Alignment::Bottom] {
            assert!(policy.check_axis(SourceShape::Wider).is_err());
            assert!(policy.check_axis(SourceShape::Taller).is_ok());
        }
    }

    #[test]
    fn horizontal_preferences_reject_taller_source() {
        for policy in [Alignment::Left, Alignment::Right] {
            assert!(policy.check_axis(SourceShape::Taller).is_err());
            assert!(policy.check_axis(SourceShape::Wider).is_ok());
        }
    }

    #[test]
    fn center_and_black_bars_fit_any_shape() {
        for policy in [Alignment::Center, Alignment::BlackBars] {
            assert!(policy.check_axis(SourceShape::Wider).is_ok());
            assert!(policy.check_axis(SourceShape::Taller).is_ok());
        }
    }

    #[test]
    fn deserializes_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            alignment: Alignment,
        }
        let w: Wrapper = toml::from_str(r#"alignment = "black-bars""#).unwrap();
        assert_eq!(w.alignment, Alignment::BlackBars);
    }
}
