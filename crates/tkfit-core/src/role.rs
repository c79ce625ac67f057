//! Player roles and the generation parameters attached to them

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Player archetype driving telemetry generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerRole {
    /// Interior player: lower intensity, confined to the key, scheduled rests
    Post,
    /// Ball handler: higher intensity, wide court coverage, no rests
    Guard,
}

impl PlayerRole {
    /// All roles in dashboard order
    pub const ALL: [PlayerRole; 2] = [PlayerRole::Post, PlayerRole::Guard];

    /// Lowercase identifier used in filenames
    pub fn slug(&self) -> &'static str {
        match self {
            PlayerRole::Post => "post",
            PlayerRole::Guard => "guard",
        }
    }

    /// Fixed generation parameters for this role
    pub fn profile(&self) -> RoleProfile {
        match self {
            PlayerRole::Post => RoleProfile {
                intensity_factor: 0.7,
                base_heart_rate: 85..95,
                base_muscle: 30..40,
                zone: CourtZone {
                    x: 0.6..0.9,
                    y: 0.4..0.6,
                },
                rest_windows: &POST_REST_WINDOWS,
            },
            PlayerRole::Guard => RoleProfile {
                intensity_factor: 0.9,
                base_heart_rate: 95..105,
                base_muscle: 40..50,
                zone: CourtZone {
                    x: 0.2..0.8,
                    y: 0.2..0.8,
                },
                rest_windows: &[],
            },
        }
    }
}

impl std::fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerRole::Post => write!(f, "Post"),
            PlayerRole::Guard => write!(f, "Guard"),
        }
    }
}

impl std::str::FromStr for PlayerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "post" | "pivot" | "center" => Ok(PlayerRole::Post),
            "guard" | "meneur" | "point_guard" => Ok(PlayerRole::Guard),
            other => Err(format!("unknown player role '{}'", other)),
        }
    }
}

/// Bench periods forced on a Post player, in elapsed seconds
const POST_REST_WINDOWS: [RestWindow; 2] = [
    RestWindow { start: 1200, end: 1380 },
    RestWindow { start: 2100, end: 2280 },
];

/// Half-open interval `[start, end)` of elapsed seconds spent resting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestWindow {
    pub start: u32,
    pub end: u32,
}

impl RestWindow {
    /// Check whether an elapsed second falls inside the window
    pub fn contains(&self, second: u32) -> bool {
        second >= self.start && second < self.end
    }

    /// Window length in seconds
    pub fn len_secs(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Human readable duration, e.g. "3 min"
    pub fn duration_label(&self) -> String {
        let secs = self.len_secs();
        if secs % 60 == 0 {
            format!("{} min", secs / 60)
        } else {
            format!("{} s", secs)
        }
    }
}

/// Normalized court area a role's positions are drawn from
#[derive(Debug, Clone, PartialEq)]
pub struct CourtZone {
    pub x: Range<f64>,
    pub y: Range<f64>,
}

impl CourtZone {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x.contains(&x) && self.y.contains(&y)
    }
}

/// Per-role generation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RoleProfile {
    /// Multiplier applied to sprint speeds
    pub intensity_factor: f64,
    /// Range the per-series baseline heart rate is drawn from (bpm)
    pub base_heart_rate: Range<u16>,
    /// Range the per-series baseline muscle activity is drawn from (%)
    pub base_muscle: Range<u8>,
    /// Court zone for positions
    pub zone: CourtZone,
    /// Scheduled rest windows, applied only when rest breaks are injected
    pub rest_windows: &'static [RestWindow],
}

impl RoleProfile {
    /// Rest window covering `second`, if any
    pub fn rest_window_at(&self, second: u32) -> Option<&RestWindow> {
        self.rest_windows.iter().find(|w| w.contains(second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_window_bounds() {
        let window = RestWindow { start: 1200, end: 1380 };
        assert!(!window.contains(1199));
        assert!(window.contains(1200));
        assert!(window.contains(1379));
        assert!(!window.contains(1380));
        assert_eq!(window.duration_label(), "3 min");
    }

    #[test]
    fn test_guard_has_no_rest_windows() {
        let profile = PlayerRole::Guard.profile();
        assert!(profile.rest_windows.is_empty());
        assert!((0..2880).all(|s| profile.rest_window_at(s).is_none()));
    }

    #[test]
    fn test_post_profile() {
        let profile = PlayerRole::Post.profile();
        assert_eq!(profile.intensity_factor, 0.7);
        assert_eq!(profile.rest_windows.len(), 2);
        assert_eq!(profile.rest_window_at(2150).map(|w| w.start), Some(2100));
        assert!(profile.zone.contains(0.75, 0.5));
        assert!(!profile.zone.contains(0.3, 0.5));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Post".parse::<PlayerRole>(), Ok(PlayerRole::Post));
        assert_eq!(" guard ".parse::<PlayerRole>(), Ok(PlayerRole::Guard));
        assert_eq!("Pivot".parse::<PlayerRole>(), Ok(PlayerRole::Post));
        assert!("forward".parse::<PlayerRole>().is_err());
        assert_eq!(PlayerRole::Guard.slug(), "guard");
    }
}
