//! Court geometry and projection of normalized positions
//!
//! Dimensions follow an NBA court in feet, with the length along x.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tkfit_core::{PlayerRole, Series};

pub const COURT_LENGTH_FT: f64 = 94.0;
pub const COURT_WIDTH_FT: f64 = 50.0;

/// Every n-th sample is plotted on the court view
pub const POSITION_STRIDE: usize = 30;

const KEY_LENGTH_FT: f64 = 19.0;
const KEY_WIDTH_FT: f64 = 16.0;
const RIM_OFFSET_FT: f64 = 5.25;
const RIM_RADIUS_FT: f64 = 0.75;
const CENTER_CIRCLE_RADIUS_FT: f64 = 6.0;
const THREE_POINT_RADIUS_FT: f64 = 23.5;

/// Axis-aligned rectangle in court feet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CourtRect {
    /// Closed outline, starting and ending at the origin corner
    pub fn outline(&self) -> Vec<[f64; 2]> {
        vec![
            [self.x, self.y],
            [self.x + self.width, self.y],
            [self.x + self.width, self.y + self.height],
            [self.x, self.y + self.height],
            [self.x, self.y],
        ]
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// A painted line of the court
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CourtMarking {
    Boundary(CourtRect),
    Key(CourtRect),
    HalfCourtLine,
    /// Arc from `start_deg` to `end_deg`, counter-clockwise
    Arc {
        center: [f64; 2],
        radius: f64,
        start_deg: f64,
        end_deg: f64,
    },
    Rim {
        center: [f64; 2],
    },
}

impl CourtMarking {
    /// Polyline approximating the marking
    pub fn points(&self) -> Vec<[f64; 2]> {
        match *self {
            CourtMarking::Boundary(rect) | CourtMarking::Key(rect) => rect.outline(),
            CourtMarking::HalfCourtLine => vec![
                [COURT_LENGTH_FT / 2.0, 0.0],
                [COURT_LENGTH_FT / 2.0, COURT_WIDTH_FT],
            ],
            CourtMarking::Arc {
                center,
                radius,
                start_deg,
                end_deg,
            } => arc_points(center, radius, start_deg, end_deg, 64),
            CourtMarking::Rim { center } => arc_points(center, RIM_RADIUS_FT, 0.0, 360.0, 24),
        }
    }
}

fn arc_points(
    center: [f64; 2],
    radius: f64,
    start_deg: f64,
    end_deg: f64,
    steps: usize,
) -> Vec<[f64; 2]> {
    (0..=steps)
        .map(|i| {
            let deg = start_deg + (end_deg - start_deg) * i as f64 / steps as f64;
            let rad = deg * PI / 180.0;
            [center[0] + radius * rad.cos(), center[1] + radius * rad.sin()]
        })
        .collect()
}

/// All markings of a full court
pub fn court_markings() -> Vec<CourtMarking> {
    let mid_y = COURT_WIDTH_FT / 2.0;
    let key_y = mid_y - KEY_WIDTH_FT / 2.0;
    let left_rim = [RIM_OFFSET_FT, mid_y];
    let right_rim = [COURT_LENGTH_FT - RIM_OFFSET_FT, mid_y];

    vec![
        CourtMarking::Boundary(CourtRect {
            x: 0.0,
            y: 0.0,
            width: COURT_LENGTH_FT,
            height: COURT_WIDTH_FT,
        }),
        CourtMarking::HalfCourtLine,
        CourtMarking::Arc {
            center: [COURT_LENGTH_FT / 2.0, mid_y],
            radius: CENTER_CIRCLE_RADIUS_FT,
            start_deg: 0.0,
            end_deg: 360.0,
        },
        CourtMarking::Key(CourtRect {
            x: 0.0,
            y: key_y,
            width: KEY_LENGTH_FT,
            height: KEY_WIDTH_FT,
        }),
        CourtMarking::Key(CourtRect {
            x: COURT_LENGTH_FT - KEY_LENGTH_FT,
            y: key_y,
            width: KEY_LENGTH_FT,
            height: KEY_WIDTH_FT,
        }),
        CourtMarking::Rim { center: left_rim },
        CourtMarking::Rim { center: right_rim },
        CourtMarking::Arc {
            center: left_rim,
            radius: THREE_POINT_RADIUS_FT,
            start_deg: -90.0,
            end_deg: 90.0,
        },
        CourtMarking::Arc {
            center: right_rim,
            radius: THREE_POINT_RADIUS_FT,
            start_deg: 90.0,
            end_deg: 270.0,
        },
    ]
}

/// Highlighted area where a role is expected to operate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneHighlight {
    pub label: String,
    pub area: CourtRect,
}

pub fn role_zone(role: PlayerRole) -> ZoneHighlight {
    match role {
        PlayerRole::Post => ZoneHighlight {
            label: "POST ZONE".to_string(),
            area: CourtRect {
                x: 0.0,
                y: COURT_WIDTH_FT / 2.0 - KEY_WIDTH_FT / 2.0,
                width: KEY_LENGTH_FT,
                height: KEY_WIDTH_FT,
            },
        },
        PlayerRole::Guard => ZoneHighlight {
            label: "GUARD ZONE".to_string(),
            area: CourtRect {
                x: COURT_LENGTH_FT / 2.0 - 15.0,
                y: 0.0,
                width: 30.0,
                height: COURT_WIDTH_FT,
            },
        },
    }
}

/// Player position in court feet, colored by muscle intensity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtPoint {
    pub x_ft: f64,
    pub y_ft: f64,
    pub muscle_activity: f64,
}

/// Scale normalized positions to the court, keeping every `stride`-th sample
pub fn project_positions(series: &Series, stride: usize) -> Vec<CourtPoint> {
    series
        .samples()
        .iter()
        .step_by(stride.max(1))
        .map(|s| CourtPoint {
            x_ft: s.position_x * COURT_LENGTH_FT,
            y_ft: s.position_y * COURT_WIDTH_FT,
            muscle_activity: s.muscle_activity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tkfit_simulation::generate_series;

    #[test]
    fn test_projection_stride_and_bounds() {
        let series = generate_series(PlayerRole::Guard, false, 42);
        let points = project_positions(&series, POSITION_STRIDE);

        assert_eq!(points.len(), 96);
        assert_eq!(points[1].x_ft, series.samples()[30].position_x * COURT_LENGTH_FT);
        for p in &points {
            assert!((0.0..=COURT_LENGTH_FT).contains(&p.x_ft));
            assert!((0.0..=COURT_WIDTH_FT).contains(&p.y_ft));
        }
    }

    #[test]
    fn test_zero_stride_keeps_everything() {
        let series = generate_series(PlayerRole::Post, true, 1);
        assert_eq!(project_positions(&series, 0).len(), series.len());
    }

    #[test]
    fn test_post_points_in_attacking_half() {
        let series = generate_series(PlayerRole::Post, true, 42);
        for p in project_positions(&series, POSITION_STRIDE) {
            assert!(p.x_ft >= 0.6 * COURT_LENGTH_FT);
            assert!(p.x_ft <= 0.9 * COURT_LENGTH_FT);
        }
    }

    #[test]
    fn test_court_markings() {
        let markings = court_markings();
        assert_eq!(markings.len(), 9);

        let outline = markings[0].points();
        assert_eq!(outline.first(), outline.last());

        // Left three-point arc tops out 23.5 ft above the rim
        let arc = markings[7].points();
        let top = arc.iter().fold(f64::NEG_INFINITY, |a, p| a.max(p[1]));
        assert!((top - (25.0 + 23.5)).abs() < 1e-9);
    }

    #[test]
    fn test_role_zones() {
        assert!(role_zone(PlayerRole::Post).area.contains(10.0, 25.0));
        assert!(role_zone(PlayerRole::Guard).area.contains(47.0, 5.0));
        assert!(!role_zone(PlayerRole::Guard).area.contains(10.0, 25.0));
    }
}
