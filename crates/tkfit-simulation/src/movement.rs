//! Movement phases of the repeating two-minute play cycle

use std::ops::Range;

/// Length of one movement cycle in seconds
pub const CYCLE_SECONDS: u32 = 120;

/// Movement category simulated for a given second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementPhase {
    /// Seconds 0..30 of the cycle
    Sprint,
    /// Seconds 30..60 of the cycle
    FastMove,
    /// Seconds 60..90 of the cycle
    Walk,
    /// Seconds 90..120 of the cycle
    DefensiveStance,
}

impl MovementPhase {
    /// Phases in cycle order
    pub const ALL: [MovementPhase; 4] = [
        MovementPhase::Sprint,
        MovementPhase::FastMove,
        MovementPhase::Walk,
        MovementPhase::DefensiveStance,
    ];

    /// Classify an elapsed second by its position in the cycle
    pub fn from_second(second: u32) -> Self {
        match second % CYCLE_SECONDS {
            0..=29 => MovementPhase::Sprint,
            30..=59 => MovementPhase::FastMove,
            60..=89 => MovementPhase::Walk,
            _ => MovementPhase::DefensiveStance,
        }
    }

    /// Seconds of the cycle covered by this phase
    pub fn cycle_span(&self) -> Range<u32> {
        match self {
            MovementPhase::Sprint => 0..30,
            MovementPhase::FastMove => 30..60,
            MovementPhase::Walk => 60..90,
            MovementPhase::DefensiveStance => 90..CYCLE_SECONDS,
        }
    }

    /// Speed range in km/h, before any intensity scaling
    pub fn speed_range(&self) -> Range<f64> {
        match self {
            MovementPhase::Sprint => 15.0..20.0,
            MovementPhase::FastMove => 8.0..12.0,
            MovementPhase::Walk => 3.0..6.0,
            MovementPhase::DefensiveStance => 0.5..2.0,
        }
    }

    /// Acceleration range in m/s²
    pub fn acceleration_range(&self) -> Range<f64> {
        match self {
            MovementPhase::Sprint => 5.0..8.0,
            MovementPhase::FastMove => 2.0..4.0,
            MovementPhase::Walk => 1.0..2.0,
            MovementPhase::DefensiveStance => 0.2..1.0,
        }
    }

    /// Only sprints are scaled by the role's intensity factor
    pub fn scales_with_intensity(&self) -> bool {
        matches!(self, MovementPhase::Sprint)
    }

    pub fn description(&self) -> &'static str {
        match self {
            MovementPhase::Sprint => "Sprint",
            MovementPhase::FastMove => "Fast move",
            MovementPhase::Walk => "Walk",
            MovementPhase::DefensiveStance => "Defensive stance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(MovementPhase::from_second(0), MovementPhase::Sprint);
        assert_eq!(MovementPhase::from_second(29), MovementPhase::Sprint);
        assert_eq!(MovementPhase::from_second(30), MovementPhase::FastMove);
        assert_eq!(MovementPhase::from_second(60), MovementPhase::Walk);
        assert_eq!(MovementPhase::from_second(90), MovementPhase::DefensiveStance);
        assert_eq!(MovementPhase::from_second(119), MovementPhase::DefensiveStance);
        assert_eq!(MovementPhase::from_second(120), MovementPhase::Sprint);
        assert_eq!(MovementPhase::from_second(2879), MovementPhase::DefensiveStance);
    }

    #[test]
    fn test_cycle_spans_agree_with_classification() {
        for phase in MovementPhase::ALL {
            let span = phase.cycle_span();
            assert!(span.clone().all(|s| MovementPhase::from_second(s) == phase));
            assert!(span
                .clone()
                .all(|s| MovementPhase::from_second(s + CYCLE_SECONDS) == phase));
        }
        assert_eq!(MovementPhase::DefensiveStance.description(), "Defensive stance");
    }

    #[test]
    fn test_only_sprint_scales() {
        assert!(MovementPhase::Sprint.scales_with_intensity());
        assert!(!MovementPhase::Walk.scales_with_intensity());
    }
}
