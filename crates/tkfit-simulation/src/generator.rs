//! Synthetic telemetry generator with role-specific match patterns

use crate::movement::MovementPhase;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use tkfit_core::{
    config_error, PlayerRole, RoleProfile, Sample, Series, SeriesMetadata, TkfitResult,
};
use tracing::debug;

/// Regulation match length in minutes
pub const DEFAULT_MATCH_MINUTES: u32 = 48;

/// Seed used when none is supplied
pub const DEFAULT_SEED: u64 = 42;

/// Longest match the generator accepts, overtime included
pub const MAX_MATCH_MINUTES: u32 = 120;

/// Tip-off instant of the simulated match
pub fn default_match_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 10, 15)
        .and_then(|d| d.and_hms_opt(19, 0, 0))
        .unwrap_or_default()
}

/// Configuration for one generated series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Player archetype
    pub role: PlayerRole,
    /// Force the role's scheduled rest windows
    pub inject_rest_breaks: bool,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Match length in minutes
    pub match_minutes: u32,
    /// Timestamp of the first sample
    pub match_start: NaiveDateTime,
}

impl GeneratorConfig {
    /// Regulation-length match for a role
    pub fn new(role: PlayerRole, inject_rest_breaks: bool, seed: u64) -> Self {
        Self {
            role,
            inject_rest_breaks,
            seed,
            match_minutes: DEFAULT_MATCH_MINUTES,
            match_start: default_match_start(),
        }
    }

    /// Number of samples the series will hold
    pub fn total_seconds(&self) -> u32 {
        self.match_minutes * 60
    }

    pub fn validate(&self) -> TkfitResult<()> {
        if self.match_minutes == 0 || self.match_minutes > MAX_MATCH_MINUTES {
            return Err(config_error!(
                "match duration {} min outside 1-{} min",
                self.match_minutes,
                MAX_MATCH_MINUTES
            ));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(PlayerRole::Post, true, DEFAULT_SEED)
    }
}

/// Physiological and movement values for one second
#[derive(Debug, Clone, Copy)]
struct Exertion {
    speed: f64,
    acceleration: f64,
    heart_rate: u16,
    muscle_activity: f64,
}

/// Per-second telemetry generator
pub struct TelemetryGenerator {
    config: GeneratorConfig,
}

impl TelemetryGenerator {
    /// Create new generator with configuration
    pub fn new(config: GeneratorConfig) -> TkfitResult<Self> {
        config.validate()?;
        Ok(TelemetryGenerator { config })
    }

    /// Generate the full series; every call with the same configuration yields the same data
    pub fn generate(&self) -> Series {
        run(&self.config)
    }

    /// Get current configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

/// Generate a regulation-length series for a role
pub fn generate_series(role: PlayerRole, inject_rest_breaks: bool, seed: u64) -> Series {
    run(&GeneratorConfig::new(role, inject_rest_breaks, seed))
}

fn run(config: &GeneratorConfig) -> Series {
    let profile = config.role.profile();
    let mut rng = StdRng::seed_from_u64(config.seed);

    // Baselines are drawn once per series, before any per-second value
    let base_heart_rate = rng.gen_range(profile.base_heart_rate.clone());
    let base_muscle = rng.gen_range(profile.base_muscle.clone());

    let zone_x = Uniform::from(profile.zone.x.clone());
    let zone_y = Uniform::from(profile.zone.y.clone());

    let total_seconds = config.total_seconds();
    let mut samples = Vec::with_capacity(total_seconds as usize);

    for second in 0..total_seconds {
        let resting = config.inject_rest_breaks && profile.rest_window_at(second).is_some();
        let exertion = if resting {
            rest_exertion(&mut rng)
        } else {
            active_exertion(&mut rng, second, &profile, base_heart_rate, base_muscle)
        };

        let position_x = zone_x.sample(&mut rng);
        let position_y = zone_y.sample(&mut rng);

        samples.push(Sample {
            timestamp: config.match_start + Duration::seconds(i64::from(second)),
            speed: exertion.speed,
            acceleration: exertion.acceleration,
            heart_rate: exertion.heart_rate,
            muscle_activity: exertion.muscle_activity,
            position_x,
            position_y,
        });
    }

    debug!(
        role = %config.role,
        seed = config.seed,
        base_heart_rate,
        base_muscle,
        samples = samples.len(),
        "generated series"
    );

    let metadata = SeriesMetadata {
        role: config.role,
        seed: config.seed,
        rest_breaks_injected: config.inject_rest_breaks,
        match_start: config.match_start,
        base_heart_rate,
        base_muscle,
    };

    Series::from_contiguous(metadata, samples)
}

/// Bench values: near-zero movement, resting heart rate
fn rest_exertion(rng: &mut StdRng) -> Exertion {
    Exertion {
        speed: rng.gen_range(0.0..1.0),
        acceleration: rng.gen_range(0.0..0.5),
        heart_rate: rng.gen_range(65..75),
        muscle_activity: f64::from(rng.gen_range(5u8..10)),
    }
}

fn active_exertion(
    rng: &mut StdRng,
    second: u32,
    profile: &RoleProfile,
    base_heart_rate: u16,
    base_muscle: u8,
) -> Exertion {
    let phase = MovementPhase::from_second(second);

    let mut speed = rng.gen_range(phase.speed_range());
    if phase.scales_with_intensity() {
        speed *= profile.intensity_factor;
    }
    let acceleration = rng.gen_range(phase.acceleration_range());

    let heart_rate = (i32::from(base_heart_rate) + rng.gen_range(-5..15)).max(0) as u16;
    let muscle_activity = f64::from(base_muscle) + f64::from(rng.gen_range(0u8..20));

    Exertion {
        speed,
        acceleration,
        heart_rate,
        muscle_activity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tkfit_core::Metric;

    fn in_rest_window(second: usize) -> bool {
        (1200..1380).contains(&second) || (2100..2280).contains(&second)
    }

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    #[test]
    fn test_deterministic_for_same_inputs() {
        for role in PlayerRole::ALL {
            let first = generate_series(role, true, 42);
            let second = generate_series(role, true, 42);
            assert_eq!(first, second);
        }

        let other_seed = generate_series(PlayerRole::Guard, false, 43);
        assert_ne!(generate_series(PlayerRole::Guard, false, 42), other_seed);
    }

    #[test]
    fn test_series_length_and_spacing() {
        for role in PlayerRole::ALL {
            let series = generate_series(role, false, 1);
            assert_eq!(series.len(), 2880);

            let start = series.samples()[0].timestamp;
            assert_eq!(start, default_match_start());
            let last = series.samples()[2879].timestamp;
            assert_eq!((last - start).num_seconds(), 2879);
        }
    }

    #[test]
    fn test_post_rest_windows() {
        let series = generate_series(PlayerRole::Post, true, 42);

        for (second, sample) in series.samples().iter().enumerate() {
            if in_rest_window(second) {
                assert!(sample.speed < 1.0, "speed {} at {}", sample.speed, second);
                assert!(sample.muscle_activity < 10.0);
                assert!((65..75).contains(&sample.heart_rate));
                assert!(sample.acceleration < 0.5);
            }
        }
    }

    #[test]
    fn test_post_without_breaks_stays_active() {
        let series = generate_series(PlayerRole::Post, false, 42);
        let base = f64::from(series.metadata().base_muscle);

        for sample in &series.samples()[1200..1380] {
            assert!(sample.muscle_activity >= base);
        }
    }

    #[test]
    fn test_guard_never_rests() {
        // Rest breaks requested but the role defines none
        let series = generate_series(PlayerRole::Guard, true, 42);

        for sample in series.samples() {
            assert!(sample.heart_rate >= 90);
            assert!(sample.muscle_activity >= 40.0);
        }
    }

    #[test]
    fn test_positions_within_role_zone() {
        let post = generate_series(PlayerRole::Post, true, 5);
        let guard = generate_series(PlayerRole::Guard, false, 5);

        for sample in post.samples() {
            assert!((0.6..0.9).contains(&sample.position_x));
            assert!((0.4..0.6).contains(&sample.position_y));
        }
        for sample in guard.samples() {
            assert!((0.2..0.8).contains(&sample.position_x));
            assert!((0.2..0.8).contains(&sample.position_y));
        }
    }

    #[test]
    fn test_muscle_activity_tracks_baseline() {
        for role in PlayerRole::ALL {
            let series = generate_series(role, true, 9);
            let base = f64::from(series.metadata().base_muscle);
            assert!(role.profile().base_muscle.contains(&series.metadata().base_muscle));

            for (second, sample) in series.samples().iter().enumerate() {
                if series.is_rest_second(second as u32) {
                    continue;
                }
                assert!(sample.muscle_activity >= base);
                assert!(sample.muscle_activity < base + 20.0);
                assert!(sample.muscle_activity <= 100.0);
            }
        }
    }

    #[test]
    fn test_heart_rate_tracks_baseline() {
        let series = generate_series(PlayerRole::Guard, false, 11);
        let base = i32::from(series.metadata().base_heart_rate);

        for sample in series.samples() {
            let delta = i32::from(sample.heart_rate) - base;
            assert!((-5..15).contains(&delta));
        }
    }

    #[test]
    fn test_sprint_speed_scaled_by_intensity() {
        let post = generate_series(PlayerRole::Post, false, 3);

        for (second, sample) in post.samples().iter().enumerate() {
            if MovementPhase::from_second(second as u32) == MovementPhase::Sprint {
                assert!(sample.speed >= 15.0 * 0.7);
                assert!(sample.speed <= 20.0 * 0.7);
                assert!((5.0..8.0).contains(&sample.acceleration));
            }
        }
    }

    #[test]
    fn test_guard_faster_on_average() {
        for seed in 0..8 {
            let post = generate_series(PlayerRole::Post, true, seed);
            let guard = generate_series(PlayerRole::Guard, false, seed);
            assert!(mean(&guard.channel(Metric::Speed)) > mean(&post.channel(Metric::Speed)));
        }
    }

    #[test]
    fn test_custom_duration() {
        let mut config = GeneratorConfig::new(PlayerRole::Guard, false, 42);
        config.match_minutes = 10;
        let generator = TelemetryGenerator::new(config).unwrap();

        assert_eq!(generator.generate().len(), 600);
    }

    #[test]
    fn test_rejects_zero_duration() {
        let mut config = GeneratorConfig::default();
        config.match_minutes = 0;
        assert!(TelemetryGenerator::new(config).is_err());
    }

    #[test]
    fn test_generator_matches_free_function() {
        let config = GeneratorConfig::new(PlayerRole::Post, true, 42);
        let generator = TelemetryGenerator::new(config).unwrap();
        assert_eq!(generator.generate(), generate_series(PlayerRole::Post, true, 42));
    }
}
