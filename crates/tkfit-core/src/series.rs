//! Series: per-second telemetry container for one player

use crate::error::{TkfitError, TkfitResult};
use crate::role::{PlayerRole, RestWindow};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Format used for sample timestamps in exports
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One second of match time for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    /// km/h
    pub speed: f64,
    /// m/s²
    pub acceleration: f64,
    /// bpm
    pub heart_rate: u16,
    /// Percent of maximal intensity
    pub muscle_activity: f64,
    /// Normalized court length coordinate
    pub position_x: f64,
    /// Normalized court width coordinate
    pub position_y: f64,
}

/// Scalar channels of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Speed,
    Acceleration,
    HeartRate,
    MuscleActivity,
    PositionX,
    PositionY,
}

impl Metric {
    pub fn value(&self, sample: &Sample) -> f64 {
        match self {
            Metric::Speed => sample.speed,
            Metric::Acceleration => sample.acceleration,
            Metric::HeartRate => f64::from(sample.heart_rate),
            Metric::MuscleActivity => sample.muscle_activity,
            Metric::PositionX => sample.position_x,
            Metric::PositionY => sample.position_y,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Speed => "km/h",
            Metric::Acceleration => "m/s²",
            Metric::HeartRate => "bpm",
            Metric::MuscleActivity => "%",
            Metric::PositionX | Metric::PositionY => "",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Metric::Speed => "Speed",
            Metric::Acceleration => "Acceleration",
            Metric::HeartRate => "Heart rate",
            Metric::MuscleActivity => "Muscle activity",
            Metric::PositionX => "Position X",
            Metric::PositionY => "Position Y",
        };
        write!(f, "{}", name)
    }
}

/// Generation context recorded alongside the samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMetadata {
    pub role: PlayerRole,
    pub seed: u64,
    pub rest_breaks_injected: bool,
    #[serde(with = "timestamp_format")]
    pub match_start: NaiveDateTime,
    /// Baseline heart rate drawn once for the series
    pub base_heart_rate: u16,
    /// Baseline muscle activity drawn once for the series
    pub base_muscle: u8,
}

/// Ordered, one-sample-per-second telemetry for a whole match
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    metadata: SeriesMetadata,
    samples: Vec<Sample>,
}

impl Series {
    /// Create a series, checking that samples are contiguous seconds from match start
    pub fn new(metadata: SeriesMetadata, samples: Vec<Sample>) -> TkfitResult<Self> {
        if samples.is_empty() {
            return Err(TkfitError::InvalidSeries {
                reason: "series must contain at least one sample".to_string(),
            });
        }

        for (second, sample) in samples.iter().enumerate() {
            let expected = metadata.match_start + Duration::seconds(second as i64);
            if sample.timestamp != expected {
                return Err(TkfitError::InvalidSeries {
                    reason: format!(
                        "sample {} has timestamp {}, expected {}",
                        second,
                        sample.timestamp.format(TIMESTAMP_FORMAT),
                        expected.format(TIMESTAMP_FORMAT)
                    ),
                });
            }
        }

        Ok(Series { metadata, samples })
    }

    /// Wrap samples produced one per second from `metadata.match_start`
    ///
    /// Generators build timestamps by construction, so the per-sample check of
    /// [`Series::new`] only runs in debug builds here.
    pub fn from_contiguous(metadata: SeriesMetadata, samples: Vec<Sample>) -> Self {
        debug_assert!(samples.iter().enumerate().all(|(second, sample)| {
            sample.timestamp == metadata.match_start + Duration::seconds(second as i64)
        }));
        Series { metadata, samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn metadata(&self) -> &SeriesMetadata {
        &self.metadata
    }

    pub fn role(&self) -> PlayerRole {
        self.metadata.role
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Sample at an elapsed second from match start
    pub fn sample_at(&self, second: usize) -> Option<&Sample> {
        self.samples.get(second)
    }

    /// Extract one channel as a vector
    pub fn channel(&self, metric: Metric) -> Vec<f64> {
        self.samples.iter().map(|s| metric.value(s)).collect()
    }

    /// Elapsed minutes for each sample, for plotting
    pub fn elapsed_minutes(&self) -> Vec<f64> {
        (0..self.samples.len()).map(|s| s as f64 / 60.0).collect()
    }

    /// Rest windows in force for this series
    pub fn active_rest_windows(&self) -> &'static [RestWindow] {
        if self.metadata.rest_breaks_injected {
            self.metadata.role.profile().rest_windows
        } else {
            &[]
        }
    }

    /// Whether the player was benched at `second`
    pub fn is_rest_second(&self, second: u32) -> bool {
        self.active_rest_windows().iter().any(|w| w.contains(second))
    }
}

/// Serde adapter for timestamps in [`TIMESTAMP_FORMAT`]
pub mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
