//! Summary metrics over a telemetry series

use serde::{Deserialize, Serialize};
use tkfit_core::{Metric, Series};

/// Basic statistics for one metric channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub std_dev: f64,
}

impl ChannelSummary {
    pub fn calculate(data: &[f64]) -> Self {
        if data.is_empty() {
            return Self {
                mean: 0.0,
                max: 0.0,
                min: 0.0,
                std_dev: 0.0,
            };
        }

        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;

        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        let min = data.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max = data.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));

        Self {
            mean,
            max,
            min,
            std_dev: variance.sqrt(),
        }
    }

    pub fn of(series: &Series, metric: Metric) -> Self {
        Self::calculate(&series.channel(metric))
    }
}

/// Headline figures shown for the selected player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    /// km/h
    pub speed: ChannelSummary,
    /// bpm
    pub heart_rate: ChannelSummary,
    /// %
    pub muscle_activity: ChannelSummary,
    /// m/s²
    pub acceleration: ChannelSummary,
    /// Metres covered over the match
    pub distance_m: f64,
}

impl SessionMetrics {
    pub fn from_series(series: &Series) -> Self {
        Self {
            speed: ChannelSummary::of(series, Metric::Speed),
            heart_rate: ChannelSummary::of(series, Metric::HeartRate),
            muscle_activity: ChannelSummary::of(series, Metric::MuscleActivity),
            acceleration: ChannelSummary::of(series, Metric::Acceleration),
            distance_m: distance_m(series),
        }
    }
}

/// Distance in metres, integrating one-second speed samples given in km/h
pub fn distance_m(series: &Series) -> f64 {
    let total_kmh: f64 = series.samples().iter().map(|s| s.speed).sum();
    total_kmh / 3600.0 * 1000.0
}
