//! Time annotations for charts: rest periods and muscle-activity peaks

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tkfit_core::{Metric, RestWindow, Series};

/// Quantile used to flag muscle-activity peaks
pub const PEAK_QUANTILE: f64 = 0.9;

/// A rest window clipped to the series and resolved to wall-clock time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestPeriod {
    pub window: RestWindow,
    #[serde(with = "tkfit_core::timestamp_format")]
    pub starts_at: NaiveDateTime,
    #[serde(with = "tkfit_core::timestamp_format")]
    pub ends_at: NaiveDateTime,
    /// e.g. "3 min"
    pub duration: String,
}

/// Sample flagged as a muscle-activity peak
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Elapsed seconds from match start
    pub second: usize,
    pub value: f64,
}

/// Rest periods to shade on the series' charts
pub fn rest_periods(series: &Series) -> Vec<RestPeriod> {
    let len = series.len() as u32;
    let samples = series.samples();

    series
        .active_rest_windows()
        .iter()
        .filter(|w| w.start < len)
        .map(|w| {
            let window = RestWindow {
                start: w.start,
                end: w.end.min(len),
            };
            let last = (window.end - 1) as usize;
            RestPeriod {
                window,
                starts_at: samples[window.start as usize].timestamp,
                ends_at: samples[last].timestamp + chrono::Duration::seconds(1),
                duration: window.duration_label(),
            }
        })
        .collect()
}

/// Quantile with linear interpolation between order statistics
///
/// Returns `None` for empty input or `q` outside `[0, 1]`.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Samples whose muscle activity is strictly above the given quantile
pub fn muscle_peaks(series: &Series, q: f64) -> Vec<Peak> {
    let activity = series.channel(Metric::MuscleActivity);
    let Some(threshold) = quantile(&activity, q) else {
        return Vec::new();
    };

    activity
        .iter()
        .enumerate()
        .filter(|(_, &value)| value > threshold)
        .map(|(second, &value)| Peak { second, value })
        .collect()
}
