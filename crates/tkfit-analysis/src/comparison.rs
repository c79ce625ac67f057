//! Side-by-side comparison of players

use crate::metrics::SessionMetrics;
use serde::{Deserialize, Serialize};
use tkfit_core::{PlayerRole, Series};

/// Figures compared between players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonMetric {
    AverageSpeed,
    AverageHeartRate,
    AverageMuscleActivity,
    Distance,
}

impl ComparisonMetric {
    pub const ALL: [ComparisonMetric; 4] = [
        ComparisonMetric::AverageSpeed,
        ComparisonMetric::AverageHeartRate,
        ComparisonMetric::AverageMuscleActivity,
        ComparisonMetric::Distance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ComparisonMetric::AverageSpeed => "Avg speed (km/h)",
            ComparisonMetric::AverageHeartRate => "Avg HR (bpm)",
            ComparisonMetric::AverageMuscleActivity => "Avg muscle activity (%)",
            ComparisonMetric::Distance => "Distance (m)",
        }
    }

    pub fn value(&self, metrics: &SessionMetrics) -> f64 {
        match self {
            ComparisonMetric::AverageSpeed => metrics.speed.mean,
            ComparisonMetric::AverageHeartRate => metrics.heart_rate.mean,
            ComparisonMetric::AverageMuscleActivity => metrics.muscle_activity.mean,
            ComparisonMetric::Distance => metrics.distance_m,
        }
    }
}

/// Metrics for one compared player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub label: String,
    pub role: PlayerRole,
    pub metrics: SessionMetrics,
}

/// One metric across all compared players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub metric: ComparisonMetric,
    /// One value per player, in player order
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerComparison {
    pub players: Vec<PlayerSummary>,
}

impl PlayerComparison {
    pub fn new<'a, I>(players: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a Series)>,
    {
        let players = players
            .into_iter()
            .map(|(label, series)| PlayerSummary {
                label: label.to_string(),
                role: series.role(),
                metrics: SessionMetrics::from_series(series),
            })
            .collect();

        Self { players }
    }

    pub fn rows(&self) -> Vec<ComparisonRow> {
        ComparisonMetric::ALL
            .iter()
            .map(|&metric| ComparisonRow {
                metric,
                values: self.players.iter().map(|p| metric.value(&p.metrics)).collect(),
            })
            .collect()
    }

    /// Label of the player with the highest value for `metric`
    pub fn leader(&self, metric: ComparisonMetric) -> Option<&str> {
        self.players
            .iter()
            .max_by(|a, b| metric.value(&a.metrics).total_cmp(&metric.value(&b.metrics)))
            .map(|p| p.label.as_str())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
