//! TKFIT-Analysis: metric aggregation for the telemetry dashboard
//!
//! Summary statistics, chart annotations, court projection, player
//! comparison and training recommendations.

pub mod comparison;
pub mod court;
pub mod metrics;
pub mod recommendations;
pub mod timeline;

pub use comparison::{ComparisonMetric, ComparisonRow, PlayerComparison, PlayerSummary};
pub use court::{
    court_markings, project_positions, role_zone, CourtMarking, CourtPoint, CourtRect,
    ZoneHighlight, COURT_LENGTH_FT, COURT_WIDTH_FT, POSITION_STRIDE,
};
pub use metrics::{distance_m, ChannelSummary, SessionMetrics};
pub use recommendations::{performance_differences, AdviceBlock, Recommendation};
pub use timeline::{muscle_peaks, quantile, rest_periods, Peak, RestPeriod, PEAK_QUANTILE};
