pub mod generator;
pub mod reach;
pub mod trending;
pub mod viral;

pub use generator::{ClipStats, GeneratorConfig, MetricGenerator, RawMetrics, Span, StreamStats};
pub use reach::{ReachConfig, ReachEstimator};
pub use trending::{TrendingConfig, TrendingIndicators, TrendingRankAssigner};
pub use viral::{ViralScoreCalculator, ViralWeights};

use crate::round2;

/// Daily listener series ramping linearly up to the current count; the last
/// entry equals `current_listeners`.
pub fn listener_trend(current_listeners: u64, days: usize) -> Vec<u64> {
    (0..days)
        .map(|day| (current_listeners as f64 * (day + 1) as f64 / days as f64) as u64)
        .collect()
}

pub fn weekly_growth(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    round2((current - previous) / previous * 100.0)
}

pub fn view_to_play_ratio(metrics: &RawMetrics) -> f64 {
    if metrics.streaming.plays == 0 {
        return 0.0;
    }
    metrics.clips.views as f64 / metrics.streaming.plays as f64
}
