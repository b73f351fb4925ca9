use encore_analytics::config::EngineConfig;
use encore_analytics::metrics::{
    listener_trend, view_to_play_ratio, weekly_growth, ClipStats, GeneratorConfig,
    MetricGenerator, RawMetrics, ReachConfig, ReachEstimator, StreamStats, TrendingConfig,
    TrendingRankAssigner, ViralScoreCalculator, ViralWeights,
};
use encore_analytics::{analyze_entity, LISTENER_TREND_DAYS};

fn fixed_metrics() -> RawMetrics {
    RawMetrics {
        streaming: StreamStats {
            plays: 10_000,
            listeners: 5_000,
            growth_pct: 0.0,
        },
        clips: ClipStats {
            views: 20_000,
            uses: 100,
            growth_pct: 0.0,
        },
        radio: StreamStats {
            plays: 8_000,
            listeners: 500,
            growth_pct: 0.0,
        },
    }
}

fn zero_metrics() -> RawMetrics {
    RawMetrics {
        streaming: StreamStats {
            plays: 0,
            listeners: 0,
            growth_pct: 0.0,
        },
        clips: ClipStats {
            views: 0,
            uses: 0,
            growth_pct: 0.0,
        },
        radio: StreamStats {
            plays: 0,
            listeners: 0,
            growth_pct: 0.0,
        },
    }
}

fn saturated_metrics() -> RawMetrics {
    RawMetrics {
        streaming: StreamStats {
            plays: 2_000_000,
            listeners: 1_300_000,
            growth_pct: 0.0,
        },
        clips: ClipStats {
            views: 5_000_000,
            uses: 1_000,
            growth_pct: 0.0,
        },
        radio: StreamStats {
            plays: 500_000,
            listeners: 350_000,
            growth_pct: 0.0,
        },
    }
}

#[test]
fn generator_is_deterministic_for_same_id_and_age() {
    let generator = MetricGenerator::new(GeneratorConfig::default());

    let first = generator.generate(42, 10.0);
    let second = generator.generate(42, 10.0);

    assert_eq!(first, second);
}

#[test]
fn generator_streams_differ_across_ids() {
    let generator = MetricGenerator::new(GeneratorConfig::default());

    let a = generator.generate(1, 10.0);
    let b = generator.generate(2, 10.0);

    assert_ne!(a, b);
}

#[test]
fn generator_clamps_age_below_one_day() {
    let generator = MetricGenerator::new(GeneratorConfig::default());

    let fresh = generator.generate(7, 0.25);
    let day_old = generator.generate(7, 1.0);

    assert_eq!(fresh, day_old);
}

#[test]
fn generator_counts_grow_with_age() {
    let generator = MetricGenerator::new(GeneratorConfig::default());

    let young = generator.generate(99, 1.0);
    let old = generator.generate(99, 100.0);

    assert!(old.streaming.plays > young.streaming.plays);
    assert!(old.clips.views > young.clips.views);
    assert!(old.radio.plays > young.radio.plays);
    // Clip uses ignore catalog age entirely.
    assert_eq!(old.clips.uses, young.clips.uses);
}

#[test]
fn viral_score_matches_weighted_formula() {
    let calculator = ViralScoreCalculator::new(ViralWeights::default());

    // 1000 plays/day saturates at 30, 2000 views/day at 30, 500 listeners/day
    // at 20; ten days of age earn a third of the longevity bonus.
    let score = calculator.score(&fixed_metrics(), 10.0);

    assert!((score - 86.67).abs() < 1e-9);
}

#[test]
fn viral_score_caps_at_100() {
    let calculator = ViralScoreCalculator::new(ViralWeights::default());

    let score = calculator.score(&saturated_metrics(), 60.0);

    assert!((score - 100.0).abs() < 1e-9);
}

#[test]
fn viral_score_stays_in_bounds_across_inputs() {
    let generator = MetricGenerator::new(GeneratorConfig::default());
    let calculator = ViralScoreCalculator::new(ViralWeights::default());

    for id in 1..=20u64 {
        for age in [0.0, 1.0, 7.0, 30.0, 365.0] {
            let metrics = generator.generate(id, age);
            let score = calculator.score(&metrics, age);
            assert!((0.0..=100.0).contains(&score), "score {} out of bounds", score);
        }
    }
}

#[test]
fn viral_score_zero_age_is_treated_as_one_day() {
    let calculator = ViralScoreCalculator::new(ViralWeights::default());
    let metrics = fixed_metrics();

    assert!((calculator.score(&metrics, 0.0) - calculator.score(&metrics, 1.0)).abs() < 1e-9);
}

#[test]
fn viral_score_longevity_bonus_is_non_decreasing_when_engagement_saturates() {
    let calculator = ViralScoreCalculator::new(ViralWeights::default());
    let metrics = saturated_metrics();

    let young = calculator.score(&metrics, 10.0);
    let old = calculator.score(&metrics, 40.0);

    assert!(old >= young);
    // The longevity bonus caps at 20 points from day 30 onward.
    assert!((calculator.score(&metrics, 40.0) - calculator.score(&metrics, 400.0)).abs() < 1e-9);
}

#[test]
fn viral_score_of_silent_entity_is_only_longevity() {
    let calculator = ViralScoreCalculator::new(ViralWeights::default());

    let score = calculator.score(&zero_metrics(), 1.0);

    assert!((score - 0.67).abs() < 1e-9);
}

#[test]
fn reach_discounts_cross_channel_overlap() {
    let estimator = ReachEstimator::new(ReachConfig::default());
    let mut metrics = zero_metrics();
    metrics.streaming.listeners = 1_000;
    metrics.clips.views = 10_000;
    metrics.radio.listeners = 500;

    // (1000 + 10000/10 + 500) * 0.7
    assert_eq!(estimator.estimate(&metrics), 1_750);
}

#[test]
fn reach_of_silent_entity_is_zero() {
    let estimator = ReachEstimator::new(ReachConfig::default());

    assert_eq!(estimator.estimate(&zero_metrics()), 0);
}

#[test]
fn trending_gate_rejects_scores_below_threshold() {
    let assigner = TrendingRankAssigner::new(TrendingConfig::default());

    for score in [0.0, 30.0, 59.99] {
        for population in [0u64, 5, 100, 10_000] {
            assert_eq!(assigner.rank(score, population), 0);
        }
    }
}

#[test]
fn trending_rank_improves_with_score() {
    let assigner = TrendingRankAssigner::new(TrendingConfig::default());

    assert_eq!(assigner.rank(60.0, 100), 9);
    assert_eq!(assigner.rank(95.0, 100), 2);
    assert_eq!(assigner.rank(99.9, 100), 1);
    assert_eq!(assigner.rank(100.0, 100), 1);
}

#[test]
fn trending_rank_respects_population_cutoff() {
    let assigner = TrendingRankAssigner::new(TrendingConfig::default());

    // Rank 2 fits exactly into a population of 10 (top fifth = 2).
    assert_eq!(assigner.rank(95.0, 10), 2);
    // Rank 3 does not.
    assert_eq!(assigner.rank(90.0, 10), 0);
    // A population of 4 admits no trending slot at all.
    assert_eq!(assigner.rank(100.0, 4), 0);
}

#[test]
fn trending_indicators_flag_fast_growing_channels() {
    let assigner = TrendingRankAssigner::new(TrendingConfig::default());
    let mut metrics = zero_metrics();
    metrics.streaming.growth_pct = 400.0;
    metrics.clips.growth_pct = 600.0;
    metrics.radio.growth_pct = 250.0;

    let indicators = assigner.indicators(&metrics);
    assert_eq!(indicators.channels, vec!["streaming", "clips", "radio"]);
    assert!(indicators.momentum);
}

#[test]
fn trending_indicators_gates_are_strict() {
    let assigner = TrendingRankAssigner::new(TrendingConfig::default());
    let mut metrics = zero_metrics();
    metrics.streaming.growth_pct = 301.0;
    metrics.clips.growth_pct = 500.0;
    metrics.radio.growth_pct = 200.0;

    let indicators = assigner.indicators(&metrics);
    assert_eq!(indicators.channels, vec!["streaming"]);
    assert!(!indicators.momentum);
}

#[test]
fn listener_trend_ramps_to_current_count() {
    let trend = listener_trend(3_000, LISTENER_TREND_DAYS);

    assert_eq!(trend.len(), LISTENER_TREND_DAYS);
    assert_eq!(trend[0], 100);
    assert_eq!(trend[LISTENER_TREND_DAYS - 1], 3_000);
    for window in trend.windows(2) {
        assert!(window[1] >= window[0]);
    }
}

#[test]
fn weekly_growth_guards_zero_baseline() {
    assert!((weekly_growth(3_000.0, 2_300.0) - 30.43).abs() < 1e-9);
    assert!((weekly_growth(5.0, 0.0) - 0.0).abs() < 1e-9);
}

#[test]
fn view_to_play_ratio_guards_zero_plays() {
    assert!((view_to_play_ratio(&fixed_metrics()) - 2.0).abs() < 1e-9);
    assert!((view_to_play_ratio(&zero_metrics()) - 0.0).abs() < 1e-9);
}

#[test]
fn analyze_entity_is_reproducible() {
    let config = EngineConfig::default();

    let first = analyze_entity(42, 30.0, 500, &config);
    let second = analyze_entity(42, 30.0, 500, &config);

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn analyze_entity_report_is_internally_consistent() {
    let config = EngineConfig::default();
    let report = analyze_entity(7, 45.0, 200, &config);

    assert_eq!(report.is_trending, report.trending_rank > 0);
    assert_eq!(report.listener_trend.len(), LISTENER_TREND_DAYS);
    assert_eq!(
        *report.listener_trend.last().unwrap(),
        report.metrics.streaming.listeners
    );
    assert!(report.viral_score >= 0.0 && report.viral_score <= 100.0);
}

#[test]
fn analyze_entity_without_population_never_trends() {
    let config = EngineConfig::default();
    let report = analyze_entity(7, 45.0, 0, &config);

    assert_eq!(report.trending_rank, 0);
    assert!(!report.is_trending);
}
