//! Scenario runner and suite aggregation.
//!
//! Scenarios run sequentially so timing stays uncontaminated; the network
//! probe for each scenario runs concurrently with the in-memory search on
//! its own thread, bounded by [`SuiteConfig::probe_timeout`]. A probe
//! failure becomes a metric, never an aborted scenario.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::model::{SearchQuery, SearchableEntity};
use crate::ranking::{RankingWeights, search};

use super::metrics::{
    PerformanceMetrics, estimate_memory_bytes, relevance_quality, user_satisfaction,
};
use super::scenario::TestScenario;
use super::suggest::{OptimizationSuggestion, generate_suggestions};

/// Probe failure surfaced as a metric.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("probe failed: {0}")]
    Failed(String),
    #[error("probe timed out after {0} ms")]
    TimedOut(u64),
    #[error("probe worker disconnected")]
    Disconnected,
}

/// The caller-supplied (possibly networked) search endpoint.
pub trait SearchProbe: Send + Sync {
    fn search(&self, query: &SearchQuery) -> Result<Vec<SearchableEntity>, ProbeError>;
}

/// A probe backed by the engine itself, for local runs and tests.
pub struct InMemoryProbe {
    entities: Vec<SearchableEntity>,
    weights: RankingWeights,
    now: DateTime<Utc>,
}

impl InMemoryProbe {
    pub fn new(entities: Vec<SearchableEntity>, now: DateTime<Utc>) -> Self {
        Self {
            entities,
            weights: RankingWeights::default(),
            now,
        }
    }
}

impl SearchProbe for InMemoryProbe {
    fn search(&self, query: &SearchQuery) -> Result<Vec<SearchableEntity>, ProbeError> {
        let ranked = search(&self.entities, query, &self.weights, self.now);
        Ok(ranked.into_iter().map(|r| r.entity).collect())
    }
}

/// Suite configuration.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Upper bound on each scenario's probe call.
    pub probe_timeout: Duration,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(2),
        }
    }
}

impl SuiteConfig {
    /// Load config from environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(val) = dotenvy::var("LSEARCH_PROBE_TIMEOUT_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                cfg.probe_timeout = Duration::from_millis(ms);
            }
        }
        cfg
    }
}

/// Lifecycle of one scenario run.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    #[default]
    Pending,
    Executing,
    Completed,
    Failed,
}

/// Result of one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario: TestScenario,
    pub status: ScenarioStatus,
    pub metrics: PerformanceMetrics,
    /// Unweighted scenario score in [0, 100].
    pub score: f64,
    pub passed: bool,
}

/// Suite-level aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub total_scenarios: usize,
    pub passed_scenarios: usize,
    pub avg_execution_time_ms: f64,
    pub avg_relevance_quality: f64,
    pub avg_user_satisfaction: f64,
}

/// Everything a suite run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteResult {
    /// Weighted average scenario score in [0, 100].
    pub overall_score: f64,
    pub metrics: BTreeMap<String, PerformanceMetrics>,
    pub scenarios: Vec<ScenarioOutcome>,
    pub suggestions: Vec<OptimizationSuggestion>,
    pub summary: SuiteSummary,
    pub generated_at: DateTime<Utc>,
}

/// Run every scenario sequentially and aggregate.
pub fn run_suite(
    scenarios: &[TestScenario],
    probe: Arc<dyn SearchProbe>,
    sample: &[SearchableEntity],
    weights: &RankingWeights,
    clock: &dyn Clock,
    config: &SuiteConfig,
) -> SuiteResult {
    info!(scenarios = scenarios.len(), sample = sample.len(), "starting suite");

    let mut outcomes = Vec::with_capacity(scenarios.len());
    let mut metrics = BTreeMap::new();
    let mut weighted_total = 0.0;
    let mut total_weight = 0.0;

    for scenario in scenarios {
        let outcome = run_scenario(scenario, Arc::clone(&probe), sample, weights, clock, config);
        info!(
            scenario = %scenario.id,
            score = outcome.score,
            passed = outcome.passed,
            "scenario finished"
        );
        weighted_total += outcome.score * scenario.weight;
        total_weight += scenario.weight;
        metrics.insert(scenario.id.clone(), outcome.metrics.clone());
        outcomes.push(outcome);
    }

    let overall_score = if total_weight > 0.0 {
        weighted_total / total_weight
    } else {
        0.0
    };

    let count = outcomes.len() as f64;
    let summary = if outcomes.is_empty() {
        SuiteSummary {
            total_scenarios: 0,
            passed_scenarios: 0,
            avg_execution_time_ms: 0.0,
            avg_relevance_quality: 0.0,
            avg_user_satisfaction: 0.0,
        }
    } else {
        SuiteSummary {
            total_scenarios: outcomes.len(),
            passed_scenarios: outcomes.iter().filter(|o| o.passed).count(),
            avg_execution_time_ms: outcomes
                .iter()
                .map(|o| o.metrics.execution_time_ms)
                .sum::<f64>()
                / count,
            avg_relevance_quality: outcomes
                .iter()
                .map(|o| o.metrics.relevance_quality)
                .sum::<f64>()
                / count,
            avg_user_satisfaction: outcomes
                .iter()
                .map(|o| o.metrics.user_satisfaction)
                .sum::<f64>()
                / count,
        }
    };

    let suggestions = generate_suggestions(&metrics, overall_score);

    SuiteResult {
        overall_score,
        metrics,
        scenarios: outcomes,
        suggestions,
        summary,
        generated_at: clock.now(),
    }
}

/// Run one scenario: timed in-memory search plus a bounded probe call.
pub fn run_scenario(
    scenario: &TestScenario,
    probe: Arc<dyn SearchProbe>,
    sample: &[SearchableEntity],
    weights: &RankingWeights,
    clock: &dyn Clock,
    config: &SuiteConfig,
) -> ScenarioOutcome {
    let mut status = ScenarioStatus::Pending;
    debug!(scenario = %scenario.id, ?status, "queued");
    status = ScenarioStatus::Executing;
    debug!(scenario = %scenario.id, ?status, "running");

    // Kick the probe off first so it overlaps the in-memory run. A panic in
    // the probe drops the sender, which surfaces as a disconnect below.
    let (tx, rx) = crossbeam_channel::bounded(1);
    let probe_query = scenario.query.clone();
    thread::spawn(move || {
        let started = Instant::now();
        let result = probe.search(&probe_query);
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        let _ = tx.send((elapsed_ms, result));
    });

    let now = clock.now();
    let started = Instant::now();
    let results = search(sample, &scenario.query, weights, now);
    let execution_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    let (api_response_time_ms, error_rate_percent) = match rx.recv_timeout(config.probe_timeout) {
        Ok((elapsed_ms, Ok(_))) => (elapsed_ms, 0.0),
        Ok((elapsed_ms, Err(err))) => {
            warn!(scenario = %scenario.id, error = %err, "probe failed");
            (elapsed_ms, 100.0)
        }
        Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
            warn!(
                scenario = %scenario.id,
                timeout_ms = config.probe_timeout.as_millis() as u64,
                "probe timed out"
            );
            (0.0, 100.0)
        }
        Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
            warn!(scenario = %scenario.id, "probe worker disconnected");
            (0.0, 100.0)
        }
    };

    let sample_bytes = estimate_memory_bytes(&sample);
    let result_bytes = estimate_memory_bytes(&results);

    let metrics = PerformanceMetrics {
        execution_time_ms,
        estimated_memory_bytes: result_bytes.saturating_sub(sample_bytes),
        results_count: results.len(),
        relevance_quality: relevance_quality(&results, &scenario.query),
        user_satisfaction: user_satisfaction(&results, scenario),
        api_response_time_ms,
        error_rate_percent,
        timestamp: clock.now(),
    };

    status = if error_rate_percent > 0.0 {
        ScenarioStatus::Failed
    } else {
        ScenarioStatus::Completed
    };

    let score = scenario_score(scenario, &metrics);
    let passed = metrics.execution_time_ms <= scenario.expected_max_execution_time_ms
        && metrics.results_count >= scenario.expected_min_results
        && metrics.error_rate_percent == 0.0;

    ScenarioOutcome {
        scenario: scenario.clone(),
        status,
        metrics,
        score,
        passed,
    }
}

/// Unweighted scenario score: 30% timing, 20% result count, 30% relevance
/// quality, 20% user satisfaction.
fn scenario_score(scenario: &TestScenario, metrics: &PerformanceMetrics) -> f64 {
    let time_score = (100.0
        - (metrics.execution_time_ms / scenario.expected_max_execution_time_ms) * 100.0)
        .max(0.0);

    let count_score = if scenario.expected_min_results == 0
        || metrics.results_count >= scenario.expected_min_results
    {
        100.0
    } else {
        metrics.results_count as f64 / scenario.expected_min_results as f64 * 100.0
    };

    time_score * 0.3
        + count_score * 0.2
        + metrics.relevance_quality * 0.3
        + metrics.user_satisfaction * 0.2
}

// ---------------------------------------------------------------------------
// Quick benchmark
// ---------------------------------------------------------------------------

/// Development-time spot check over the first slice of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickBenchmark {
    pub basic_search_ms: f64,
    pub filtered_search_ms: f64,
    pub location_search_ms: f64,
    pub memory_size_kb: f64,
    pub recommendation: String,
}

/// Time three representative query shapes over up to 100 entities.
pub fn quick_benchmark(
    sample: &[SearchableEntity],
    weights: &RankingWeights,
    now: DateTime<Utc>,
) -> QuickBenchmark {
    use crate::model::{GeoPoint, QueryFilters, SortBy};

    let slice = &sample[..sample.len().min(100)];

    let time_one = |query: &SearchQuery| {
        let started = Instant::now();
        let _ = search(slice, query, weights, now);
        started.elapsed().as_secs_f64() * 1000.0
    };

    let basic_search_ms = time_one(&SearchQuery::text("test"));

    let filtered_search_ms = time_one(&SearchQuery {
        query: Some("restaurant".to_string()),
        sort_by: SortBy::Rating,
        filters: QueryFilters {
            verified: true,
            has_reviews: true,
            min_rating: Some(4.0),
            ..QueryFilters::default()
        },
        ..SearchQuery::default()
    });

    let location_search_ms = time_one(&SearchQuery {
        query: Some("coffee".to_string()),
        sort_by: SortBy::Distance,
        user_location: Some(GeoPoint::new(30.0444, 31.2357)),
        ..SearchQuery::default()
    });

    let memory_size_kb = estimate_memory_bytes(&sample) as f64 / 1024.0;

    let avg = (basic_search_ms + filtered_search_ms + location_search_ms) / 3.0;
    let recommendation = if avg > 200.0 {
        "Performance needs improvement. Consider caching and indexing.".to_string()
    } else if avg > 100.0 {
        "Performance is acceptable but could be optimized.".to_string()
    } else {
        "Performance is optimal.".to_string()
    };

    QuickBenchmark {
        basic_search_ms,
        filtered_search_ms,
        location_search_ms,
        memory_size_kb,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::harness::sample::sample_dataset;
    use crate::harness::scenario::builtin_scenarios;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    struct FailingProbe;
    impl SearchProbe for FailingProbe {
        fn search(&self, _query: &SearchQuery) -> Result<Vec<SearchableEntity>, ProbeError> {
            Err(ProbeError::Failed("backend unavailable".to_string()))
        }
    }

    struct SlowProbe;
    impl SearchProbe for SlowProbe {
        fn search(&self, _query: &SearchQuery) -> Result<Vec<SearchableEntity>, ProbeError> {
            thread::sleep(Duration::from_millis(200));
            Ok(Vec::new())
        }
    }

    struct PanickingProbe;
    impl SearchProbe for PanickingProbe {
        fn search(&self, _query: &SearchQuery) -> Result<Vec<SearchableEntity>, ProbeError> {
            panic!("probe blew up");
        }
    }

    #[test]
    fn healthy_probe_yields_zero_error_rate() {
        let clock = FixedClock(fixed_now());
        let sample = sample_dataset(fixed_now());
        let probe = Arc::new(InMemoryProbe::new(sample.clone(), fixed_now()));
        let outcome = run_scenario(
            &builtin_scenarios()[0],
            probe,
            &sample,
            &RankingWeights::default(),
            &clock,
            &SuiteConfig::default(),
        );
        assert_eq!(outcome.metrics.error_rate_percent, 0.0);
        assert_eq!(outcome.status, ScenarioStatus::Completed);
        assert!(outcome.metrics.results_count >= 10);
    }

    #[test]
    fn failing_probe_sets_error_rate_without_losing_core_metrics() {
        let clock = FixedClock(fixed_now());
        let sample = sample_dataset(fixed_now());
        let outcome = run_scenario(
            &builtin_scenarios()[0],
            Arc::new(FailingProbe),
            &sample,
            &RankingWeights::default(),
            &clock,
            &SuiteConfig::default(),
        );
        assert_eq!(outcome.metrics.error_rate_percent, 100.0);
        assert_eq!(outcome.status, ScenarioStatus::Failed);
        assert!(!outcome.passed);
        // The in-memory run still measured real results.
        assert!(outcome.metrics.results_count > 0);
        assert!(outcome.metrics.relevance_quality > 0.0);
    }

    #[test]
    fn slow_probe_times_out_without_blocking_the_scenario() {
        let clock = FixedClock(fixed_now());
        let sample = sample_dataset(fixed_now());
        let config = SuiteConfig {
            probe_timeout: Duration::from_millis(20),
        };
        let outcome = run_scenario(
            &builtin_scenarios()[0],
            Arc::new(SlowProbe),
            &sample,
            &RankingWeights::default(),
            &clock,
            &config,
        );
        assert_eq!(outcome.metrics.error_rate_percent, 100.0);
        assert_eq!(outcome.metrics.api_response_time_ms, 0.0);
    }

    #[test]
    fn panicking_probe_is_contained() {
        let clock = FixedClock(fixed_now());
        let sample = sample_dataset(fixed_now());
        let outcome = run_scenario(
            &builtin_scenarios()[0],
            Arc::new(PanickingProbe),
            &sample,
            &RankingWeights::default(),
            &clock,
            &SuiteConfig::default(),
        );
        assert_eq!(outcome.metrics.error_rate_percent, 100.0);
        assert_eq!(outcome.status, ScenarioStatus::Failed);
    }

    #[test]
    fn suite_aggregates_by_weight_and_continues_past_failures() {
        let clock = FixedClock(fixed_now());
        let sample = sample_dataset(fixed_now());
        let probe = Arc::new(InMemoryProbe::new(sample.clone(), fixed_now()));
        let result = run_suite(
            builtin_scenarios(),
            probe,
            &sample,
            &RankingWeights::default(),
            &clock,
            &SuiteConfig::default(),
        );
        assert_eq!(result.summary.total_scenarios, 5);
        assert_eq!(result.metrics.len(), 5);
        assert!(result.overall_score > 0.0 && result.overall_score <= 100.0);
        assert_eq!(result.generated_at, fixed_now());
        // Every built-in scenario meets its result minimum on the sample set.
        assert_eq!(result.summary.passed_scenarios, 5);
    }

    #[test]
    fn empty_scenario_list_is_a_zero_suite() {
        let clock = FixedClock(fixed_now());
        let sample = sample_dataset(fixed_now());
        let probe = Arc::new(InMemoryProbe::new(sample.clone(), fixed_now()));
        let result = run_suite(
            &[],
            probe,
            &sample,
            &RankingWeights::default(),
            &clock,
            &SuiteConfig::default(),
        );
        assert_eq!(result.overall_score, 0.0);
        assert_eq!(result.summary.total_scenarios, 0);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn scenario_score_blend() {
        let scenario = TestScenario {
            id: "s".to_string(),
            name: "S".to_string(),
            description: String::new(),
            query: SearchQuery::browse(),
            expected_min_results: 10,
            expected_max_execution_time_ms: 100.0,
            weight: 1.0,
        };
        let metrics = PerformanceMetrics {
            execution_time_ms: 50.0, // time score 50
            estimated_memory_bytes: 0,
            results_count: 5, // count score 50
            relevance_quality: 80.0,
            user_satisfaction: 60.0,
            api_response_time_ms: 0.0,
            error_rate_percent: 0.0,
            timestamp: fixed_now(),
        };
        let score = scenario_score(&scenario, &metrics);
        assert!((score - (50.0 * 0.3 + 50.0 * 0.2 + 80.0 * 0.3 + 60.0 * 0.2)).abs() < 1e-9);
    }

    #[test]
    fn quick_benchmark_reports_optimal_on_small_data() {
        let sample = sample_dataset(fixed_now());
        let bench = quick_benchmark(&sample, &RankingWeights::default(), fixed_now());
        assert!(bench.basic_search_ms >= 0.0);
        assert!(bench.memory_size_kb > 0.0);
        assert_eq!(bench.recommendation, "Performance is optimal.");
    }

    #[test]
    fn probe_timeout_env_override() {
        // No env var set: default stands.
        let cfg = SuiteConfig::from_env();
        assert!(cfg.probe_timeout >= Duration::from_millis(1));
    }
}
