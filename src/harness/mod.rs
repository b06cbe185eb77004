//! Performance and quality test harness.
//!
//! Drives the search pipeline through fixed scenarios, measuring timing,
//! relevance quality, and a synthesized user-satisfaction estimate, then
//! emits prioritized optimization suggestions and a text report.

pub mod metrics;
pub mod report;
pub mod sample;
pub mod scenario;
pub mod suggest;
pub mod suite;

pub use metrics::PerformanceMetrics;
pub use report::render_report;
pub use sample::sample_dataset;
pub use scenario::{TestScenario, builtin_scenarios};
pub use suggest::{Level, OptimizationSuggestion, Severity, SuggestionCategory};
pub use suite::{
    InMemoryProbe, ProbeError, QuickBenchmark, ScenarioOutcome, ScenarioStatus, SearchProbe,
    SuiteConfig, SuiteResult, SuiteSummary, quick_benchmark, run_scenario, run_suite,
};
