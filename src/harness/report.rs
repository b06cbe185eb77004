//! Human-readable suite report.

use std::fmt::Write as _;

use super::suite::SuiteResult;

/// Render a suite result as a plain-text report.
///
/// Section order: Summary, Detailed Results, Optimization Suggestions,
/// Recommendations.
pub fn render_report(result: &SuiteResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Search Performance Report");
    let _ = writeln!(
        out,
        "Generated: {}",
        result.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "## Summary");
    let _ = writeln!(out, "- Overall Score: {:.1}/100", result.overall_score);
    let _ = writeln!(
        out,
        "- Scenarios Passed: {}/{}",
        result.summary.passed_scenarios, result.summary.total_scenarios
    );
    let _ = writeln!(
        out,
        "- Average Execution Time: {:.2}ms",
        result.summary.avg_execution_time_ms
    );
    let _ = writeln!(
        out,
        "- Average Relevance Quality: {:.1}%",
        result.summary.avg_relevance_quality
    );
    let _ = writeln!(
        out,
        "- Average User Satisfaction: {:.1}%",
        result.summary.avg_user_satisfaction
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "## Detailed Results");
    for outcome in &result.scenarios {
        let scenario = &outcome.scenario;
        let metrics = &outcome.metrics;
        let _ = writeln!(out);
        let _ = writeln!(out, "### {}", scenario.name);
        let _ = writeln!(
            out,
            "- Status: {}",
            if outcome.passed { "PASSED" } else { "FAILED" }
        );
        let _ = writeln!(
            out,
            "- Execution Time: {:.2}ms (limit: {:.0}ms)",
            metrics.execution_time_ms, scenario.expected_max_execution_time_ms
        );
        let _ = writeln!(
            out,
            "- Results Count: {} (minimum: {})",
            metrics.results_count, scenario.expected_min_results
        );
        let _ = writeln!(out, "- Relevance Quality: {:.1}%", metrics.relevance_quality);
        let _ = writeln!(out, "- User Satisfaction: {:.1}%", metrics.user_satisfaction);
        let _ = writeln!(
            out,
            "- Memory Estimate: {:.1}KB",
            metrics.estimated_memory_bytes as f64 / 1024.0
        );
        let _ = writeln!(
            out,
            "- API Response Time: {:.2}ms",
            metrics.api_response_time_ms
        );
        let _ = writeln!(out, "- Error Rate: {:.0}%", metrics.error_rate_percent);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Optimization Suggestions");
    if result.suggestions.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "None. All thresholds were met.");
    } else {
        for (index, suggestion) in result.suggestions.iter().enumerate() {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "### {}. [{}] {}",
                index + 1,
                suggestion.severity.to_string().to_uppercase(),
                suggestion.title
            );
            let _ = writeln!(out, "- Category: {}", suggestion.category);
            let _ = writeln!(
                out,
                "- Impact: {} | Effort: {}",
                suggestion.impact, suggestion.effort
            );
            let _ = writeln!(out, "- Priority: {}/100", suggestion.priority);
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", suggestion.description);
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Recommendations");
    let _ = writeln!(out);
    let recommendation = if result.overall_score < 70.0 {
        "Focus on critical issues first, especially performance and relevance improvements."
    } else if result.overall_score <= 85.0 {
        "Address warning-level suggestions to optimize the user experience."
    } else {
        "Scores are healthy. Consider advanced features and deeper analytics next."
    };
    let _ = writeln!(
        out,
        "Overall score {:.1}: {}",
        result.overall_score, recommendation
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::harness::sample::sample_dataset;
    use crate::harness::scenario::builtin_scenarios;
    use crate::harness::suite::{InMemoryProbe, SuiteConfig, run_suite};
    use crate::ranking::RankingWeights;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn suite_result() -> SuiteResult {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let sample = sample_dataset(now);
        run_suite(
            builtin_scenarios(),
            Arc::new(InMemoryProbe::new(sample.clone(), now)),
            &sample,
            &RankingWeights::default(),
            &FixedClock(now),
            &SuiteConfig::default(),
        )
    }

    #[test]
    fn sections_appear_in_order() {
        let report = render_report(&suite_result());
        let summary = report.find("## Summary").unwrap();
        let detailed = report.find("## Detailed Results").unwrap();
        let suggestions = report.find("## Optimization Suggestions").unwrap();
        let recommendations = report.find("## Recommendations").unwrap();
        assert!(summary < detailed);
        assert!(detailed < suggestions);
        assert!(suggestions < recommendations);
    }

    #[test]
    fn every_scenario_gets_a_subsection() {
        let report = render_report(&suite_result());
        for scenario in builtin_scenarios() {
            assert!(
                report.contains(&format!("### {}", scenario.name)),
                "missing {}",
                scenario.name
            );
        }
    }

    #[test]
    fn report_shows_generated_timestamp_and_status() {
        let report = render_report(&suite_result());
        assert!(report.contains("Generated: 2025-06-15 12:00:00 UTC"));
        assert!(report.contains("- Status: PASSED"));
    }

    #[test]
    fn recommendation_band_matches_score() {
        let mut result = suite_result();
        result.overall_score = 50.0;
        assert!(render_report(&result).contains("Focus on critical issues"));
        result.overall_score = 75.0;
        assert!(render_report(&result).contains("warning-level suggestions"));
        result.overall_score = 95.0;
        assert!(render_report(&result).contains("advanced features"));
    }
}
