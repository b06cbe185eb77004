//! Optimization suggestions from aggregate metrics.
//!
//! Each rule is an independent threshold over the suite aggregates;
//! multiple rules can fire from the same run. Output is sorted by
//! priority, highest first.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::metrics::PerformanceMetrics;

/// Suggestion severity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Which area of the system a suggestion targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionCategory {
    Performance,
    Relevance,
    UserExperience,
    Technical,
}

impl std::fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Performance => write!(f, "performance"),
            Self::Relevance => write!(f, "relevance"),
            Self::UserExperience => write!(f, "user_experience"),
            Self::Technical => write!(f, "technical"),
        }
    }
}

/// Estimated impact or effort level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// One prioritized optimization suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationSuggestion {
    pub severity: Severity,
    pub category: SuggestionCategory,
    pub title: String,
    pub description: String,
    pub impact: Level,
    pub effort: Level,
    /// Sort key in [0, 100], highest first.
    pub priority: u8,
}

/// Evaluate all threshold rules over the per-scenario metrics.
pub fn generate_suggestions(
    metrics: &BTreeMap<String, PerformanceMetrics>,
    overall_score: f64,
) -> Vec<OptimizationSuggestion> {
    let mut suggestions = Vec::new();
    if metrics.is_empty() {
        return suggestions;
    }

    let count = metrics.len() as f64;
    let avg_execution_time =
        metrics.values().map(|m| m.execution_time_ms).sum::<f64>() / count;
    let avg_relevance = metrics.values().map(|m| m.relevance_quality).sum::<f64>() / count;
    let avg_memory =
        metrics.values().map(|m| m.estimated_memory_bytes as f64).sum::<f64>() / count;

    if avg_execution_time > 150.0 {
        suggestions.push(OptimizationSuggestion {
            severity: Severity::Critical,
            category: SuggestionCategory::Performance,
            title: "Slow Search Performance".to_string(),
            description: "Search execution time is above the optimal threshold. Consider \
                          caching, pre-computed indexes, or result pagination."
                .to_string(),
            impact: Level::High,
            effort: Level::Medium,
            priority: 95,
        });
    }

    if avg_execution_time > 100.0 {
        suggestions.push(OptimizationSuggestion {
            severity: Severity::Warning,
            category: SuggestionCategory::Performance,
            title: "Optimize Search Algorithm".to_string(),
            description: "Consider result caching or pre-computed indexes to bring execution \
                          time down."
                .to_string(),
            impact: Level::Medium,
            effort: Level::High,
            priority: 80,
        });
    }

    if avg_relevance < 70.0 {
        suggestions.push(OptimizationSuggestion {
            severity: Severity::Critical,
            category: SuggestionCategory::Relevance,
            title: "Improve Search Relevance".to_string(),
            description: "Result relevance is below the acceptable threshold. Review ranking \
                          weights and text matching."
                .to_string(),
            impact: Level::High,
            effort: Level::Medium,
            priority: 90,
        });
    }

    if avg_memory > 1_000_000.0 {
        suggestions.push(OptimizationSuggestion {
            severity: Severity::Warning,
            category: SuggestionCategory::Performance,
            title: "High Memory Usage".to_string(),
            description: "Search operations use significant memory. Consider result streaming \
                          or pagination."
                .to_string(),
            impact: Level::Medium,
            effort: Level::Medium,
            priority: 70,
        });
    }

    let low_satisfaction = metrics.values().any(|m| m.user_satisfaction < 60.0);
    if low_satisfaction {
        suggestions.push(OptimizationSuggestion {
            severity: Severity::Warning,
            category: SuggestionCategory::UserExperience,
            title: "Improve User Satisfaction".to_string(),
            description: "Some scenarios score low on user satisfaction. Improve result \
                          quality and relevance for those query shapes."
                .to_string(),
            impact: Level::Medium,
            effort: Level::Low,
            priority: 75,
        });
    }

    if overall_score < 80.0 {
        suggestions.push(OptimizationSuggestion {
            severity: Severity::Info,
            category: SuggestionCategory::Technical,
            title: "Implement Search Analytics".to_string(),
            description: "Add search analytics to monitor performance trends and user \
                          behavior over time."
                .to_string(),
            impact: Level::Low,
            effort: Level::Medium,
            priority: 60,
        });
    }

    // Stable: rules that share a priority keep their evaluation order.
    suggestions.sort_by(|a, b| b.priority.cmp(&a.priority));
    suggestions
}
