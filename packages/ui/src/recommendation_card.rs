//! Rendering for a user's recommendation results.

use api::Recommendation;
use dioxus::prelude::*;

/// Aggregate figures shown above the result list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecommendationSummary {
    pub total: usize,
    /// Highest score as a percentage. `None` when the list is empty.
    pub best_percent: Option<u8>,
}

impl RecommendationSummary {
    pub fn of(recommendations: &[Recommendation]) -> Self {
        // Unscored entries count as zero once at least one result exists
        let best_percent = recommendations
            .iter()
            .map(|r| r.score_percent().unwrap_or(0))
            .max();
        Self {
            total: recommendations.len(),
            best_percent,
        }
    }
}

pub fn format_percent(percent: Option<u8>) -> String {
    percent.map_or_else(|| "N/A".to_string(), |p| format!("{p}%"))
}

#[component]
pub fn RecommendationSummaryBar(summary: RecommendationSummary) -> Element {
    let best = format_percent(summary.best_percent);
    rsx! {
        div { class: "summary",
            div { class: "summary-item",
                span { class: "summary-label", "Recommendations" }
                span { class: "summary-value", "{summary.total}" }
            }
            div { class: "summary-item",
                span { class: "summary-label", "Best match" }
                span { class: "summary-value", "{best}" }
            }
        }
    }
}

/// One recommendation. `index` is its zero-based position in the list, used
/// when the backend sends no rank or department.
#[component]
pub fn RecommendationCard(index: usize, recommendation: Recommendation) -> Element {
    let rank = recommendation.rank.map_or(index + 1, |r| r as usize);
    let title = recommendation
        .department
        .clone()
        .unwrap_or_else(|| format!("Recommendation {}", index + 1));
    let score = format_percent(recommendation.score_percent());

    rsx! {
        article { class: "card recommendation-card",
            div { class: "recommendation-header",
                span { class: "rank", "#{rank}" }
                h3 { "{title}" }
                span { class: "score", "{score}" }
            }
            if let Some(university) = recommendation.university.as_deref() {
                p { class: "university", "{university}" }
            }
            if let Some(major) = recommendation.major.as_deref() {
                p { class: "major", "Major: {major}" }
            }
            if let Some(reason) = recommendation.reason.as_deref() {
                p { class: "reason", "{reason}" }
            }
        }
    }
}
