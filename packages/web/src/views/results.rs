//! Recommendation results for one user.

use api::Recommendation;
use dioxus::prelude::*;
use ui::{
    use_client, PageState, RecommendationCard, RecommendationSummary, RecommendationSummaryBar,
};

use crate::Route;

#[component]
pub fn Results(user_id: i64) -> Element {
    let client = use_client();
    let mut state = use_signal(PageState::<Vec<Recommendation>>::default);

    let _loader = use_resource(use_reactive((&user_id,), move |(user_id,)| {
        let client = client.clone();
        async move {
            state.set(PageState::Loading);
            let result = client.get_recommendations(user_id).await;
            if let Err(e) = &result {
                tracing::warn!("Error loading recommendations for {}: {}", user_id, e);
            }
            state.write().finish(result);
        }
    }));

    let body = match state() {
        PageState::Idle | PageState::Loading => rsx! {
            div { class: "spinner", "Analysing your data..." }
        },
        PageState::Failed(message) => rsx! {
            div { class: "alert alert-error", "{message}" }
        },
        PageState::Ready(recommendations) if recommendations.is_empty() => rsx! {
            div { class: "empty-state",
                p { "No recommendations yet. Upload your application data to get some." }
                Link { class: "btn btn-primary", to: Route::Upload {}, "Upload data" }
            }
        },
        PageState::Ready(recommendations) => {
            let summary = RecommendationSummary::of(&recommendations);
            rsx! {
                RecommendationSummaryBar { summary }
                div { class: "recommendation-list",
                    for (index, recommendation) in recommendations.into_iter().enumerate() {
                        RecommendationCard { key: "{index}", index, recommendation }
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "page results-page",
            h1 { "Your recommendations" }
            {body}
            div { class: "actions",
                Link { class: "btn btn-secondary", to: Route::Upload {}, "Upload again" }
            }
        }
    }
}
