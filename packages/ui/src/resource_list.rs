//! Resource catalog shown on the home page.

use api::{ApiError, Operation, Resource};
use dioxus::prelude::*;

use crate::auth::use_client;
use crate::state::PageState;

/// The catalog shows one fixed message for every failure. The cause is only
/// logged.
fn catalog_outcome(result: Result<Vec<Resource>, ApiError>) -> Result<Vec<Resource>, &'static str> {
    result.map_err(|e| {
        tracing::warn!("Error loading resources: {}", e);
        Operation::ListResources.default_message()
    })
}

#[component]
pub fn ResourceList() -> Element {
    let client = use_client();
    let mut state = use_signal(PageState::<Vec<Resource>>::default);

    let _loader = use_resource(move || {
        let client = client.clone();
        async move {
            if !state.write().begin() {
                return;
            }
            let result = client.list_resources().await;
            state.write().finish(catalog_outcome(result));
        }
    });

    match state() {
        PageState::Idle | PageState::Loading => rsx! {
            div { class: "spinner", "Loading resources..." }
        },
        PageState::Failed(message) => rsx! {
            div { class: "alert alert-error", "{message}" }
        },
        PageState::Ready(resources) if resources.is_empty() => rsx! {
            p { class: "empty-state", "No resources have been published yet." }
        },
        PageState::Ready(resources) => rsx! {
            div { class: "resource-grid",
                for resource in resources {
                    ResourceCard { key: "{resource.id}", resource: resource.clone() }
                }
            }
        },
    }
}

#[component]
fn ResourceCard(resource: Resource) -> Element {
    rsx! {
        article { class: "card resource-card",
            h3 { "{resource.title}" }
            if let Some(category) = resource.category.as_deref() {
                span { class: "badge", "{category}" }
            }
            if let Some(description) = resource.description.as_deref() {
                p { "{description}" }
            }
            if let Some(url) = resource.url.as_deref() {
                a {
                    href: "{url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "Open resource"
                }
            }
        }
    }
}
