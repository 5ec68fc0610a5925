//! Upload page: pick one JSON file and submit it for analysis.

use std::time::Duration;

use api::ValidationError;
use dioxus::prelude::*;
use ui::{delay, read_selected_file, use_session, PageState};

use crate::Route;

/// Pause between the success message and the results page.
const RESULT_REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[component]
pub fn Upload() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let max_bytes = session.client().max_upload_bytes();
    let mut selected = use_signal(|| Option::<api::UploadFile>::None);
    let mut state = use_signal(PageState::<String>::default);

    let on_pick = move |evt: FormEvent| async move {
        let Some(files) = evt.files() else {
            return;
        };
        match read_selected_file(files, max_bytes).await {
            Ok(file) => {
                tracing::debug!("Selected {} ({} bytes)", file.name, file.size());
                selected.set(Some(file));
                state.set(PageState::Idle);
            }
            Err(e) => {
                selected.set(None);
                state.write().fail(e.to_string());
            }
        }
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        spawn(async move {
            let Some(file) = selected() else {
                state
                    .write()
                    .fail(ValidationError::MissingField("file").to_string());
                return;
            };
            if !state.write().begin() {
                return;
            }
            match session.client().upload_data(file).await {
                Ok(ack) => {
                    let message = ack
                        .message()
                        .unwrap_or("Upload complete, analysing your data")
                        .to_string();
                    state.set(PageState::Ready(message));
                    selected.set(None);

                    delay(RESULT_REDIRECT_DELAY).await;
                    match session.current_user() {
                        Some(user) => {
                            nav.push(Route::Results { user_id: user.id });
                        }
                        // Signed out while waiting
                        None => {
                            nav.replace(Route::Login {});
                        }
                    }
                }
                Err(e) => {
                    state.write().fail(e.to_string());
                }
            }
        });
    };

    let current = state();
    let loading = current.is_loading();
    let picked = selected.read().as_ref().map(|file| file.name.clone());
    let max_mib = max_bytes / (1024 * 1024);

    rsx! {
        div { class: "page upload-page",
            div { class: "card upload-card",
                h1 { "Upload application data" }
                p { class: "subtitle", "One JSON file, up to {max_mib} MB." }

                {match current {
                    PageState::Failed(message) => rsx! {
                        div { class: "alert alert-error", "{message}" }
                    },
                    PageState::Ready(message) => rsx! {
                        div { class: "alert alert-success", "{message}" }
                    },
                    _ => rsx! {},
                }}

                form { onsubmit: handle_submit,
                    input {
                        r#type: "file",
                        accept: ".json,application/json",
                        multiple: false,
                        disabled: loading,
                        onchange: on_pick,
                    }
                    if let Some(name) = picked {
                        p { class: "selected-file", "Selected: {name}" }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: loading,
                        if loading {
                            "Uploading..."
                        } else {
                            "Upload"
                        }
                    }
                }
            }
        }
    }
}
