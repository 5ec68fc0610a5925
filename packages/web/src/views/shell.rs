//! Top-level layout: navigation bar above the routed page.

use dioxus::prelude::*;
use ui::{use_auth, LogoutButton};

use crate::Route;

#[component]
pub fn Shell() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let state = auth();
    let name = state.display_name().to_string();
    let user_id = state.user.as_ref().map(|u| u.id);

    rsx! {
        nav { class: "navbar",
            Link { class: "brand", to: Route::Home {}, "Resource School" }
            div { class: "navbar-links",
                if let Some(user_id) = user_id {
                    span { class: "welcome", "Welcome, {name}" }
                    Link { to: Route::Upload {}, "Upload" }
                    Link { to: Route::Results { user_id }, "Results" }
                    LogoutButton {
                        class: "btn btn-secondary",
                        onlogout: move |_| {
                            nav.replace(Route::Login {});
                        },
                    }
                } else {
                    Link { class: "btn btn-primary", to: Route::Login {}, "Log in" }
                }
            }
        }
        main { class: "content",
            Outlet::<Route> {}
        }
    }
}
