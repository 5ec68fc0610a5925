use dioxus::prelude::*;
use ui::{use_auth, ResourceList};

use crate::Route;

#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let signed_in = auth().is_signed_in();

    rsx! {
        section { class: "hero",
            h1 { "Resource School" }
            p { "Upload your application data and see which departments fit you best." }
            if signed_in {
                Link { class: "btn btn-primary", to: Route::Upload {}, "Upload your data" }
            } else {
                Link { class: "btn btn-primary", to: Route::Login {}, "Sign in to get started" }
            }
        }
        section { class: "resources",
            h2 { "Resources" }
            ResourceList {}
        }
    }
}
