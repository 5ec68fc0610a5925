//! Layout for routes that need a signed-in session.

use api::Access;
use dioxus::prelude::*;
use ui::{use_auth, use_route_guard};

use crate::Route;

#[component]
pub fn Protected() -> Element {
    let auth = use_auth();
    let guard = use_route_guard();
    let route = use_route::<Route>();
    let nav = use_navigator();

    // Subscribe so that losing the session re-runs the check
    let _ = auth();

    if guard.check(&route) == Access::RedirectToLogin {
        tracing::debug!("Redirecting {} to login", route);
        nav.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        Outlet::<Route> {}
    }
}
