use api::GuardedRoute;
use dioxus::prelude::*;

use ui::AuthProvider;
use views::{Home, Login, NotFound, Protected, Results, Shell, Upload};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/login")]
        Login {},
        #[layout(Protected)]
            #[route("/upload")]
            Upload {},
            #[route("/result/:user_id")]
            Results { user_id: i64 },
        #[end_layout]
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl GuardedRoute for Route {
    fn is_protected(&self) -> bool {
        matches!(self, Route::Upload {} | Route::Results { .. })
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Resource School" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}
