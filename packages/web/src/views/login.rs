//! Login page view with a username/password form.

use dioxus::prelude::*;
use ui::{use_auth, use_session, AuthState, LoginForm, PageState};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let session = use_session();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut state = use_signal(PageState::<()>::default);

    // Already signed in
    if auth().is_signed_in() {
        nav.replace(Route::Upload {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        spawn(async move {
            let form = LoginForm::new(username(), password());
            let (name, secret) = match form.validate() {
                Ok(credentials) => credentials,
                Err(e) => {
                    state.write().fail(e.to_string());
                    return;
                }
            };
            if !state.write().begin() {
                return;
            }
            match session.login(&name, &secret).await {
                Ok(user) => {
                    state.set(PageState::Ready(()));
                    auth.set(AuthState::signed_in(user));
                    nav.replace(Route::Upload {});
                }
                Err(e) => {
                    state.write().fail(e.to_string());
                }
            }
        });
    };

    let loading = state().is_loading();
    let error = state().error().map(str::to_string);

    rsx! {
        div { class: "page login-page",
            div { class: "card login-card",
                h1 { "Sign in" }
                p { class: "subtitle", "Use your Resource School account." }

                if let Some(message) = error {
                    div { class: "alert alert-error", "{message}" }
                }

                form { onsubmit: handle_login,
                    label { r#for: "username", "Username" }
                    input {
                        id: "username",
                        r#type: "text",
                        autocomplete: "username",
                        value: "{username}",
                        disabled: loading,
                        oninput: move |evt| username.set(evt.value()),
                    }
                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        r#type: "password",
                        autocomplete: "current-password",
                        value: "{password}",
                        disabled: loading,
                        oninput: move |evt| password.set(evt.value()),
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: loading,
                        if loading {
                            "Signing in..."
                        } else {
                            "Sign in"
                        }
                    }
                }
            }
        }
    }
}
