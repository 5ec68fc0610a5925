//! Authentication context and hooks for the UI.

use api::{ApiClient, RouteGuard, SessionManager, User};
use dioxus::prelude::*;

use crate::client::{load_config, make_store};

/// Signed-in state as seen by components.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
}

impl AuthState {
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Name shown in the navigation bar.
    pub fn display_name(&self) -> &str {
        self.user.as_ref().map_or("user", User::display_name)
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out, including
/// when the backend rejects the stored token.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_session() -> SessionManager {
    use_context::<SessionManager>()
}

pub fn use_client() -> ApiClient {
    use_session().client().clone()
}

pub fn use_route_guard() -> RouteGuard {
    RouteGuard::new(use_session())
}

/// Callback for [`api::ApiClientBuilder::on_auth_lost`] that publishes the
/// signed-out state through `publish`.
pub(crate) fn auth_lost_hook(publish: impl Fn(AuthState) + 'static) -> impl Fn() + 'static {
    move || {
        tracing::info!("Session rejected by the server, signing out");
        publish(AuthState::signed_out());
    }
}

/// Provider component that owns the session and the API client.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let store = use_hook(make_store);
    let auth_state = use_signal(|| AuthState {
        user: store.read_user(),
    });

    let session = use_hook(move || {
        let built = ApiClient::builder()
            .config(load_config())
            .shared_store(store)
            .on_auth_lost(auth_lost_hook(move |state| {
                let mut auth_state = auth_state;
                auth_state.set(state);
            }))
            .build();
        match built {
            Ok(client) => Some(SessionManager::new(client)),
            Err(e) => {
                tracing::error!("Failed to create API client: {}", e);
                None
            }
        }
    });

    // `session` is fixed for the lifetime of the provider, so the hooks below
    // run either on every render or on none.
    let Some(session) = session else {
        return rsx! {
            div { class: "alert alert-error", "Could not start the application." }
        };
    };
    use_context_provider(|| auth_state);
    use_context_provider(|| session);

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    onlogout: Option<EventHandler<()>>,
) -> Element {
    let mut auth_state = use_auth();
    let session = use_session();

    let onclick = move |_| {
        session.logout();
        auth_state.set(AuthState::signed_out());
        if let Some(handler) = onlogout {
            handler.call(());
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
