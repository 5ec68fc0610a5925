//! This crate contains all shared UI for the workspace.

mod auth;
pub use auth::{
    use_auth, use_client, use_route_guard, use_session, AuthProvider, AuthState, LogoutButton,
};

mod client;
pub use client::{delay, load_config, make_store};

pub mod forms;
pub use forms::{read_selected_file, LoginForm};

pub mod state;
pub use state::PageState;

mod resource_list;
pub use resource_list::ResourceList;

mod recommendation_card;
pub use recommendation_card::{
    format_percent, RecommendationCard, RecommendationSummary, RecommendationSummaryBar,
};
