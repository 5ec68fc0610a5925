//! Request lifecycle shared by the page controllers.

use std::fmt::Display;

/// Where a page's single in-flight request stands.
#[derive(Clone, Debug, PartialEq)]
pub enum PageState<T> {
    Idle,
    Loading,
    Ready(T),
    /// Human-readable message shown to the user.
    Failed(String),
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> PageState<T> {
    /// Enter `Loading`. Returns `false` if a request is already running, in
    /// which case the caller must not start another one.
    pub fn begin(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        *self = Self::Loading;
        true
    }

    pub fn finish<E: Display>(&mut self, result: Result<T, E>) {
        *self = match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Failed(e.to_string()),
        };
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        *self = Self::Failed(message.into());
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}
