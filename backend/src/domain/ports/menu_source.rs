//! Driven port for resolving a guest token into a menu snapshot.
//!
//! One call is one network attempt: implementations never retry. Failures
//! are already classified into the three transport categories or a code the
//! backend returned verbatim.

use async_trait::async_trait;

use crate::domain::{Branch, ErrorCode, MenuResult, QrToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised while fetching a menu.
    pub enum MenuSourceError {
        /// The backend rejected the token with a recognised code.
        Rejected { code: ErrorCode } =>
            "menu backend rejected token: {code}" => *code,
        /// The call exceeded its time bound.
        Timeout { message: String } =>
            "menu fetch timed out: {message}" => ErrorCode::Timeout,
        /// No response reached us.
        Transport { message: String } =>
            "menu transport failed: {message}" => ErrorCode::NetworkError,
        /// The backend answered with an unusable status or body.
        Server { message: String } =>
            "menu backend failed: {message}" => ErrorCode::ServerError,
    }
}

/// Port for fetching a guest menu.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Resolve `token` into the branch menu.
    async fn fetch_menu(&self, token: &QrToken) -> Result<MenuResult, MenuSourceError>;
}

/// Fixture implementation serving an empty menu for every token.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMenuSource;

#[async_trait]
impl MenuSource for FixtureMenuSource {
    async fn fetch_menu(&self, _token: &QrToken) -> Result<MenuResult, MenuSourceError> {
        Ok(MenuResult {
            branch: Branch {
                id: "fixture-branch".to_owned(),
                name: "Fixture branch".to_owned(),
                address: None,
            },
            wines: Vec::new(),
        })
    }
}
