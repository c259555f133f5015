//! Driven port for the account and session backend.

use std::fmt;

use async_trait::async_trait;

use crate::domain::ErrorCode;

use super::define_port_error;

define_port_error! {
    /// Errors raised by the auth backend.
    ///
    /// Everything collapses to `generic`; the already-registered case is
    /// recognised separately from the rejection text.
    pub enum AuthProviderError {
        /// The backend answered with a failure status.
        Rejected { status: u16, message: String } =>
            "auth backend rejected request ({status}): {message}" => ErrorCode::Generic,
        /// The call exceeded its time bound.
        Timeout { message: String } =>
            "auth backend timed out: {message}" => ErrorCode::Generic,
        /// No usable response reached us.
        Transport { message: String } =>
            "auth backend transport failed: {message}" => ErrorCode::Generic,
    }
}

/// Profile metadata stored alongside an account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileMetadata {
    pub full_name: Option<String>,
    pub username: Option<String>,
}

/// Account identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    pub metadata: ProfileMetadata,
}

/// An active session.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"[redacted]")
            .field("user", &self.user)
            .finish()
    }
}

/// Account creation request.
#[derive(Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub username: Option<String>,
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("full_name", &self.full_name)
            .field("username", &self.username)
            .finish()
    }
}

/// Result of a successful sign-up.
///
/// `session` is `None` when the backend requires email confirmation first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub session: Option<AuthSession>,
}

/// Port for account creation and session lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create an account.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthProviderError>;

    /// Resolve an access token into its session.
    ///
    /// Returns `Ok(None)` when the backend does not recognise the token.
    async fn load_session(
        &self,
        access_token: &str,
    ) -> Result<Option<AuthSession>, AuthProviderError>;
}

/// Fixture implementation that registers everyone and confirms nobody.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthProvider;

#[async_trait]
impl AuthProvider for FixtureAuthProvider {
    async fn sign_up(&self, _request: &SignUpRequest) -> Result<SignUpOutcome, AuthProviderError> {
        Ok(SignUpOutcome { session: None })
    }

    async fn load_session(
        &self,
        _access_token: &str,
    ) -> Result<Option<AuthSession>, AuthProviderError> {
        Ok(None)
    }
}
