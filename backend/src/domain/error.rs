//! Domain-level error taxonomy.
//!
//! Every failure surfaced to a guest or a prospective staff member collapses
//! into exactly one [`ErrorCode`]. The codes are a wire contract shared with the
//! menu and authorization backends: their snake_case spelling never changes.
//! Inbound adapters map [`Error`] values to HTTP responses; the message text
//! shown to users comes from the presentation mapper, never from here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The token is absent or unknown to the backend.
    InvalidToken,
    /// The QR payload could not be decoded.
    InvalidQr,
    /// The token exists but is not a guest token.
    NotGuest,
    /// The token is past expiry or has exhausted its uses.
    TokenExpired,
    /// A single-use invitation token was already consumed.
    TokenUsed,
    /// A multi-use invitation token reached its limit.
    TokenMaxUsesReached,
    /// The branch attached to the invitation no longer exists.
    BranchNotFound,
    /// The access request requires an authenticated identity.
    NotAuthenticated,
    /// The branch has too many outstanding access requests.
    TooManyPending,
    /// An access request for this identity is already pending.
    AlreadyPending,
    /// An account already exists for the submitted email.
    AlreadyRegistered,
    /// The email confirmation field differs from the email.
    EmailMismatch,
    /// Connection-level failure reaching a backend.
    NetworkError,
    /// A backend call exceeded its time bound.
    Timeout,
    /// A backend answered with a failure or an unusable body.
    ServerError,
    /// The token, branch or owner could not be resolved.
    NotFound,
    /// The backend is throttling requests.
    RateLimited,
    /// Catch-all for failures without a dedicated code.
    Generic,
}

impl ErrorCode {
    /// Every code in declaration order.
    pub const ALL: [Self; 18] = [
        Self::InvalidToken,
        Self::InvalidQr,
        Self::NotGuest,
        Self::TokenExpired,
        Self::TokenUsed,
        Self::TokenMaxUsesReached,
        Self::BranchNotFound,
        Self::NotAuthenticated,
        Self::TooManyPending,
        Self::AlreadyPending,
        Self::AlreadyRegistered,
        Self::EmailMismatch,
        Self::NetworkError,
        Self::Timeout,
        Self::ServerError,
        Self::NotFound,
        Self::RateLimited,
        Self::Generic,
    ];

    /// Wire spelling of the code.
    ///
    /// # Examples
    /// ```
    /// use menu_viewer::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::TokenMaxUsesReached.as_str(), "token_max_uses_reached");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidToken => "invalid_token",
            Self::InvalidQr => "invalid_qr",
            Self::NotGuest => "not_guest",
            Self::TokenExpired => "token_expired",
            Self::TokenUsed => "token_used",
            Self::TokenMaxUsesReached => "token_max_uses_reached",
            Self::BranchNotFound => "branch_not_found",
            Self::NotAuthenticated => "not_authenticated",
            Self::TooManyPending => "too_many_pending",
            Self::AlreadyPending => "already_pending",
            Self::AlreadyRegistered => "already_registered",
            Self::EmailMismatch => "email_mismatch",
            Self::NetworkError => "network_error",
            Self::Timeout => "timeout",
            Self::ServerError => "server_error",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::Generic => "generic",
        }
    }

    /// Whether the user can reasonably retry the same action unchanged.
    ///
    /// Only transport-level failures qualify; nothing is retried
    /// automatically.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::Timeout | Self::ServerError | Self::RateLimited
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string is not a member of the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code: {0}")]
pub struct UnknownErrorCode(pub String);

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownErrorCode(s.to_owned()))
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `diagnostic` is raw backend detail for developers; adapters only expose
///   it when diagnostics are enabled.
/// - `trace_id` is captured from the ambient [`TraceId`] at construction.
/// - `invalid_input` marks failures caused by what the caller sent rather
///   than by this service or its backends.
///
/// # Examples
/// ```
/// use menu_viewer::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::Timeout).with_diagnostic("menu fetch exceeded 10s");
/// assert_eq!(err.code(), ErrorCode::Timeout);
/// assert_eq!(err.diagnostic(), Some("menu fetch exceeded 10s"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    diagnostic: Option<String>,
    trace_id: Option<String>,
    invalid_input: bool,
}

impl Error {
    /// Create an error for the given code.
    #[must_use]
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            diagnostic: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
            invalid_input: false,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Raw diagnostic text, if any was attached.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    /// Correlation identifier captured when the error was created.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Whether the failure was caused by the caller's input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        self.invalid_input
    }

    /// Attach raw diagnostic detail. Blank text is ignored.
    #[must_use]
    pub fn with_diagnostic(mut self, diagnostic: impl Into<String>) -> Self {
        let diagnostic = diagnostic.into();
        if !diagnostic.trim().is_empty() {
            self.diagnostic = Some(diagnostic);
        }
        self
    }

    /// Drop any diagnostic detail, e.g. before leaving a production build.
    #[must_use]
    pub fn without_diagnostic(mut self) -> Self {
        self.diagnostic = None;
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidQr`].
    #[must_use]
    pub fn invalid_qr() -> Self {
        Self::new(ErrorCode::InvalidQr)
    }

    /// Convenience constructor for [`ErrorCode::InvalidToken`].
    #[must_use]
    pub fn invalid_token() -> Self {
        Self::new(ErrorCode::InvalidToken)
    }

    /// Convenience constructor for [`ErrorCode::ServerError`].
    #[must_use]
    pub fn server_error() -> Self {
        Self::new(ErrorCode::ServerError)
    }

    /// Convenience constructor for [`ErrorCode::Generic`].
    #[must_use]
    pub fn generic() -> Self {
        Self::new(ErrorCode::Generic)
    }

    /// A [`ErrorCode::Generic`] failure caused by the caller's input, such as
    /// a blank form field or an unreadable request body.
    #[must_use]
    pub fn invalid_input(diagnostic: impl Into<String>) -> Self {
        Self {
            invalid_input: true,
            ..Self::generic()
        }
        .with_diagnostic(diagnostic)
    }
}

impl From<ErrorCode> for Error {
    fn from(code: ErrorCode) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.diagnostic {
            Some(diagnostic) => write!(f, "{}: {diagnostic}", self.code),
            None => write!(f, "{}", self.code),
        }
    }
}

impl std::error::Error for Error {}
