//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while turning failures
//! into one JSON envelope, `{ code, message, retryable, traceId? }`, with a
//! status derived from the code. The message is rendered by the presenter
//! before the error leaves the handler, so raw backend text only appears
//! when diagnostics are enabled.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, Locale, MessageScope, Presenter, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error envelope returned by every failing view and API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Stable machine-readable code.
    #[schema(example = "token_expired")]
    pub code: ErrorCode,
    /// Localized user-facing message.
    #[schema(example = "Este enlace ha caducado.")]
    pub message: String,
    /// Whether repeating the same action may succeed.
    pub retryable: bool,
    /// Correlation identifier of the failed request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub trace_id: Option<String>,
}

/// A domain error paired with its rendered message.
#[derive(Debug, Clone)]
pub struct ApiError {
    error: Error,
    message: String,
}

impl ApiError {
    /// Render `error` for `locale` within `scope`.
    pub fn presented(
        presenter: &Presenter,
        scope: MessageScope,
        locale: Locale,
        error: impl Into<Error>,
    ) -> Self {
        let error = error.into();
        let message = presenter.error_message(scope, &error, locale);
        Self { error, message }
    }

    /// Underlying domain error.
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Envelope sent to the client.
    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            code: self.error.code(),
            message: self.message.clone(),
            retryable: self.error.code().is_retryable(),
            trace_id: self.error.trace_id().map(str::to_owned),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

/// HTTP status for a taxonomy code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidQr | ErrorCode::InvalidToken | ErrorCode::EmailMismatch => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::NotAuthenticated => StatusCode::UNAUTHORIZED,
        ErrorCode::NotGuest => StatusCode::FORBIDDEN,
        ErrorCode::NotFound | ErrorCode::BranchNotFound => StatusCode::NOT_FOUND,
        ErrorCode::TooManyPending | ErrorCode::AlreadyPending | ErrorCode::AlreadyRegistered => {
            StatusCode::CONFLICT
        }
        ErrorCode::TokenExpired | ErrorCode::TokenUsed | ErrorCode::TokenMaxUsesReached => {
            StatusCode::GONE
        }
        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::NetworkError | ErrorCode::ServerError => StatusCode::BAD_GATEWAY,
        ErrorCode::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorCode::Generic => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        if self.error.is_invalid_input() {
            return StatusCode::BAD_REQUEST;
        }
        status_for(self.error.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        builder.insert_header((header::CACHE_CONTROL, "no-store"));
        if let Some(id) = self.error.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(self.envelope())
    }
}

#[cfg(test)]
mod tests;
