//! Tests for HTTP error mapping.

use super::*;
use crate::domain::{DiagnosticsMode, TraceId};
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use std::sync::Arc;

#[fixture]
fn presenter() -> Presenter {
    Presenter::default()
}

#[rstest]
#[case(ErrorCode::InvalidQr, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::InvalidToken, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::NotGuest, StatusCode::FORBIDDEN)]
#[case(ErrorCode::TokenExpired, StatusCode::GONE)]
#[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
#[case(ErrorCode::NotAuthenticated, StatusCode::UNAUTHORIZED)]
#[case(ErrorCode::AlreadyRegistered, StatusCode::CONFLICT)]
#[case(ErrorCode::RateLimited, StatusCode::TOO_MANY_REQUESTS)]
#[case(ErrorCode::NetworkError, StatusCode::BAD_GATEWAY)]
#[case(ErrorCode::Timeout, StatusCode::GATEWAY_TIMEOUT)]
#[case(ErrorCode::Generic, StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] code: ErrorCode, #[case] status: StatusCode) {
    assert_eq!(status_for(code), status);
}

#[rstest]
fn every_code_has_an_error_status() {
    for code in ErrorCode::ALL {
        let status = status_for(code);
        assert!(status.is_client_error() || status.is_server_error(), "{code}");
    }
}

#[rstest]
#[actix_web::test]
async fn envelope_carries_localized_message_and_trace_id(presenter: Presenter) {
    let trace_id = TraceId::generate();
    let api_error = TraceId::scope(trace_id, async {
        ApiError::presented(
            &presenter,
            MessageScope::Menu,
            Locale::Es,
            Error::new(ErrorCode::TokenExpired).with_diagnostic("row 42 expired"),
        )
    })
    .await;

    let response = api_error.error_response();
    assert_eq!(response.status(), StatusCode::GONE);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace-id header")
        .to_str()
        .expect("ascii header")
        .to_owned();
    assert_eq!(header, trace_id.to_string());

    let bytes = to_bytes(response.into_body()).await.expect("body");
    let envelope: ErrorEnvelope = serde_json::from_slice(&bytes).expect("envelope json");
    assert_eq!(envelope.code, ErrorCode::TokenExpired);
    assert_eq!(envelope.message, "Este enlace ha caducado.");
    assert!(!envelope.retryable);
    assert_eq!(envelope.trace_id.as_deref(), Some(header.as_str()));
}

#[rstest]
#[case::input(Error::invalid_input("password too short"), StatusCode::BAD_REQUEST)]
#[case::server(Error::generic(), StatusCode::INTERNAL_SERVER_ERROR)]
fn generic_status_depends_on_fault(
    presenter: Presenter,
    #[case] error: Error,
    #[case] status: StatusCode,
) {
    let api_error = ApiError::presented(&presenter, MessageScope::StaffInvite, Locale::En, error);
    assert_eq!(api_error.status_code(), status);
    assert_eq!(api_error.envelope().code, ErrorCode::Generic);
}

#[rstest]
fn production_hides_diagnostics(presenter: Presenter) {
    let api_error = ApiError::presented(
        &presenter,
        MessageScope::StaffInvite,
        Locale::En,
        Error::generic().with_diagnostic("upstream said 500"),
    );
    assert!(!api_error.envelope().message.contains("upstream"));
}

#[rstest]
fn development_appends_diagnostics() {
    let presenter = Presenter::new(
        Arc::new(crate::domain::BuiltinCatalog),
        DiagnosticsMode::Development,
    );
    let api_error = ApiError::presented(
        &presenter,
        MessageScope::StaffInvite,
        Locale::En,
        Error::generic().with_diagnostic("upstream said 500"),
    );
    assert!(api_error.envelope().message.contains("upstream said 500"));
}

#[rstest]
fn retryable_flag_follows_code(presenter: Presenter) {
    let api_error = ApiError::presented(
        &presenter,
        MessageScope::Menu,
        Locale::Es,
        ErrorCode::Timeout,
    );
    assert!(api_error.envelope().retryable);
    assert!(api_error.envelope().trace_id.is_none());
}
