use super::*;
use crate::domain::{ErrorCode, QrToken};
use actix_rt::System;
use rstest::{fixture, rstest};

#[fixture]
fn token() -> QrToken {
    QrToken::new("abc123").expect("valid token")
}

#[fixture]
fn session() -> AuthSession {
    AuthSession {
        access_token: "secret-access-token".to_owned(),
        user: AuthUser {
            id: "user-1".to_owned(),
            email: Some("ana@example.com".to_owned()),
            metadata: ProfileMetadata::default(),
        },
    }
}

#[rstest]
#[case(MenuSourceError::rejected(ErrorCode::NotGuest), ErrorCode::NotGuest)]
#[case(MenuSourceError::rejected(ErrorCode::RateLimited), ErrorCode::RateLimited)]
#[case(MenuSourceError::timeout("10s elapsed"), ErrorCode::Timeout)]
#[case(MenuSourceError::transport("connection refused"), ErrorCode::NetworkError)]
#[case(MenuSourceError::server("status 502"), ErrorCode::ServerError)]
fn menu_source_errors_collapse_to_transport_categories(
    #[case] error: MenuSourceError,
    #[case] expected: ErrorCode,
) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case(AuthProviderError::rejected(422_u16, "weak password"))]
#[case(AuthProviderError::timeout("elapsed"))]
#[case(AuthProviderError::transport("dns"))]
fn auth_failures_are_generic(#[case] error: AuthProviderError) {
    assert_eq!(error.code(), ErrorCode::Generic);
}

#[rstest]
fn catalogue_errors_are_server_errors() {
    assert_eq!(
        MenuCatalogueRepositoryError::query("relation missing").code(),
        ErrorCode::ServerError
    );
}

#[rstest]
fn secrets_are_redacted_in_debug_output(session: AuthSession) {
    let request = SignUpRequest {
        email: "ana@example.com".to_owned(),
        password: "hunter22".to_owned(),
        full_name: "Ana".to_owned(),
        username: None,
    };
    assert!(!format!("{request:?}").contains("hunter22"));
    assert!(!format!("{session:?}").contains("secret-access-token"));
}

#[rstest]
fn fixtures_behave_as_documented(token: QrToken, session: AuthSession) {
    System::new().block_on(async move {
        let menu = FixtureMenuSource
            .fetch_menu(&token)
            .await
            .expect("fixture menu");
        assert!(menu.wines.is_empty());

        let outcome = FixtureAuthProvider
            .sign_up(&SignUpRequest {
                email: "ana@example.com".to_owned(),
                password: "hunter22".to_owned(),
                full_name: "Ana".to_owned(),
                username: None,
            })
            .await
            .expect("fixture sign-up");
        assert!(outcome.session.is_none());

        let reply = FixtureStaffAccessRequester
            .request_staff_access(
                &session,
                &StaffAccessRequest {
                    token: token.clone(),
                    name: "Ana".to_owned(),
                    username: None,
                },
            )
            .await
            .expect("fixture reply");
        assert!(reply.ok);

        let found = FixtureMenuCatalogueRepository
            .find_token(&token)
            .await
            .expect("fixture lookup");
        assert!(found.is_none());
    });
}
