//! Reqwest client for the Supabase auth and REST APIs.
//!
//! Every request carries the anon key as `apikey`. Authenticated calls use
//! the caller's access token as bearer; sign-up uses the anon key.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use thiserror::Error;
use zeroize::Zeroizing;

use super::dto::{AccessReplyDto, AccessRequestBodyDto, SignUpBodyDto, SignUpResponseDto, UserDto};
use crate::domain::ports::{
    AccessRequestReply, AuthProvider, AuthProviderError, AuthSession, SignUpOutcome,
    SignUpRequest, StaffAccessError, StaffAccessRequest, StaffAccessRequester,
};
use crate::outbound::body_preview;

const SIGN_UP_PATH: &str = "auth/v1/signup";
const USER_PATH: &str = "auth/v1/user";
const REQUEST_ACCESS_PATH: &str = "rest/v1/rpc/request_staff_access";

/// Failures while constructing [`SupabaseAuthClient`].
#[derive(Debug, Error)]
pub enum SupabaseClientError {
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// An endpoint could not be derived from the project URL.
    #[error("invalid Supabase endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Auth and access-request adapter for one Supabase project.
pub struct SupabaseAuthClient {
    client: Client,
    anon_key: Zeroizing<String>,
    sign_up_url: Url,
    user_url: Url,
    request_access_url: Url,
}

impl SupabaseAuthClient {
    /// Build a client for the project at `base`, bounding each call by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or an
    /// endpoint URL cannot be derived from `base`.
    pub fn new(
        base: &Url,
        anon_key: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, SupabaseClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base = with_trailing_slash(base);
        Ok(Self {
            client,
            anon_key,
            sign_up_url: base.join(SIGN_UP_PATH)?,
            user_url: base.join(USER_PATH)?,
            request_access_url: base.join(REQUEST_ACCESS_PATH)?,
        })
    }

    fn authorised(&self, request: RequestBuilder, bearer: &str) -> RequestBuilder {
        request
            .header("apikey", self.anon_key.as_str())
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {bearer}"))
            .header(reqwest::header::ACCEPT, "application/json")
    }
}

fn with_trailing_slash(base: &Url) -> Url {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

#[async_trait]
impl AuthProvider for SupabaseAuthClient {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthProviderError> {
        let response = self
            .authorised(
                self.client.post(self.sign_up_url.clone()),
                self.anon_key.as_str(),
            )
            .json(&SignUpBodyDto::from(request))
            .send()
            .await
            .map_err(map_auth_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_auth_transport_error)?;
        if !status.is_success() {
            return Err(map_auth_status_error(status, body.as_ref()));
        }

        let reply: SignUpResponseDto = serde_json::from_slice(body.as_ref()).map_err(|error| {
            AuthProviderError::transport(format!("invalid sign-up reply: {error}"))
        })?;
        Ok(SignUpOutcome {
            session: reply.into_session(),
        })
    }

    async fn load_session(
        &self,
        access_token: &str,
    ) -> Result<Option<AuthSession>, AuthProviderError> {
        let response = self
            .authorised(self.client.get(self.user_url.clone()), access_token)
            .send()
            .await
            .map_err(map_auth_transport_error)?;
        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Ok(None);
        }
        let body = response.bytes().await.map_err(map_auth_transport_error)?;
        if !status.is_success() {
            return Err(map_auth_status_error(status, body.as_ref()));
        }

        let user: UserDto = serde_json::from_slice(body.as_ref()).map_err(|error| {
            AuthProviderError::transport(format!("invalid user reply: {error}"))
        })?;
        Ok(Some(AuthSession {
            access_token: access_token.to_owned(),
            user: user.into_domain(),
        }))
    }
}

#[async_trait]
impl StaffAccessRequester for SupabaseAuthClient {
    async fn request_staff_access(
        &self,
        session: &AuthSession,
        request: &StaffAccessRequest,
    ) -> Result<AccessRequestReply, StaffAccessError> {
        let response = self
            .authorised(
                self.client.post(self.request_access_url.clone()),
                &session.access_token,
            )
            .json(&AccessRequestBodyDto::from(request))
            .send()
            .await
            .map_err(map_access_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_access_transport_error)?;
        if !status.is_success() {
            return Err(StaffAccessError::malformed(status_message(
                status,
                body.as_ref(),
            )));
        }

        serde_json::from_slice::<AccessReplyDto>(body.as_ref())
            .map(AccessRequestReply::from)
            .map_err(|error| StaffAccessError::malformed(format!("invalid RPC reply: {error}")))
    }
}

fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    }
}

fn map_auth_transport_error(error: reqwest::Error) -> AuthProviderError {
    if error.is_timeout() {
        AuthProviderError::timeout(error.to_string())
    } else {
        AuthProviderError::transport(error.to_string())
    }
}

fn map_auth_status_error(status: StatusCode, body: &[u8]) -> AuthProviderError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_owned()
    } else {
        preview
    };
    AuthProviderError::rejected(status.as_u16(), message)
}

fn map_access_transport_error(error: reqwest::Error) -> StaffAccessError {
    if error.is_timeout() {
        StaffAccessError::timeout(error.to_string())
    } else {
        StaffAccessError::transport(error.to_string())
    }
}
