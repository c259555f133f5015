//! Staff onboarding endpoint.
//!
//! ```text
//! POST /api/v1/staff-invite
//! Authorization: Bearer <access token>   (optional)
//! {"data":"%7B...%7D","name":"Ana","email":"...","confirmEmail":"...","password":"..."}
//! ```

use actix_web::{HttpRequest, HttpResponse, http::header, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    Error, InviteOutcome, InviteSession, Locale, MessageScope, RegistrationForm,
    decode_qr_payload,
};
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::error::{ApiError, ApiResult, ErrorEnvelope};
use crate::inbound::http::locale::request_locale;
use crate::inbound::http::state::HttpState;

/// Registration submitted from an admin-invite QR.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffInviteRequest {
    /// Raw percent-encoded payload, as found in the QR `data` parameter.
    pub data: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub confirm_email: String,
    #[serde(default)]
    #[schema(format = Password)]
    pub password: String,
}

impl StaffInviteRequest {
    fn into_parts(self) -> (String, RegistrationForm) {
        let form = RegistrationForm {
            name: self.name,
            username: self.username.unwrap_or_default(),
            email: self.email,
            confirm_email: self.confirm_email,
            password: self.password,
        };
        (self.data, form)
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StaffInviteResponse {
    /// `account_pending` or `request_submitted`.
    #[schema(example = "request_submitted")]
    pub state: String,
    /// Localized outcome message.
    pub message: String,
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Register and request staff access for the invited branch.
#[utoipa::path(
    post,
    path = "/api/v1/staff-invite",
    request_body = StaffInviteRequest,
    params(("lang" = Option<String>, Query, description = "Display language, es or en")),
    responses(
        (status = 200, description = "Account pending or request submitted", body = StaffInviteResponse),
        (status = 400, description = "Invalid payload or form", body = ErrorEnvelope),
        (status = 401, description = "Session missing", body = ErrorEnvelope),
        (status = 409, description = "Account exists or request refused", body = ErrorEnvelope),
        (status = 410, description = "Invite expired or used", body = ErrorEnvelope),
        (status = 500, description = "Unexpected failure", body = ErrorEnvelope)
    ),
    tags = ["staff-invite"],
    operation_id = "submitStaffInvite"
)]
#[post("/staff-invite")]
pub async fn submit_staff_invite(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let locale = request_locale(&req, state.default_locale);
    let present =
        |err: Error| ApiError::presented(&state.presenter, MessageScope::StaffInvite, locale, err);

    let request: StaffInviteRequest = serde_json::from_slice(&body).map_err(|err| {
        debug!(error = %err, "staff invite body rejected");
        present(Error::invalid_input(format!("invalid request body: {err}")))
    })?;
    let (data, mut form) = request.into_parts();
    let payload = decode_qr_payload(Some(&data)).map_err(|_| present(Error::invalid_qr()))?;

    let mut session = match bearer_token(&req) {
        Some(access_token) => state.invite.resume(access_token).await.map_err(present)?,
        None => InviteSession::new(),
    };
    let outcome = state
        .invite
        .submit(&mut session, &payload, &mut form)
        .await
        .map_err(present)?;

    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(outcome_response(&state, outcome, locale)))
}

fn outcome_response(
    state: &HttpState,
    outcome: InviteOutcome,
    locale: Locale,
) -> StaffInviteResponse {
    StaffInviteResponse {
        state: outcome.as_str().to_owned(),
        message: state.presenter.message(outcome.message_key(), locale),
    }
}
