//! Token authorization endpoint serving guest menus from the catalogue.
//!
//! ```text
//! GET     /api/v1/public-menu?token=<t>
//! POST    /api/v1/public-menu        {"token": "<t>"}
//! OPTIONS /api/v1/public-menu
//! ```
//!
//! Failures use the bare `{ "error": "<code>" }` body that menu clients
//! already understand, not the view error envelope.

use actix_web::{
    HttpRequest, HttpResponse, HttpResponseBuilder, get, http::StatusCode, http::header, options,
    post, web,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{ErrorCode, MenuResult, QrToken};
use crate::inbound::http::cache_control::{menu_view_header, no_store_header};
use crate::inbound::http::state::HttpState;

/// Failure body of the public menu endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PublicMenuError {
    #[schema(example = "token_expired")]
    pub error: ErrorCode,
}

#[derive(Debug, Default, Deserialize)]
struct TokenParams {
    #[serde(default)]
    token: Option<String>,
}

/// Status for codes this endpoint can produce.
pub fn public_menu_status(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidToken => StatusCode::BAD_REQUEST,
        ErrorCode::NotGuest => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::TokenExpired => StatusCode::GONE,
        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn query_token(req: &HttpRequest) -> Option<String> {
    web::Query::<TokenParams>::from_query(req.query_string())
        .ok()
        .and_then(|params| params.into_inner().token)
}

fn is_json(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().contains("application/json"))
}

fn body_token(req: &HttpRequest, body: &[u8]) -> Option<String> {
    if !is_json(req) {
        return None;
    }
    serde_json::from_slice::<TokenParams>(body)
        .ok()
        .and_then(|params| params.token)
}

fn with_cors(state: &HttpState, req: &HttpRequest, status: StatusCode) -> HttpResponseBuilder {
    let mut builder = HttpResponse::build(status);
    for pair in state.cors.headers_for(req) {
        builder.insert_header(pair);
    }
    builder
}

async fn respond(state: &HttpState, req: &HttpRequest, raw_token: Option<String>) -> HttpResponse {
    match authorize(state, raw_token).await {
        Ok(menu) => with_cors(state, req, StatusCode::OK)
            .insert_header(menu_view_header())
            .json(menu),
        Err(code) => with_cors(state, req, public_menu_status(code))
            .insert_header(no_store_header())
            .json(PublicMenuError { error: code }),
    }
}

async fn authorize(state: &HttpState, raw_token: Option<String>) -> Result<MenuResult, ErrorCode> {
    let raw_token = raw_token.unwrap_or_default();
    let token = QrToken::new(raw_token.trim()).map_err(|_| {
        debug!("public menu request without a token");
        ErrorCode::InvalidToken
    })?;
    state.guest_menu.resolve(&token).await
}

/// Resolve a guest token from the query string.
#[utoipa::path(
    get,
    path = "/api/v1/public-menu",
    params(("token" = Option<String>, Query, description = "Guest token")),
    responses(
        (status = 200, description = "Branch menu", body = MenuResult),
        (status = 400, description = "Token missing", body = PublicMenuError),
        (status = 403, description = "Not a guest token", body = PublicMenuError),
        (status = 404, description = "Token or branch unknown", body = PublicMenuError),
        (status = 410, description = "Token expired or used up", body = PublicMenuError),
        (status = 500, description = "Storage failure", body = PublicMenuError)
    ),
    tags = ["public-menu"],
    operation_id = "getPublicMenu"
)]
#[get("/public-menu")]
pub async fn get_public_menu(req: HttpRequest, state: web::Data<HttpState>) -> HttpResponse {
    respond(&state, &req, query_token(&req)).await
}

/// Resolve a guest token from the query string or a JSON body.
///
/// The query string wins when both carry a token.
#[utoipa::path(
    post,
    path = "/api/v1/public-menu",
    params(("token" = Option<String>, Query, description = "Guest token")),
    request_body(content = String, description = "`{\"token\": \"...\"}`", content_type = "application/json"),
    responses(
        (status = 200, description = "Branch menu", body = MenuResult),
        (status = 400, description = "Token missing", body = PublicMenuError),
        (status = 403, description = "Not a guest token", body = PublicMenuError),
        (status = 404, description = "Token or branch unknown", body = PublicMenuError),
        (status = 410, description = "Token expired or used up", body = PublicMenuError),
        (status = 500, description = "Storage failure", body = PublicMenuError)
    ),
    tags = ["public-menu"],
    operation_id = "postPublicMenu"
)]
#[post("/public-menu")]
pub async fn post_public_menu(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<HttpState>,
) -> HttpResponse {
    let token = query_token(&req)
        .filter(|token| !token.trim().is_empty())
        .or_else(|| body_token(&req, &body));
    respond(&state, &req, token).await
}

/// CORS preflight.
#[utoipa::path(
    options,
    path = "/api/v1/public-menu",
    responses((status = 204, description = "Preflight accepted")),
    tags = ["public-menu"],
    operation_id = "preflightPublicMenu"
)]
#[options("/public-menu")]
pub async fn preflight_public_menu(req: HttpRequest, state: web::Data<HttpState>) -> HttpResponse {
    with_cors(&state, &req, StatusCode::NO_CONTENT).finish()
}
