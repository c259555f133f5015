//! Guest-facing QR views.
//!
//! ```text
//! GET /qr?data=<percent-encoded JSON>&lang=<es|en>
//! GET /menu/{token}
//! ```

use actix_web::{HttpRequest, HttpResponse, get, web};

use crate::domain::{Error, MessageScope, QrResolution};
use crate::inbound::http::cache_control::menu_view_header;
use crate::inbound::http::error::{ApiError, ApiResult, ErrorEnvelope};
use crate::inbound::http::locale::request_locale;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{MenuView, QrView, StaffInviteView};

/// Raw `data` value exactly as sent, still percent-encoded.
///
/// `web::Query` would decode it once already; the payload codec expects the
/// encoded form and the deep link reuses it verbatim.
fn raw_data_param(query: &str) -> Option<&str> {
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("data="))
}

/// Resolve a scanned QR code.
#[utoipa::path(
    get,
    path = "/qr",
    description = "Decode a scanned QR payload. Guest payloads resolve to the branch menu; staff invite payloads resolve to the onboarding summary.",
    params(
        ("data" = Option<String>, Query, description = "Percent-encoded JSON payload"),
        ("lang" = Option<String>, Query, description = "Display language, es or en")
    ),
    responses(
        (status = 200, description = "Menu or staff invite view", body = QrView),
        (status = 400, description = "Payload missing or invalid", body = ErrorEnvelope),
        (status = 403, description = "Token is not a guest token", body = ErrorEnvelope),
        (status = 404, description = "Menu not found", body = ErrorEnvelope),
        (status = 410, description = "Token expired", body = ErrorEnvelope),
        (status = 502, description = "Menu backend failed", body = ErrorEnvelope),
        (status = 504, description = "Menu backend timed out", body = ErrorEnvelope)
    ),
    tags = ["views"],
    operation_id = "scanQr"
)]
#[get("/qr")]
pub async fn scan_qr(req: HttpRequest, state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let locale = request_locale(&req, state.default_locale);
    let resolution = state
        .resolver
        .resolve_qr(raw_data_param(req.query_string()))
        .await
        .map_err(|err| ApiError::presented(&state.presenter, MessageScope::Menu, locale, err))?;

    let response = match resolution {
        QrResolution::Menu { payload, menu } => HttpResponse::Ok()
            .insert_header(menu_view_header())
            .json(QrView::Menu(MenuView::new(
                locale,
                &payload,
                menu,
                &state.app_links,
            ))),
        QrResolution::StaffInvite { payload } => {
            HttpResponse::Ok().json(QrView::StaffInvite(StaffInviteView::new(
                locale,
                &payload,
                &state.app_links,
            )))
        }
    };
    Ok(response)
}

/// Show the menu for a bare guest token.
#[utoipa::path(
    get,
    path = "/menu/{token}",
    params(
        ("token" = String, Path, description = "Guest token"),
        ("lang" = Option<String>, Query, description = "Display language, es or en")
    ),
    responses(
        (status = 200, description = "Menu view", body = MenuView),
        (status = 400, description = "Blank token", body = ErrorEnvelope),
        (status = 404, description = "Menu not found", body = ErrorEnvelope),
        (status = 410, description = "Token expired", body = ErrorEnvelope),
        (status = 502, description = "Menu backend failed", body = ErrorEnvelope),
        (status = 504, description = "Menu backend timed out", body = ErrorEnvelope)
    ),
    tags = ["views"],
    operation_id = "showMenu"
)]
#[get("/menu/{token}")]
pub async fn show_menu(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let locale = request_locale(&req, state.default_locale);
    let present = |err: Error| ApiError::presented(&state.presenter, MessageScope::Menu, locale, err);
    let (payload, menu) = state.resolver.resolve_token(&path).await.map_err(present)?;
    Ok(HttpResponse::Ok()
        .insert_header(menu_view_header())
        .json(MenuView::new(locale, &payload, menu, &state.app_links)))
}
