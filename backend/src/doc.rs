//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler in the HTTP inbound layer together
//! with the view, envelope and request schemas they use. The document is
//! served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::OpenApi;

use crate::domain::{Availability, Branch, ErrorCode, Locale, MenuResult, Wine, WineCategory};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::health::ServiceStatus;
use crate::inbound::http::public_menu::PublicMenuError;
use crate::inbound::http::staff_invite::{StaffInviteRequest, StaffInviteResponse};
use crate::inbound::http::views::{AppLinksView, MenuView, QrView, StaffInviteView, WineView};

/// OpenAPI document for the HTTP API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Menu viewer API",
        description = "QR resolution into guest wine menus, staff onboarding and guest token authorization."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::qr::scan_qr,
        crate::inbound::http::qr::show_menu,
        crate::inbound::http::public_menu::get_public_menu,
        crate::inbound::http::public_menu::post_public_menu,
        crate::inbound::http::public_menu::preflight_public_menu,
        crate::inbound::http::staff_invite::submit_staff_invite,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::health::service_status,
    ),
    components(schemas(
        ErrorEnvelope,
        ErrorCode,
        Locale,
        Branch,
        Wine,
        Availability,
        WineCategory,
        MenuResult,
        AppLinksView,
        WineView,
        MenuView,
        StaffInviteView,
        QrView,
        PublicMenuError,
        StaffInviteRequest,
        StaffInviteResponse,
        ServiceStatus,
    )),
    tags(
        (name = "views", description = "Guest-facing QR and menu views"),
        (name = "public-menu", description = "Guest token authorization"),
        (name = "staff-invite", description = "Staff onboarding"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
