//! Domain primitives, services and ports.
//!
//! Purpose: hold the QR resolution and staff onboarding rules independent of
//! HTTP and of the concrete menu and auth backends. Inbound adapters call the
//! services defined here; outbound adapters implement [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: the closed failure taxonomy.
//! - QrPayload and its codec (`decode_qr_payload`, `encode_qr_payload`).
//! - MenuResult and its parts: the guest menu snapshot.
//! - MenuResolver: QR and token resolution against a menu source.
//! - GuestMenuService: in-process token authorization for `public-menu`.
//! - StaffInviteFlow: the staff onboarding state machine.
//! - Presenter: error code to localized message mapping.

pub mod app_links;
pub mod error;
pub mod menu;
pub mod menu_resolution;
pub mod ports;
pub mod presentation;
pub mod qr_payload;
pub mod staff_invite;
pub mod token_authorization;
pub mod trace_id;

pub use self::app_links::AppLinks;
pub use self::error::{Error, ErrorCode, UnknownErrorCode};
pub use self::menu::{
    Availability, Branch, MenuResult, MenuShapeError, SENSORY_LEVEL_MAX, Wine, WineCategory,
};
pub use self::menu_resolution::{MenuResolver, QrResolution};
pub use self::presentation::{
    BuiltinCatalog, DiagnosticsMode, Locale, MessageCatalog, MessageKey, MessageScope, Presenter,
    UnknownLocale, present,
};
pub use self::qr_payload::{
    InvalidQr, QrKind, QrPayload, QrToken, QrTokenValidationError, decode as decode_qr_payload,
    encode as encode_qr_payload, token_prefix,
};
pub use self::staff_invite::{
    InviteOutcome, InviteSession, InviteState, MIN_PASSWORD_CHARS, RegistrationForm,
    StaffInviteFlow, is_already_registered,
};
pub use self::token_authorization::{GuestMenuService, TokenRecord, authorize_guest};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
