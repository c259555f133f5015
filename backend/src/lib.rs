//! Menu viewer service library.
//!
//! Resolves scanned QR payloads into guest wine menus or staff onboarding,
//! and serves the guest token authorization endpoint.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
