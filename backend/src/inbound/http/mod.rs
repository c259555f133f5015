//! HTTP inbound adapter: guest views, the public menu API and staff
//! onboarding.

pub mod cache_control;
pub mod cors;
pub mod error;
pub mod health;
pub mod locale;
pub mod public_menu;
pub mod qr;
pub mod staff_invite;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use error::{ApiError, ApiResult};
