//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **menu_api**: reqwest client for the remote menu resolution endpoint
//! - **cache**: short-lived menu cache in front of any menu source
//! - **supabase**: reqwest client for sign-up, session lookup and the
//!   access-request RPC
//! - **memory**: in-memory catalogue store backing the local `public-menu`
//!
//! Adapters are thin translators between domain types and wire formats. They
//! contain no business logic.

mod body_preview;

pub mod cache;
pub mod memory;
pub mod menu_api;
pub mod supabase;

pub(crate) use body_preview::body_preview;
