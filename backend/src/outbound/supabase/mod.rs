//! Supabase-compatible auth and RPC adapter.
//!
//! One reqwest client implements both the `AuthProvider` and the
//! `StaffAccessRequester` ports against the same project URL.

mod client;
mod dto;

pub use client::{SupabaseAuthClient, SupabaseClientError};
