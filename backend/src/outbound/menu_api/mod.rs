//! Menu resolution outbound adapter.
//!
//! A reqwest implementation of the `MenuSource` port against the
//! `public-menu` endpoint.

mod dto;
mod http_source;

pub use http_source::HttpMenuSource;
