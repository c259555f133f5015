//! Shared cache-control policies for HTTP handlers.

/// Responses that must never be stored: errors, probes, invite outcomes.
pub const NO_STORE: &str = "no-store";

/// Guest menu views may be reused briefly, matching the menu cache window.
pub const PUBLIC_MENU_REVALIDATE: &str = "public, max-age=30, must-revalidate";

/// Build the cache-control header tuple for uncacheable responses.
pub const fn no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", NO_STORE)
}

/// Build the cache-control header tuple for guest menu views.
pub const fn menu_view_header() -> (&'static str, &'static str) {
    ("Cache-Control", PUBLIC_MENU_REVALIDATE)
}
