//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use url::Url;

use crate::domain::ports::{
    FixtureAuthProvider, FixtureMenuCatalogueRepository, FixtureMenuSource,
    FixtureStaffAccessRequester,
};
use crate::domain::{AppLinks, Locale, Presenter};
use crate::inbound::http::cors::CorsPolicy;
use crate::inbound::http::state::{HttpState, HttpStateOptions, HttpStatePorts};

/// Clock frozen at one instant.
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freeze at an RFC 3339 timestamp.
    pub fn at_rfc3339(timestamp: &str) -> Self {
        let at = DateTime::parse_from_rfc3339(timestamp).expect("valid RFC 3339 timestamp");
        Self(at.with_timezone(&Utc))
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Ports backed by the fixture implementations.
pub fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        menu_source: Arc::new(FixtureMenuSource),
        catalogue: Arc::new(FixtureMenuCatalogueRepository),
        auth: Arc::new(FixtureAuthProvider),
        staff_access: Arc::new(FixtureStaffAccessRequester),
        clock: Arc::new(FixedClock::at_rfc3339("2026-01-15T12:00:00Z")),
    }
}

/// App links used across handler tests.
pub fn test_links() -> AppLinks {
    AppLinks::new(
        "cellarium",
        Url::parse("https://apps.apple.com/").expect("url"),
        Url::parse("https://play.google.com/store").expect("url"),
    )
}

/// State over `ports` with production presentation settings.
pub fn state_with(ports: HttpStatePorts) -> HttpState {
    HttpState::new(
        ports,
        HttpStateOptions {
            presenter: Presenter::default(),
            app_links: test_links(),
            cors: CorsPolicy::Any,
            default_locale: Locale::Es,
        },
    )
}

/// State over fixture ports.
pub fn test_state() -> HttpState {
    state_with(fixture_ports())
}
