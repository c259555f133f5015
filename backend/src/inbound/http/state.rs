//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and ports and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AuthProvider, MenuCatalogueRepository, MenuSource, StaffAccessRequester,
};
use crate::domain::{
    AppLinks, GuestMenuService, Locale, MenuResolver, Presenter, StaffInviteFlow,
};
use crate::inbound::http::cors::CorsPolicy;

/// Parameter object bundling the port implementations behind the handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub menu_source: Arc<dyn MenuSource>,
    pub catalogue: Arc<dyn MenuCatalogueRepository>,
    pub auth: Arc<dyn AuthProvider>,
    pub staff_access: Arc<dyn StaffAccessRequester>,
    pub clock: Arc<dyn Clock>,
}

/// Presentation settings shared by every handler.
#[derive(Debug, Clone)]
pub struct HttpStateOptions {
    pub presenter: Presenter,
    pub app_links: AppLinks,
    pub cors: CorsPolicy,
    pub default_locale: Locale,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub resolver: MenuResolver,
    pub guest_menu: GuestMenuService,
    pub invite: StaffInviteFlow,
    pub presenter: Presenter,
    pub app_links: AppLinks,
    pub cors: CorsPolicy,
    pub default_locale: Locale,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Wire the domain services over `ports`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use menu_viewer::domain::ports::{
    ///     FixtureAuthProvider, FixtureMenuCatalogueRepository, FixtureMenuSource,
    ///     FixtureStaffAccessRequester,
    /// };
    /// use menu_viewer::domain::{AppLinks, Locale, Presenter};
    /// use menu_viewer::inbound::http::cors::CorsPolicy;
    /// use menu_viewer::inbound::http::state::{HttpState, HttpStateOptions, HttpStatePorts};
    /// use mockable::DefaultClock;
    /// use url::Url;
    ///
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         menu_source: Arc::new(FixtureMenuSource),
    ///         catalogue: Arc::new(FixtureMenuCatalogueRepository),
    ///         auth: Arc::new(FixtureAuthProvider),
    ///         staff_access: Arc::new(FixtureStaffAccessRequester),
    ///         clock: Arc::new(DefaultClock),
    ///     },
    ///     HttpStateOptions {
    ///         presenter: Presenter::default(),
    ///         app_links: AppLinks::new(
    ///             "cellarium",
    ///             Url::parse("https://apps.apple.com/").expect("url"),
    ///             Url::parse("https://play.google.com/store").expect("url"),
    ///         ),
    ///         cors: CorsPolicy::Any,
    ///         default_locale: Locale::Es,
    ///     },
    /// );
    /// assert_eq!(state.default_locale, Locale::Es);
    /// ```
    pub fn new(ports: HttpStatePorts, options: HttpStateOptions) -> Self {
        let HttpStatePorts {
            menu_source,
            catalogue,
            auth,
            staff_access,
            clock,
        } = ports;
        Self {
            resolver: MenuResolver::new(menu_source),
            guest_menu: GuestMenuService::new(catalogue, clock.clone()),
            invite: StaffInviteFlow::new(auth, staff_access),
            presenter: options.presenter,
            app_links: options.app_links,
            cors: options.cors,
            default_locale: options.default_locale,
            clock,
        }
    }
}
