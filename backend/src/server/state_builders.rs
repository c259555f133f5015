//! Builders for the adapters behind the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use menu_viewer::domain::ports::{MenuCatalogueRepository, MenuSource};
use menu_viewer::domain::{BuiltinCatalog, Presenter};
use menu_viewer::inbound::http::state::{HttpState, HttpStateOptions, HttpStatePorts};
use menu_viewer::outbound::cache::CachedMenuSource;
use menu_viewer::outbound::memory::InMemoryMenuCatalogue;
use menu_viewer::outbound::menu_api::HttpMenuSource;
use menu_viewer::outbound::supabase::SupabaseAuthClient;
use menu_viewer::settings::AppConfig;

fn build_menu_source(
    config: &AppConfig,
    clock: Arc<dyn Clock>,
) -> std::io::Result<Arc<dyn MenuSource>> {
    let http = HttpMenuSource::new(
        config.menu_api_url.clone(),
        config.anon_key.clone(),
        config.menu_timeout,
    )
    .map_err(|e| std::io::Error::other(format!("menu client construction failed: {e}")))?;
    if config.menu_cache_ttl.is_zero() {
        return Ok(Arc::new(http));
    }
    Ok(Arc::new(CachedMenuSource::new(
        Arc::new(http),
        clock,
        config.menu_cache_ttl,
    )))
}

fn build_catalogue(config: &AppConfig) -> std::io::Result<Arc<dyn MenuCatalogueRepository>> {
    match &config.catalogue_path {
        Some(path) => {
            let catalogue = InMemoryMenuCatalogue::load(path)
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            info!(
                path = %path.display(),
                tokens = catalogue.token_count(),
                "catalogue fixture loaded"
            );
            Ok(Arc::new(catalogue))
        }
        None => {
            warn!("no catalogue fixture configured; public menu will answer not_found");
            Ok(Arc::new(InMemoryMenuCatalogue::default()))
        }
    }
}

/// Wire every port from configuration.
///
/// # Errors
///
/// Returns [`std::io::Error`] when an HTTP client cannot be constructed or
/// the catalogue fixture cannot be loaded.
pub fn build_http_state(config: &AppConfig) -> std::io::Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let supabase = Arc::new(
        SupabaseAuthClient::new(
            &config.supabase_url,
            config.anon_key.clone(),
            config.menu_timeout,
        )
        .map_err(|e| std::io::Error::other(format!("auth client construction failed: {e}")))?,
    );

    let ports = HttpStatePorts {
        menu_source: build_menu_source(config, clock.clone())?,
        catalogue: build_catalogue(config)?,
        auth: supabase.clone(),
        staff_access: supabase,
        clock,
    };
    let options = HttpStateOptions {
        presenter: Presenter::new(Arc::new(BuiltinCatalog), config.diagnostics),
        app_links: config.app_links.clone(),
        cors: config.cors.clone(),
        default_locale: config.default_locale,
    };
    Ok(HttpState::new(ports, options))
}
