//! Service entry-point: loads configuration, wires adapters and runs the
//! HTTP server.

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use menu_viewer::inbound::http::health::HealthState;
use menu_viewer::settings::{AppConfig, AppSettings};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args: Vec<OsString> = std::env::args_os().collect();
    let settings = AppSettings::load_from_iter(args).map_err(|e| eyre!("{e}"))?;
    let config = AppConfig::from_settings(&settings).wrap_err("invalid configuration")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(config))
        .wrap_err("failed to start server")?;
    server.await.wrap_err("server terminated with an error")
}
