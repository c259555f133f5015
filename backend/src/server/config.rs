//! HTTP server configuration object.

use std::net::SocketAddr;

use menu_viewer::settings::AppConfig;

/// Validated configuration plus the listener address.
pub struct ServerConfig {
    pub(crate) app: AppConfig,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Build from validated settings, binding where they say.
    #[must_use]
    pub fn new(app: AppConfig) -> Self {
        let bind_addr = app.bind_addr;
        Self { app, bind_addr }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
