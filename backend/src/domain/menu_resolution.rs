//! QR and token resolution against a [`MenuSource`].
//!
//! Decoding failures, backend rejections and transport failures stay in
//! their own layers until they collapse into one [`Error`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{MenuSource, MenuSourceError};
use crate::domain::{Error, MenuResult, QrKind, QrPayload, QrToken, decode_qr_payload};

/// What a scanned QR resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum QrResolution {
    /// Guest payload with its menu.
    Menu {
        payload: QrPayload,
        menu: MenuResult,
    },
    /// Staff payload; the onboarding flow takes over.
    StaffInvite { payload: QrPayload },
}

/// Turns raw QR values and bare tokens into menus.
#[derive(Clone)]
pub struct MenuResolver {
    source: Arc<dyn MenuSource>,
}

impl MenuResolver {
    /// Resolve menus through `source`.
    pub fn new(source: Arc<dyn MenuSource>) -> Self {
        Self { source }
    }

    /// Decode a raw query value and, for guest payloads, fetch the menu.
    pub async fn resolve_qr(&self, raw: Option<&str>) -> Result<QrResolution, Error> {
        let payload = decode_qr_payload(raw)?;
        match payload.kind() {
            QrKind::Guest => {
                let menu = self.fetch(payload.token()).await?;
                Ok(QrResolution::Menu { payload, menu })
            }
            QrKind::AdminInvite => Ok(QrResolution::StaffInvite { payload }),
        }
    }

    /// Fetch the menu for a bare token taken from a path segment.
    ///
    /// The returned payload is the guest payload a QR for this token would
    /// carry.
    pub async fn resolve_token(&self, raw: &str) -> Result<(QrPayload, MenuResult), Error> {
        let token = QrToken::new(raw).map_err(|_| Error::invalid_token())?;
        let menu = self.fetch(&token).await?;
        Ok((QrPayload::guest(token), menu))
    }

    async fn fetch(&self, token: &QrToken) -> Result<MenuResult, Error> {
        let prefix = token.log_prefix();
        match self.source.fetch_menu(token).await {
            Ok(menu) => {
                debug!(token = %prefix, wines = menu.wines.len(), "menu resolved");
                Ok(menu)
            }
            Err(err) => {
                if matches!(err, MenuSourceError::Rejected { .. }) {
                    debug!(token = %prefix, error = %err, "menu backend rejected token");
                } else {
                    warn!(token = %prefix, error = %err, "menu fetch failed");
                }
                Err(Error::new(err.code()).with_diagnostic(err.to_string()))
            }
        }
    }
}
