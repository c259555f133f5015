//! DTOs for menu endpoint failure bodies.
//!
//! Success bodies decode straight into `MenuResult`.

use serde::Deserialize;

use crate::domain::ErrorCode;

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) error: Option<String>,
}

impl ErrorBodyDto {
    /// Recognised taxonomy code carried by the body, if any.
    pub(super) fn code(&self) -> Option<ErrorCode> {
        self.error.as_deref()?.parse().ok()
    }
}
