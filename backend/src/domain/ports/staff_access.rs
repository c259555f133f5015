//! Driven port for the idempotent staff access-request RPC.

use async_trait::async_trait;

use crate::domain::{ErrorCode, QrToken};
use crate::domain::ports::AuthSession;

use super::define_port_error;

define_port_error! {
    /// Transport-level failures of the access-request call.
    pub enum StaffAccessError {
        /// The call exceeded its time bound.
        Timeout { message: String } =>
            "access request timed out: {message}" => ErrorCode::Generic,
        /// No response reached us.
        Transport { message: String } =>
            "access request transport failed: {message}" => ErrorCode::Generic,
        /// The response did not carry `{ ok, error? }`.
        Malformed { message: String } =>
            "access request reply malformed: {message}" => ErrorCode::Generic,
    }
}

/// Arguments of the RPC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffAccessRequest {
    pub token: QrToken,
    pub name: String,
    pub username: Option<String>,
}

/// Structured RPC reply. `error` is free text from the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRequestReply {
    pub ok: bool,
    pub error: Option<String>,
}

/// Port for filing an access request as the session's identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StaffAccessRequester: Send + Sync {
    /// File or re-file an access request.
    async fn request_staff_access(
        &self,
        session: &AuthSession,
        request: &StaffAccessRequest,
    ) -> Result<AccessRequestReply, StaffAccessError>;
}

/// Fixture implementation that accepts every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStaffAccessRequester;

#[async_trait]
impl StaffAccessRequester for FixtureStaffAccessRequester {
    async fn request_staff_access(
        &self,
        _session: &AuthSession,
        _request: &StaffAccessRequest,
    ) -> Result<AccessRequestReply, StaffAccessError> {
        Ok(AccessRequestReply {
            ok: true,
            error: None,
        })
    }
}
