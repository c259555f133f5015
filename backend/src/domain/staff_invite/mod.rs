//! Staff onboarding state machine.
//!
//! `Unauthenticated → AccountPending → Authenticated → RequestSubmitted`,
//! with `Authenticated` reached directly when sign-up returns a live session.
//! Each step awaits the previous one; nothing is retried automatically.
//! Double submission of the access request is tolerated because the backend
//! answers `already_pending`, which counts as success here.

mod form;
mod signals;

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{
    AccessRequestReply, AuthProvider, AuthSession, ProfileMetadata, SignUpOutcome,
    StaffAccessRequest, StaffAccessRequester,
};
use crate::domain::{Error, ErrorCode, MessageKey, QrKind, QrPayload};

pub use form::{MIN_PASSWORD_CHARS, RegistrationForm};
pub use signals::is_already_registered;

/// Observable state of one onboarding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteState {
    /// No account or session yet.
    Unauthenticated,
    /// Account created; email confirmation outstanding.
    AccountPending,
    /// Session available; access request not yet recorded.
    Authenticated,
    /// Access request recorded. Terminal.
    RequestSubmitted,
}

/// Ephemeral per-visit state. The current [`InviteState`] is derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteSession {
    auth_session: Option<AuthSession>,
    request_sent: bool,
    pending_account_awaiting_confirmation: bool,
}

impl InviteSession {
    /// Fresh visit without a session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Visit resumed with an existing session.
    #[must_use]
    pub fn authenticated(auth_session: AuthSession) -> Self {
        Self {
            auth_session: Some(auth_session),
            ..Self::default()
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> InviteState {
        if self.request_sent {
            InviteState::RequestSubmitted
        } else if self.auth_session.is_some() {
            InviteState::Authenticated
        } else if self.pending_account_awaiting_confirmation {
            InviteState::AccountPending
        } else {
            InviteState::Unauthenticated
        }
    }

    /// Profile metadata of the active session, if any.
    #[must_use]
    pub fn profile(&self) -> Option<&ProfileMetadata> {
        self.auth_session.as_ref().map(|session| &session.user.metadata)
    }
}

/// Successful end of a [`StaffInviteFlow::submit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteOutcome {
    /// Account created; the user must confirm their email and come back.
    AccountPending,
    /// Access request recorded, newly or previously.
    RequestSubmitted,
}

impl InviteOutcome {
    /// Wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccountPending => "account_pending",
            Self::RequestSubmitted => "request_submitted",
        }
    }

    /// Message shown for the outcome.
    #[must_use]
    pub const fn message_key(self) -> MessageKey {
        match self {
            Self::AccountPending => MessageKey::ACCOUNT_PENDING,
            Self::RequestSubmitted => MessageKey::REQUEST_SUBMITTED,
        }
    }
}

/// Drives registration and the access request against the auth backend.
#[derive(Clone)]
pub struct StaffInviteFlow {
    auth: Arc<dyn AuthProvider>,
    access: Arc<dyn StaffAccessRequester>,
}

impl StaffInviteFlow {
    /// Build the flow over the two backend ports.
    pub fn new(auth: Arc<dyn AuthProvider>, access: Arc<dyn StaffAccessRequester>) -> Self {
        Self { auth, access }
    }

    /// Start a visit from an existing access token.
    ///
    /// An unrecognised token yields an unauthenticated visit.
    pub async fn resume(&self, access_token: &str) -> Result<InviteSession, Error> {
        match self.auth.load_session(access_token).await {
            Ok(Some(auth_session)) => Ok(InviteSession::authenticated(auth_session)),
            Ok(None) => {
                info!("access token not recognised; continuing unauthenticated");
                Ok(InviteSession::new())
            }
            Err(err) => {
                warn!(error = %err, "session lookup failed");
                Err(Error::new(err.code()).with_diagnostic(err.to_string()))
            }
        }
    }

    /// Advance the visit as far as the current state allows.
    ///
    /// Only admin-invite payloads are accepted.
    pub async fn submit(
        &self,
        session: &mut InviteSession,
        payload: &QrPayload,
        form: &mut RegistrationForm,
    ) -> Result<InviteOutcome, Error> {
        if payload.kind() != QrKind::AdminInvite {
            return Err(Error::invalid_qr());
        }
        match session.state() {
            InviteState::RequestSubmitted => Ok(InviteOutcome::RequestSubmitted),
            InviteState::Authenticated => {
                if let Some(profile) = session.profile() {
                    form.prefill_from(profile);
                }
                self.request_access(session, payload, form).await
            }
            InviteState::Unauthenticated | InviteState::AccountPending => {
                self.register(session, payload, form).await
            }
        }
    }

    async fn register(
        &self,
        session: &mut InviteSession,
        payload: &QrPayload,
        form: &RegistrationForm,
    ) -> Result<InviteOutcome, Error> {
        let request = form.to_sign_up_request()?;
        let prefix = payload.token().log_prefix();
        match self.auth.sign_up(&request).await {
            Err(err) if is_already_registered(&err) => {
                info!(token = %prefix, "sign-up refused: account exists");
                Err(Error::new(ErrorCode::AlreadyRegistered))
            }
            Err(err) => {
                warn!(token = %prefix, error = %err, "sign-up failed");
                Err(Error::new(err.code()).with_diagnostic(err.to_string()))
            }
            Ok(SignUpOutcome { session: None }) => {
                info!(token = %prefix, "account created; awaiting email confirmation");
                session.pending_account_awaiting_confirmation = true;
                Ok(InviteOutcome::AccountPending)
            }
            Ok(SignUpOutcome {
                session: Some(auth_session),
            }) => {
                session.auth_session = Some(auth_session);
                session.pending_account_awaiting_confirmation = false;
                self.request_access(session, payload, form).await
            }
        }
    }

    async fn request_access(
        &self,
        session: &mut InviteSession,
        payload: &QrPayload,
        form: &RegistrationForm,
    ) -> Result<InviteOutcome, Error> {
        let Some(auth_session) = session.auth_session.as_ref() else {
            return Err(Error::new(ErrorCode::NotAuthenticated));
        };
        let request = StaffAccessRequest {
            token: payload.token().clone(),
            name: form.required_name()?,
            username: form.trimmed_username(),
        };
        let prefix = payload.token().log_prefix();
        let reply = self
            .access
            .request_staff_access(auth_session, &request)
            .await
            .map_err(|err| {
                warn!(token = %prefix, error = %err, "access request failed");
                Error::new(err.code()).with_diagnostic(err.to_string())
            })?;

        match classify_reply(&reply) {
            Ok(()) => {
                info!(token = %prefix, "access request recorded");
                session.request_sent = true;
                Ok(InviteOutcome::RequestSubmitted)
            }
            Err(code) => {
                info!(token = %prefix, %code, "access request refused");
                let mut error = Error::new(code);
                if let Some(raw) = reply.error {
                    error = error.with_diagnostic(raw);
                }
                Err(error)
            }
        }
    }
}

/// `ok`, or the `already_pending` sentinel, is success. A recognised code
/// passes through; anything else is `generic`.
fn classify_reply(reply: &AccessRequestReply) -> Result<(), ErrorCode> {
    if reply.ok {
        return Ok(());
    }
    match reply.error.as_deref().map(str::parse::<ErrorCode>) {
        Some(Ok(ErrorCode::AlreadyPending)) => Ok(()),
        Some(Ok(code)) => Err(code),
        Some(Err(_)) | None => Err(ErrorCode::Generic),
    }
}
