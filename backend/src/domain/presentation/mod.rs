//! Error presentation: taxonomy code to user-facing text.
//!
//! Lookup is a pure table walk: code to message key, key to localized text
//! through an injected [`MessageCatalog`]. Codes without a dedicated entry in
//! a scope fall back to that scope's generic key. Raw backend text is only
//! appended in [`DiagnosticsMode::Development`].

mod catalog;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

pub use catalog::BuiltinCatalog;

/// Text used when a catalogue lacks even the generic entry.
const LAST_RESORT_MESSAGE: &str = "Something went wrong.";

/// Supported display languages.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Spanish, the default.
    #[default]
    Es,
    /// English.
    En,
}

impl Locale {
    /// Language tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }

    /// Match a BCP 47 tag by its primary subtag, so `en-GB` selects English.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("es") {
            Some(Self::Es)
        } else if primary.eq_ignore_ascii_case("en") {
            Some(Self::En)
        } else {
            None
        }
    }

    /// First supported language in an `Accept-Language` header value.
    ///
    /// # Examples
    /// ```
    /// use menu_viewer::domain::Locale;
    ///
    /// assert_eq!(Locale::negotiate("fr-FR, en-US;q=0.8, es;q=0.5"), Some(Locale::En));
    /// assert_eq!(Locale::negotiate("de"), None);
    /// ```
    #[must_use]
    pub fn negotiate(accept_language: &str) -> Option<Self> {
        accept_language
            .split(',')
            .filter_map(|entry| entry.split(';').next())
            .find_map(Self::from_tag)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a locale tag is not supported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale: {0}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownLocale(s.to_owned()))
    }
}

/// Which message table a code is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageScope {
    /// Guest menu resolution.
    Menu,
    /// Staff onboarding.
    StaffInvite,
}

/// Key into a [`MessageCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageKey(&'static str);

impl MessageKey {
    /// Shown after sign-up when the account still awaits email confirmation.
    pub const ACCOUNT_PENDING: Self = Self("invite.account_pending");
    /// Shown once the access request is recorded.
    pub const REQUEST_SUBMITTED: Self = Self("invite.request_submitted");

    /// Key text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }

    /// Generic fallback key of a scope.
    #[must_use]
    pub const fn generic(scope: MessageScope) -> Self {
        match scope {
            MessageScope::Menu => Self("menu.errors.generic"),
            MessageScope::StaffInvite => Self("invite.errors.generic"),
        }
    }

    /// Dedicated key for `code` in `scope`, or the scope's generic key.
    ///
    /// # Examples
    /// ```
    /// use menu_viewer::domain::{ErrorCode, MessageKey, MessageScope};
    ///
    /// let key = MessageKey::for_code(MessageScope::Menu, ErrorCode::Timeout);
    /// assert_eq!(key.as_str(), "menu.errors.timeout");
    ///
    /// let key = MessageKey::for_code(MessageScope::Menu, ErrorCode::TooManyPending);
    /// assert_eq!(key, MessageKey::generic(MessageScope::Menu));
    /// ```
    #[must_use]
    pub const fn for_code(scope: MessageScope, code: ErrorCode) -> Self {
        match scope {
            MessageScope::Menu => menu_key(code),
            MessageScope::StaffInvite => invite_key(code),
        }
    }
}

const fn menu_key(code: ErrorCode) -> MessageKey {
    match code {
        ErrorCode::InvalidToken => MessageKey("menu.errors.invalid_token"),
        ErrorCode::NotGuest => MessageKey("menu.errors.not_guest"),
        ErrorCode::TokenExpired => MessageKey("menu.errors.token_expired"),
        ErrorCode::NotFound => MessageKey("menu.errors.not_found"),
        ErrorCode::RateLimited => MessageKey("menu.errors.rate_limited"),
        ErrorCode::ServerError => MessageKey("menu.errors.server_error"),
        ErrorCode::NetworkError => MessageKey("menu.errors.network_error"),
        ErrorCode::Timeout => MessageKey("menu.errors.timeout"),
        ErrorCode::InvalidQr => MessageKey("menu.errors.invalid_qr"),
        _ => MessageKey::generic(MessageScope::Menu),
    }
}

const fn invite_key(code: ErrorCode) -> MessageKey {
    match code {
        ErrorCode::InvalidQr => MessageKey("invite.errors.invalid_qr"),
        ErrorCode::InvalidToken => MessageKey("invite.errors.invalid_token"),
        ErrorCode::TokenExpired => MessageKey("invite.errors.token_expired"),
        ErrorCode::TokenUsed => MessageKey("invite.errors.token_used"),
        ErrorCode::TokenMaxUsesReached => MessageKey("invite.errors.token_max_uses_reached"),
        ErrorCode::BranchNotFound => MessageKey("invite.errors.branch_not_found"),
        ErrorCode::NotAuthenticated => MessageKey("invite.errors.not_authenticated"),
        ErrorCode::AlreadyRegistered => MessageKey("invite.errors.already_registered"),
        ErrorCode::EmailMismatch => MessageKey("invite.errors.email_mismatch"),
        ErrorCode::TooManyPending => MessageKey("invite.errors.too_many_pending"),
        _ => MessageKey::generic(MessageScope::StaffInvite),
    }
}

/// Locale-scoped key to text lookup.
pub trait MessageCatalog: Send + Sync {
    /// Text for `key` in `locale`, if the catalogue has it.
    fn lookup(&self, locale: Locale, key: MessageKey) -> Option<&str>;
}

/// Resolve the user-facing text for `code`.
///
/// Never returns a raw code or backend message.
#[must_use]
pub fn present(
    scope: MessageScope,
    code: ErrorCode,
    locale: Locale,
    catalog: &dyn MessageCatalog,
) -> String {
    catalog
        .lookup(locale, MessageKey::for_code(scope, code))
        .or_else(|| catalog.lookup(locale, MessageKey::generic(scope)))
        .unwrap_or(LAST_RESORT_MESSAGE)
        .to_owned()
}

/// Whether raw diagnostic detail may reach users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiagnosticsMode {
    /// Only catalogue text is shown.
    #[default]
    Production,
    /// Catalogue text plus raw diagnostic detail.
    Development,
}

impl DiagnosticsMode {
    /// Map a boolean switch to a mode.
    #[must_use]
    pub const fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Self::Development
        } else {
            Self::Production
        }
    }
}

/// Catalogue plus diagnostics policy, shared by the inbound adapters.
#[derive(Clone)]
pub struct Presenter {
    catalog: Arc<dyn MessageCatalog>,
    diagnostics: DiagnosticsMode,
}

impl Presenter {
    /// Build a presenter over `catalog`.
    pub fn new(catalog: Arc<dyn MessageCatalog>, diagnostics: DiagnosticsMode) -> Self {
        Self {
            catalog,
            diagnostics,
        }
    }

    /// Active diagnostics policy.
    #[must_use]
    pub fn diagnostics(&self) -> DiagnosticsMode {
        self.diagnostics
    }

    /// Localized text for an error, with diagnostics appended in development.
    #[must_use]
    pub fn error_message(&self, scope: MessageScope, error: &Error, locale: Locale) -> String {
        let message = present(scope, error.code(), locale, self.catalog.as_ref());
        match (self.diagnostics, error.diagnostic()) {
            (DiagnosticsMode::Development, Some(diagnostic)) => {
                format!("{message} ({diagnostic})")
            }
            _ => message,
        }
    }

    /// Localized text for a non-error key.
    #[must_use]
    pub fn message(&self, key: MessageKey, locale: Locale) -> String {
        self.catalog
            .lookup(locale, key)
            .unwrap_or(LAST_RESORT_MESSAGE)
            .to_owned()
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(Arc::new(BuiltinCatalog), DiagnosticsMode::Production)
    }
}

impl fmt::Debug for Presenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presenter")
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct EmptyCatalog;

    impl MessageCatalog for EmptyCatalog {
        fn lookup(&self, _locale: Locale, _key: MessageKey) -> Option<&str> {
            None
        }
    }

    struct GenericOnly;

    impl MessageCatalog for GenericOnly {
        fn lookup(&self, _locale: Locale, key: MessageKey) -> Option<&str> {
            (key == MessageKey::generic(MessageScope::Menu)).then_some("generic text")
        }
    }

    #[rstest]
    #[case(ErrorCode::TokenExpired, Locale::Es, "Este enlace ha caducado.")]
    #[case(ErrorCode::TokenExpired, Locale::En, "This link has expired.")]
    #[case(ErrorCode::InvalidQr, Locale::Es, "QR no es para comensales o es inválido.")]
    #[case(ErrorCode::AlreadyPending, Locale::En, "Something went wrong. Try again.")]
    fn menu_scope_uses_builtin_tables(
        #[case] code: ErrorCode,
        #[case] locale: Locale,
        #[case] expected: &str,
    ) {
        assert_eq!(present(MessageScope::Menu, code, locale, &BuiltinCatalog), expected);
    }

    #[rstest]
    fn every_code_resolves_to_catalogue_text_in_every_scope() {
        for scope in [MessageScope::Menu, MessageScope::StaffInvite] {
            for locale in [Locale::Es, Locale::En] {
                for code in ErrorCode::ALL {
                    let text = present(scope, code, locale, &BuiltinCatalog);
                    assert_ne!(text, LAST_RESORT_MESSAGE);
                    assert_ne!(text, code.as_str(), "raw code leaked for {code}");
                }
            }
        }
    }

    #[rstest]
    fn falls_back_to_generic_then_last_resort() {
        assert_eq!(
            present(MessageScope::Menu, ErrorCode::Timeout, Locale::Es, &GenericOnly),
            "generic text"
        );
        assert_eq!(
            present(MessageScope::Menu, ErrorCode::Timeout, Locale::Es, &EmptyCatalog),
            LAST_RESORT_MESSAGE
        );
    }

    #[rstest]
    #[case(DiagnosticsMode::Production, "Sucursal no encontrada.")]
    #[case(DiagnosticsMode::Development, "Sucursal no encontrada. (rpc said branch_not_found)")]
    fn diagnostics_only_appear_in_development(
        #[case] mode: DiagnosticsMode,
        #[case] expected: &str,
    ) {
        let presenter = Presenter::new(Arc::new(BuiltinCatalog), mode);
        let error = Error::new(ErrorCode::BranchNotFound).with_diagnostic("rpc said branch_not_found");
        assert_eq!(
            presenter.error_message(MessageScope::StaffInvite, &error, Locale::Es),
            expected
        );
    }

    #[rstest]
    #[case("es", Some(Locale::Es))]
    #[case("EN-gb", Some(Locale::En))]
    #[case("es_MX", Some(Locale::Es))]
    #[case("pt-BR", None)]
    #[case("", None)]
    fn parses_language_tags(#[case] tag: &str, #[case] expected: Option<Locale>) {
        assert_eq!(Locale::from_tag(tag), expected);
    }

    #[rstest]
    fn negotiation_honours_header_order() {
        assert_eq!(Locale::negotiate("es-MX,en;q=0.9"), Some(Locale::Es));
        assert_eq!(Locale::negotiate(" de ; q=1 , en "), Some(Locale::En));
        assert_eq!(Locale::negotiate(""), None);
    }

    #[rstest]
    fn outcome_messages_are_localized() {
        let presenter = Presenter::default();
        assert_eq!(
            presenter.message(MessageKey::REQUEST_SUBMITTED, Locale::En),
            "Your account was created. Once the owner or manager approves your request, sign in from the app."
        );
    }
}
