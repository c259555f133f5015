//! QR payload codec.
//!
//! A QR code carries a single query value: `encodeURIComponent` applied to a
//! JSON object `{ type, token, branchId?, branchName? }`. The value is
//! attacker-controlled, so decoding is a strict parse-then-validate step. Every
//! structural violation yields the same [`InvalidQr`] rejection; the reason is
//! only ever written to debug logs.

use std::fmt;

use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::domain::{Error, ErrorCode};

const GUEST_TAG: &str = "guest";
const ADMIN_TAG: &str = "admin";
const ADMIN_INVITE_TAG: &str = "admin_invite";
const LOG_PREFIX_CHARS: usize = 6;

/// Discriminates what a QR code unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QrKind {
    /// Read-only menu for one branch.
    Guest,
    /// Staff onboarding for one branch.
    AdminInvite,
}

impl QrKind {
    /// Classify a payload `type` tag. Unknown tags are not a third variant.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            GUEST_TAG => Some(Self::Guest),
            ADMIN_TAG | ADMIN_INVITE_TAG => Some(Self::AdminInvite),
            _ => None,
        }
    }

    /// Canonical tag written when encoding.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Guest => GUEST_TAG,
            Self::AdminInvite => ADMIN_INVITE_TAG,
        }
    }
}

/// Validation errors for [`QrToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QrTokenValidationError {
    /// Token is empty once surrounding whitespace is removed.
    #[error("token must not be blank")]
    Blank,
}

/// Opaque token string, trimmed and non-empty.
///
/// # Examples
/// ```
/// use menu_viewer::domain::QrToken;
///
/// let token = QrToken::new("  abc123 ").expect("valid token");
/// assert_eq!(token.as_str(), "abc123");
/// assert!(QrToken::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QrToken(String);

impl QrToken {
    /// Trim and validate a raw token.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, QrTokenValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(QrTokenValidationError::Blank);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Log-safe rendering of the token.
    #[must_use]
    pub fn log_prefix(&self) -> String {
        token_prefix(self.as_str())
    }
}

impl AsRef<str> for QrToken {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Log-safe rendering of a token: the first six characters and an ellipsis.
///
/// # Examples
/// ```
/// use menu_viewer::domain::token_prefix;
///
/// assert_eq!(token_prefix("abcdef123"), "abcdef…");
/// assert_eq!(token_prefix("abc"), "[short]");
/// assert_eq!(token_prefix(""), "[empty]");
/// ```
#[must_use]
pub fn token_prefix(token: &str) -> String {
    if token.is_empty() {
        return "[empty]".to_owned();
    }
    if token.chars().count() < LOG_PREFIX_CHARS {
        return "[short]".to_owned();
    }
    let prefix: String = token.chars().take(LOG_PREFIX_CHARS).collect();
    format!("{prefix}…")
}

/// The single rejection produced by [`decode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("invalid QR payload")]
pub struct InvalidQr;

impl InvalidQr {
    /// Taxonomy code for the rejection.
    #[must_use]
    pub const fn code(self) -> ErrorCode {
        ErrorCode::InvalidQr
    }
}

impl From<InvalidQr> for Error {
    fn from(value: InvalidQr) -> Self {
        Self::new(value.code())
    }
}

/// Decoded QR payload.
///
/// ## Invariants
/// - `token` is trimmed and non-empty.
/// - `raw_encoded` is the still percent-encoded value the payload came from,
///   reused verbatim when handing off to the native app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    kind: QrKind,
    token: QrToken,
    branch_id: Option<String>,
    branch_name: Option<String>,
    raw_encoded: String,
}

impl QrPayload {
    /// Build a guest payload for a bare token, encoding it as a QR would.
    #[must_use]
    pub fn guest(token: QrToken) -> Self {
        let raw_encoded = encode(QrKind::Guest, &token, None, None);
        Self {
            kind: QrKind::Guest,
            token,
            branch_id: None,
            branch_name: None,
            raw_encoded,
        }
    }

    /// What the payload unlocks.
    #[must_use]
    pub fn kind(&self) -> QrKind {
        self.kind
    }

    /// Token to resolve against the backend.
    #[must_use]
    pub fn token(&self) -> &QrToken {
        &self.token
    }

    /// Branch identifier hint carried by the QR, if any.
    #[must_use]
    pub fn branch_id(&self) -> Option<&str> {
        self.branch_id.as_deref()
    }

    /// Branch display name hint carried by the QR, if any.
    #[must_use]
    pub fn branch_name(&self) -> Option<&str> {
        self.branch_name.as_deref()
    }

    /// Percent-encoded form of the payload.
    #[must_use]
    pub fn raw_encoded(&self) -> &str {
        self.raw_encoded.as_str()
    }
}

impl fmt::Display for QrPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.tag(), self.token.log_prefix())
    }
}

/// Decode and validate a raw query value.
///
/// # Examples
/// ```
/// use menu_viewer::domain::{QrKind, decode_qr_payload};
///
/// let raw = "%7B%22type%22%3A%22guest%22%2C%22token%22%3A%22abc123%22%7D";
/// let payload = decode_qr_payload(Some(raw)).expect("valid payload");
/// assert_eq!(payload.kind(), QrKind::Guest);
/// assert_eq!(payload.token().as_str(), "abc123");
///
/// assert!(decode_qr_payload(None).is_err());
/// assert!(decode_qr_payload(Some("not-json")).is_err());
/// ```
pub fn decode(raw: Option<&str>) -> Result<QrPayload, InvalidQr> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(reject("missing payload")),
    };
    if has_malformed_escape(raw) {
        return Err(reject("malformed percent escape"));
    }
    let decoded = urlencoding::decode(raw).map_err(|_| reject("percent-decoding failed"))?;
    let value: Value =
        serde_json::from_str(&decoded).map_err(|_| reject("payload is not valid JSON"))?;
    let Value::Object(fields) = value else {
        return Err(reject("payload is not a JSON object"));
    };

    let tag = fields
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| reject("type is missing or not a string"))?;
    let token = fields
        .get("token")
        .and_then(Value::as_str)
        .ok_or_else(|| reject("token is missing or not a string"))?;
    let token = QrToken::new(token).map_err(|_| reject("token is blank"))?;
    let kind = QrKind::from_tag(tag).ok_or_else(|| reject("unknown payload type"))?;

    let optional_string = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_owned);

    Ok(QrPayload {
        kind,
        token,
        branch_id: optional_string("branchId"),
        branch_name: optional_string("branchName"),
        raw_encoded: raw.to_owned(),
    })
}

/// Encode a payload the way QR codes are generated.
#[must_use]
pub fn encode(
    kind: QrKind,
    token: &QrToken,
    branch_id: Option<&str>,
    branch_name: Option<&str>,
) -> String {
    let mut object = json!({
        "type": kind.tag(),
        "token": token.as_str(),
    });
    if let Value::Object(fields) = &mut object {
        if let Some(branch_id) = branch_id {
            fields.insert("branchId".to_owned(), Value::from(branch_id));
        }
        if let Some(branch_name) = branch_name {
            fields.insert("branchName".to_owned(), Value::from(branch_name));
        }
    }
    urlencoding::encode(&object.to_string()).into_owned()
}

/// `urlencoding` passes stray `%` through untouched; every escape must be
/// `%` followed by two hex digits.
fn has_malformed_escape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.iter().enumerate().any(|(index, byte)| {
        *byte == b'%'
            && !matches!(
                bytes.get(index + 1..index + 3),
                Some([high, low]) if high.is_ascii_hexdigit() && low.is_ascii_hexdigit()
            )
    })
}

fn reject(reason: &'static str) -> InvalidQr {
    debug!(reason, "rejected QR payload");
    InvalidQr
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn encoded(json: &str) -> String {
        urlencoding::encode(json).into_owned()
    }

    #[rstest]
    #[case(r#"{"type":"guest","token":"abc123"}"#, QrKind::Guest)]
    #[case(r#"{"type":"admin","token":"abc123"}"#, QrKind::AdminInvite)]
    #[case(r#"{"type":"admin_invite","token":"abc123"}"#, QrKind::AdminInvite)]
    fn classifies_known_tags(#[case] json: &str, #[case] expected: QrKind) {
        let payload = decode(Some(&encoded(json))).expect("payload decodes");
        assert_eq!(payload.kind(), expected);
        assert_eq!(payload.token().as_str(), "abc123");
    }

    #[rstest]
    #[case::absent(None)]
    #[case::empty(Some(""))]
    #[case::not_json(Some("hello"))]
    #[case::truncated_json(Some("%7B%22type%22"))]
    #[case::json_array(Some("%5B1%2C2%5D"))]
    #[case::json_string(Some("%22guest%22"))]
    #[case::invalid_utf8(Some("%FF%FE"))]
    #[case::malformed_escape(Some(
        "%7B%22type%22%3A%22guest%22%2C%22token%22%3A%22a%ZZ%22%7D"
    ))]
    #[case::truncated_escape(Some("%7B%22type%22%3A%22guest%22%2C%22token%22%3A%22a%22%7D%4"))]
    #[case::bare_percent(Some("%7B%22type%22%3A%22guest%22%2C%22token%22%3A%22100%%22%7D"))]
    fn rejects_unparseable_input(#[case] raw: Option<&str>) {
        assert_eq!(decode(raw), Err(InvalidQr));
    }

    #[rstest]
    #[case::missing_token(r#"{"type":"guest"}"#)]
    #[case::missing_type(r#"{"token":"abc"}"#)]
    #[case::numeric_token(r#"{"type":"guest","token":42}"#)]
    #[case::null_type(r#"{"type":null,"token":"abc"}"#)]
    #[case::blank_token(r#"{"type":"guest","token":"   "}"#)]
    #[case::unknown_tag(r#"{"type":"owner","token":"abc"}"#)]
    #[case::case_sensitive_tag(r#"{"type":"Guest","token":"abc"}"#)]
    fn rejects_structural_violations(#[case] json: &str) {
        let error = decode(Some(&encoded(json))).expect_err("payload must be rejected");
        assert_eq!(error.code(), ErrorCode::InvalidQr);
    }

    #[rstest]
    fn trims_token_and_keeps_raw_value() {
        let raw = encoded(r#"{"type":"guest","token":"  abc123  "}"#);
        let payload = decode(Some(&raw)).expect("payload decodes");
        assert_eq!(payload.token().as_str(), "abc123");
        assert_eq!(payload.raw_encoded(), raw);
    }

    #[rstest]
    fn passes_through_string_branch_hints_only() {
        let raw = encoded(
            r#"{"type":"admin","token":"t0k3n","branchId":"b-1","branchName":"Centro"}"#,
        );
        let payload = decode(Some(&raw)).expect("payload decodes");
        assert_eq!(payload.branch_id(), Some("b-1"));
        assert_eq!(payload.branch_name(), Some("Centro"));

        let raw = encoded(r#"{"type":"admin","token":"t0k3n","branchId":7,"branchName":null}"#);
        let payload = decode(Some(&raw)).expect("non-string hints are dropped, not fatal");
        assert_eq!(payload.branch_id(), None);
        assert_eq!(payload.branch_name(), None);
    }

    #[rstest]
    fn encode_then_decode_preserves_structure() {
        let token = QrToken::new("abc123").expect("valid token");
        let raw = encode(QrKind::AdminInvite, &token, Some("b-9"), Some("Bodega Sur & Co"));
        let payload = decode(Some(&raw)).expect("encoded payload decodes");

        assert_eq!(payload.kind(), QrKind::AdminInvite);
        assert_eq!(payload.token(), &token);
        assert_eq!(payload.branch_id(), Some("b-9"));
        assert_eq!(payload.branch_name(), Some("Bodega Sur & Co"));
        assert_eq!(payload.raw_encoded(), raw);
    }

    #[rstest]
    fn guest_constructor_matches_decoded_form() {
        let token = QrToken::new("abc123").expect("valid token");
        let built = QrPayload::guest(token);
        let decoded = decode(Some(built.raw_encoded())).expect("guest payload decodes");
        assert_eq!(decoded, built);
    }

    #[rstest]
    #[case("abcdefgh", "abcdef…")]
    #[case("abcdef", "abcdef…")]
    #[case("abcde", "[short]")]
    #[case("", "[empty]")]
    #[case("ñandú-token", "ñandú-…")]
    fn token_prefix_never_reveals_whole_token(#[case] token: &str, #[case] expected: &str) {
        assert_eq!(token_prefix(token), expected);
    }
}
