//! Recognition of backend conditions that have no structured code.
//!
//! The auth backend reports an existing account only through its message
//! text, so detection is a wording heuristic. Keep every variant here; call
//! sites only see [`is_already_registered`].

use crate::domain::ports::AuthProviderError;

const ALREADY_REGISTERED_SIGNALS: &[&str] = &[
    "already registered",
    "already been registered",
    "already exists",
    "user_already_exists",
    "email_exists",
];

/// Whether a sign-up failure means the account already exists.
#[must_use]
pub fn is_already_registered(error: &AuthProviderError) -> bool {
    let AuthProviderError::Rejected { message, .. } = error else {
        return false;
    };
    let message = message.to_lowercase();
    ALREADY_REGISTERED_SIGNALS
        .iter()
        .any(|signal| message.contains(signal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("User already registered")]
    #[case("A user with this email address has already been registered")]
    #[case("{\"code\":\"user_already_exists\",\"msg\":\"...\"}")]
    #[case("error_code: email_exists")]
    #[case("Account ALREADY EXISTS")]
    fn matches_known_wordings(#[case] message: &str) {
        assert!(is_already_registered(&AuthProviderError::rejected(
            422_u16, message
        )));
    }

    #[rstest]
    #[case(AuthProviderError::rejected(422_u16, "Password should be at least 6 characters"))]
    #[case(AuthProviderError::rejected(429_u16, "email rate limit exceeded"))]
    #[case(AuthProviderError::transport("user already registered"))]
    fn ignores_other_failures(#[case] error: AuthProviderError) {
        assert!(!is_already_registered(&error));
    }
}
