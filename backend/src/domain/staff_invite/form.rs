//! Registration form and its local validation.

use crate::domain::ports::{ProfileMetadata, SignUpRequest};
use crate::domain::{Error, ErrorCode};

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Identity and credential fields as the user typed them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub confirm_email: String,
    pub password: String,
}

impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("confirm_email", &self.confirm_email)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl RegistrationForm {
    /// Trimmed display name, required for every request.
    pub(super) fn required_name(&self) -> Result<String, Error> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::invalid_input("name is required"));
        }
        Ok(name.to_owned())
    }

    /// Trimmed username, `None` when left blank.
    #[must_use]
    pub fn trimmed_username(&self) -> Option<String> {
        let username = self.username.trim();
        (!username.is_empty()).then(|| username.to_owned())
    }

    /// Fill empty identity fields from profile metadata.
    ///
    /// Fields the user already edited are never overwritten.
    pub fn prefill_from(&mut self, metadata: &ProfileMetadata) {
        if self.name.trim().is_empty() {
            if let Some(full_name) = metadata.full_name.as_deref() {
                full_name.clone_into(&mut self.name);
            }
        }
        if self.username.trim().is_empty() {
            if let Some(username) = metadata.username.as_deref() {
                username.clone_into(&mut self.username);
            }
        }
    }

    /// Validate every field before any network call.
    ///
    /// Checks run in a fixed order: name, email, confirmation, password.
    /// Emails compare after trimming and ASCII case folding.
    ///
    /// # Examples
    /// ```
    /// use menu_viewer::domain::{ErrorCode, RegistrationForm};
    ///
    /// let form = RegistrationForm {
    ///     name: "Ana".into(),
    ///     email: "ana@example.com".into(),
    ///     confirm_email: "ana@example.org".into(),
    ///     password: "secret1".into(),
    ///     ..RegistrationForm::default()
    /// };
    /// let err = form.to_sign_up_request().expect_err("emails differ");
    /// assert_eq!(err.code(), ErrorCode::EmailMismatch);
    /// ```
    pub fn to_sign_up_request(&self) -> Result<SignUpRequest, Error> {
        let full_name = self.required_name()?;
        let email = self.email.trim();
        if email.is_empty() {
            return Err(Error::invalid_input("email is required"));
        }
        if !email.eq_ignore_ascii_case(self.confirm_email.trim()) {
            return Err(Error::new(ErrorCode::EmailMismatch));
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(Error::invalid_input(format!(
                "password must have at least {MIN_PASSWORD_CHARS} characters"
            )));
        }
        Ok(SignUpRequest {
            email: email.to_owned(),
            password: self.password.clone(),
            full_name,
            username: self.trimmed_username(),
        })
    }
}
