//! User data model and registration rules.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::ids::UserId;
use super::validation::{FieldError, ValidationErrors, present};

/// Minimum number of characters in a password.
pub const PASSWORD_MIN_CHARS: usize = 8;

/// Field error messages reported by [`UserDraft::validate`].
pub const FULL_NAME_REQUIRED: &str = "Full name is required.";
pub const EMAIL_REQUIRED: &str = "An email address is required.";
pub const EMAIL_INVALID: &str = "Email address must be in a valid format.";
pub const EMAIL_IN_USE: &str = "Email address is already in use.";
pub const PASSWORD_REQUIRED: &str = "Please enter a password.";
pub const CONFIRM_PASSWORD_REQUIRED: &str = "Please enter a confirmation password.";
pub const PASSWORD_TOO_SHORT: &str = "The password must contain at least 8 characters.";
pub const PASSWORDS_MUST_MATCH: &str = "Passwords must match!";

// The pattern is a fixed literal covered by the tests below, so compiling
// it cannot fail at runtime.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = concat!(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))"#,
        r#"@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])"#,
        r#"|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    );
    Regex::new(pattern).expect("email pattern compiles")
});

/// Error returned when an email address is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Email address must be in a valid format.")]
pub struct EmailValidationError;

/// Trimmed, syntactically valid email address.
///
/// Addresses compare exactly; no case folding is applied.
///
/// # Examples
/// ```
/// use backend::domain::EmailAddress;
///
/// let email = EmailAddress::new("  joe@smith.com ").unwrap();
/// assert_eq!(email.as_ref(), "joe@smith.com");
/// assert!(EmailAddress::new("joe@").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim and check `raw`.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = raw.as_ref().trim();
        if EMAIL_RE.is_match(trimmed) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(EmailValidationError)
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered user.
///
/// `password_hash` holds a PHC-format string; the plain password is never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email_address: EmailAddress,
    pub password_hash: String,
}

impl User {
    /// Public projection used when users are embedded in other resources.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            full_name: self.full_name.clone(),
        }
    }
}

/// Identity fields safe to expose to any client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub full_name: String,
}

/// Raw registration input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub full_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Registration input that passed every field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub email_address: EmailAddress,
    pub password: Zeroizing<String>,
}

impl UserDraft {
    /// Check every field, collecting all failures.
    ///
    /// Passwords are not trimmed; an all-whitespace password is still a
    /// password. Uniqueness of the email address is checked by the store.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::UserDraft;
    ///
    /// let draft = UserDraft {
    ///     full_name: Some("Joe Smith".into()),
    ///     email_address: Some("joe@smith.com".into()),
    ///     password: Some("password".into()),
    ///     confirm_password: Some("password".into()),
    /// };
    /// let user = draft.validate().unwrap();
    /// assert_eq!(user.full_name, "Joe Smith");
    /// ```
    pub fn validate(self) -> Result<NewUser, Vec<FieldError>> {
        let mut errors = ValidationErrors::default();

        let full_name = present(self.full_name.as_deref()).map(str::to_owned);
        if full_name.is_none() {
            errors.push("fullName", FULL_NAME_REQUIRED);
        }

        let email_address = match present(self.email_address.as_deref()) {
            None => {
                errors.push("emailAddress", EMAIL_REQUIRED);
                None
            }
            Some(raw) => match EmailAddress::new(raw) {
                Ok(email) => Some(email),
                Err(_) => {
                    errors.push("emailAddress", EMAIL_INVALID);
                    None
                }
            },
        };

        let password = self.password.filter(|p| !p.is_empty()).map(Zeroizing::new);
        let confirm = self
            .confirm_password
            .filter(|p| !p.is_empty())
            .map(Zeroizing::new);

        match &password {
            None => errors.push("password", PASSWORD_REQUIRED),
            Some(p) if p.chars().count() < PASSWORD_MIN_CHARS => {
                errors.push("password", PASSWORD_TOO_SHORT);
            }
            Some(_) => {}
        }
        match &confirm {
            None => errors.push("confirmPassword", CONFIRM_PASSWORD_REQUIRED),
            Some(p) if p.chars().count() < PASSWORD_MIN_CHARS => {
                errors.push("confirmPassword", PASSWORD_TOO_SHORT);
            }
            Some(_) => {}
        }
        if let (Some(p), Some(c)) = (&password, &confirm) {
            if p.as_str() != c.as_str() {
                errors.push("password", PASSWORDS_MUST_MATCH);
            }
        }

        match (full_name, email_address, password) {
            (Some(full_name), Some(email_address), Some(password)) if errors.is_empty() => {
                Ok(NewUser {
                    full_name,
                    email_address,
                    password,
                })
            }
            _ => Err(errors.into_vec()),
        }
    }
}
