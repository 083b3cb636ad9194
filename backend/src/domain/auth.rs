//! Sign-in credentials.
//!
//! Both the login payload and HTTP Basic headers are reduced to
//! [`LoginCredentials`] before the login service sees them, so the service
//! works with an already-parsed [`EmailAddress`].

use zeroize::Zeroizing;

use super::user::EmailAddress;

/// Message returned for every failed sign-in, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Reasons raw sign-in input cannot form credentials.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("email address must not be empty")]
    EmptyEmailAddress,
    #[error("email address is malformed")]
    MalformedEmailAddress,
    #[error("password must not be empty")]
    EmptyPassword,
}

impl LoginValidationError {
    /// Whether the input had the right shape but cannot match any account.
    ///
    /// Such input is answered like a wrong password rather than a bad
    /// request.
    pub fn is_unmatchable(&self) -> bool {
        matches!(self, Self::MalformedEmailAddress)
    }
}

/// Email address and password presented at sign-in.
///
/// The password keeps any caller whitespace and is wiped on drop.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" joe@smith.com", "password").unwrap();
/// assert_eq!(creds.email_address().as_ref(), "joe@smith.com");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email_address: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Parse raw email and password input.
    pub fn try_from_parts(
        email_address: &str,
        password: &str,
    ) -> Result<Self, LoginValidationError> {
        if email_address.trim().is_empty() {
            return Err(LoginValidationError::EmptyEmailAddress);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        let email_address = EmailAddress::new(email_address)
            .map_err(|_| LoginValidationError::MalformedEmailAddress)?;

        Ok(Self {
            email_address,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Parsed address used for the account lookup.
    pub fn email_address(&self) -> &EmailAddress {
        &self.email_address
    }

    /// Password exactly as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmailAddress)]
    #[case("   ", "pw", LoginValidationError::EmptyEmailAddress)]
    #[case("joe@smith.com", "", LoginValidationError::EmptyPassword)]
    #[case("not an email", "pw", LoginValidationError::MalformedEmailAddress)]
    #[case("joe@", "pw", LoginValidationError::MalformedEmailAddress)]
    fn rejects_unusable_input(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password).expect_err("invalid input");
        assert_eq!(err, expected);
        assert_eq!(err.is_unmatchable(), expected == LoginValidationError::MalformedEmailAddress);
    }

    #[rstest]
    #[case("  joe@smith.com  ", "password")]
    #[case("sam@smith.com", " spaced password ")]
    fn parses_email_and_keeps_password(#[case] email: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(email, password).expect("valid input");
        assert_eq!(creds.email_address(), &EmailAddress::new(email).expect("email"));
        assert_eq!(creds.password(), password);
    }
}
