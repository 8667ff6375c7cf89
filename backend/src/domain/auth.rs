//! Login credentials submitted to the accounts screen.

use std::fmt;

use zeroize::Zeroizing;

/// Login payload value that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl LoginValidationError {
    /// Form field the error belongs to.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use kitchen::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" chef ", "s3cret-pass").unwrap();
/// assert_eq!(creds.username(), "chef");
/// assert_eq!(creds.password(), "s3cret-pass");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the cook lookup.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password as typed by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("chef", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn valid_credentials_trim_username_only() {
        let creds = LoginCredentials::try_from_parts("  admin  ", " spaced pw ")
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), "admin");
        assert_eq!(creds.password(), " spaced pw ");
    }
}
