//! Cook accounts: staff users who log in and are credited on dishes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::{CookId, DishSummary, FieldIssueSource};

/// Maximum length of a username and of each personal name.
pub const COOK_NAME_MAX: usize = 150;
/// Minimum accepted password length.
pub const PASSWORD_MIN_LENGTH: usize = 8;

const USERNAME_SYMBOLS: &str = "@.+-_";

/// Validation errors for [`Username`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsernameValidationError {
    Blank,
    TooLong { max: usize },
    InvalidCharacters,
}

impl fmt::Display for UsernameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "This field is required."),
            Self::TooLong { max } => write!(f, "Ensure this value has at most {max} characters."),
            Self::InvalidCharacters => write!(
                f,
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
            ),
        }
    }
}

impl std::error::Error for UsernameValidationError {}

impl FieldIssueSource for UsernameValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::Blank => "required",
            Self::TooLong { .. } => "max_length",
            Self::InvalidCharacters => "invalid",
        }
    }
}

/// Unique login name of a cook.
///
/// Letters, digits and `@ . + - _`, at most 150 characters.
///
/// # Examples
/// ```
/// use kitchen::domain::{Username, UsernameValidationError};
///
/// assert_eq!(Username::new("chef.ann+1").unwrap().as_ref(), "chef.ann+1");
/// assert_eq!(Username::new("two words"), Err(UsernameValidationError::InvalidCharacters));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a username.
    pub fn new(raw: impl Into<String>) -> Result<Self, UsernameValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UsernameValidationError::Blank);
        }
        if trimmed.chars().count() > COOK_NAME_MAX {
            return Err(UsernameValidationError::TooLong { max: COOK_NAME_MAX });
        }
        if !trimmed
            .chars()
            .all(|c| c.is_alphanumeric() || USERNAME_SYMBOLS.contains(c))
        {
            return Err(UsernameValidationError::InvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Personal name exceeded its length limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonNameTooLong {
    pub max: usize,
}

impl fmt::Display for PersonNameTooLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ensure this value has at most {} characters.", self.max)
    }
}

impl std::error::Error for PersonNameTooLong {}

impl FieldIssueSource for PersonNameTooLong {
    fn code(&self) -> &'static str {
        "max_length"
    }
}

/// First or last name of a cook; may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a personal name.
    pub fn new(raw: impl Into<String>) -> Result<Self, PersonNameTooLong> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.chars().count() > COOK_NAME_MAX {
            return Err(PersonNameTooLong { max: COOK_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = PersonNameTooLong;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validation errors for [`YearsOfExperience`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceValidationError {
    Negative,
    TooLarge { max: i32 },
}

impl fmt::Display for ExperienceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative => write!(f, "Ensure this value is greater than or equal to 0."),
            Self::TooLarge { max } => {
                write!(f, "Ensure this value is less than or equal to {max}.")
            }
        }
    }
}

impl std::error::Error for ExperienceValidationError {}

impl FieldIssueSource for ExperienceValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::Negative => "min_value",
            Self::TooLarge { .. } => "max_value",
        }
    }
}

/// Whole years a cook has worked; non-negative and defaults to zero.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i32")]
pub struct YearsOfExperience(i32);

impl YearsOfExperience {
    /// Validate and construct a value.
    pub fn new(raw: i64) -> Result<Self, ExperienceValidationError> {
        if raw < 0 {
            return Err(ExperienceValidationError::Negative);
        }
        i32::try_from(raw)
            .map(Self)
            .map_err(|_| ExperienceValidationError::TooLarge { max: i32::MAX })
    }

    /// Numeric value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<YearsOfExperience> for i32 {
    fn from(value: YearsOfExperience) -> Self {
        value.0
    }
}

impl TryFrom<i64> for YearsOfExperience {
    type Error = ExperienceValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validation errors for a new password and its confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordValidationError {
    Required,
    Mismatch,
    TooShort { min: usize },
    EntirelyNumeric,
}

impl PasswordValidationError {
    /// Form field the error belongs to.
    pub fn field(self) -> &'static str {
        match self {
            Self::Required => "password1",
            Self::Mismatch | Self::TooShort { .. } | Self::EntirelyNumeric => "password2",
        }
    }
}

impl fmt::Display for PasswordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "This field is required."),
            Self::Mismatch => write!(f, "The two password fields didn't match."),
            Self::TooShort { min } => write!(
                f,
                "This password is too short. It must contain at least {min} characters."
            ),
            Self::EntirelyNumeric => write!(f, "This password is entirely numeric."),
        }
    }
}

impl std::error::Error for PasswordValidationError {}

impl FieldIssueSource for PasswordValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Mismatch => "password_mismatch",
            Self::TooShort { .. } => "password_too_short",
            Self::EntirelyNumeric => "password_entirely_numeric",
        }
    }
}

/// Confirmed plaintext password awaiting hashing.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(Zeroizing<String>);

impl NewPassword {
    /// Check that both entries match and satisfy the password rules.
    ///
    /// # Examples
    /// ```
    /// use kitchen::domain::{NewPassword, PasswordValidationError};
    ///
    /// assert!(NewPassword::confirm("tomato-soup", "tomato-soup").is_ok());
    /// assert_eq!(
    ///     NewPassword::confirm("tomato-soup", "tomato-stew").err(),
    ///     Some(PasswordValidationError::Mismatch)
    /// );
    /// ```
    pub fn confirm(password1: &str, password2: &str) -> Result<Self, PasswordValidationError> {
        if password1.is_empty() {
            return Err(PasswordValidationError::Required);
        }
        if password1 != password2 {
            return Err(PasswordValidationError::Mismatch);
        }
        if password1.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(PasswordValidationError::TooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        if password1.chars().all(|c| c.is_ascii_digit()) {
            return Err(PasswordValidationError::EntirelyNumeric);
        }
        Ok(Self(Zeroizing::new(password1.to_owned())))
    }

    /// Plaintext to hand to the password hasher.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(<redacted>)")
    }
}

/// Persisted cook account without its credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cook {
    pub id: CookId,
    pub username: Username,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub years_of_experience: YearsOfExperience,
    pub date_joined: DateTime<Utc>,
}

/// `"{username}: ({first_name} {last_name})"`.
impl fmt::Display for Cook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: ({} {})",
            self.username, self.first_name, self.last_name
        )
    }
}

/// Stored login secret for one cook.
#[derive(Clone, PartialEq, Eq)]
pub struct CookCredentials {
    pub id: CookId,
    /// PHC-formatted password hash.
    pub password_hash: String,
}

impl fmt::Debug for CookCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookCredentials")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Validated cook account ready for insertion.
#[derive(Clone, PartialEq, Eq)]
pub struct NewCook {
    pub username: Username,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub years_of_experience: YearsOfExperience,
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

impl fmt::Debug for NewCook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewCook")
            .field("username", &self.username)
            .field("years_of_experience", &self.years_of_experience)
            .finish_non_exhaustive()
    }
}

/// A cook together with the dishes they are credited on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookDetail {
    pub cook: Cook,
    pub dishes: Vec<DishSummary>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("", UsernameValidationError::Blank)]
    #[case("chef ann", UsernameValidationError::InvalidCharacters)]
    #[case("chef#1", UsernameValidationError::InvalidCharacters)]
    fn username_rejects(#[case] raw: &str, #[case] expected: UsernameValidationError) {
        assert_eq!(Username::new(raw), Err(expected));
    }

    #[rstest]
    fn username_length_limit() {
        assert!(Username::new("a".repeat(150)).is_ok());
        assert_eq!(
            Username::new("a".repeat(151)),
            Err(UsernameValidationError::TooLong { max: 150 })
        );
    }

    #[rstest]
    #[case(-1, Err(ExperienceValidationError::Negative))]
    #[case(0, Ok(0))]
    #[case(12, Ok(12))]
    #[case(i64::from(i32::MAX) + 1, Err(ExperienceValidationError::TooLarge { max: i32::MAX }))]
    fn experience_bounds(
        #[case] raw: i64,
        #[case] expected: Result<i32, ExperienceValidationError>,
    ) {
        assert_eq!(YearsOfExperience::new(raw).map(YearsOfExperience::get), expected);
    }

    #[rstest]
    #[case("", "", PasswordValidationError::Required)]
    #[case("tomato-soup", "tomato-stew", PasswordValidationError::Mismatch)]
    #[case("short", "short", PasswordValidationError::TooShort { min: 8 })]
    #[case("1234567890", "1234567890", PasswordValidationError::EntirelyNumeric)]
    fn password_rules(
        #[case] password1: &str,
        #[case] password2: &str,
        #[case] expected: PasswordValidationError,
    ) {
        assert_eq!(NewPassword::confirm(password1, password2).err(), Some(expected));
    }

    #[rstest]
    fn password_debug_is_redacted() {
        let password = NewPassword::confirm("tomato-soup", "tomato-soup").expect("valid");
        assert!(!format!("{password:?}").contains("tomato"));
    }

    #[rstest]
    fn cook_display_format() {
        let cook = Cook {
            id: CookId::new(1),
            username: Username::new("test_username").expect("username"),
            first_name: PersonName::new("test_first").expect("first"),
            last_name: PersonName::new("test_last").expect("last"),
            years_of_experience: YearsOfExperience::default(),
            date_joined: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("date"),
        };
        assert_eq!(cook.to_string(), "test_username: (test_first test_last)");
    }
}
