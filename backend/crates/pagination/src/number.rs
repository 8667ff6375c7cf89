//! Validated page numbers and page sizes.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

/// Errors raised by strict page number parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageNumberError {
    /// Page numbers are 1-based; zero is rejected.
    #[error("page number must be at least 1")]
    Zero,
    /// The raw value is not a non-negative integer.
    #[error("page number must be a positive integer, got '{value}'")]
    Invalid {
        /// Raw value supplied by the caller.
        value: String,
    },
}

/// One-based page number.
///
/// # Examples
///
/// ```
/// use pagination::PageNumber;
///
/// assert_eq!("2".parse::<PageNumber>().map(PageNumber::get), Ok(2));
/// assert_eq!(PageNumber::from_query(Some("-4")), PageNumber::FIRST);
/// assert_eq!(PageNumber::from_query(None), PageNumber::FIRST);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(NonZeroU64);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU64::MIN);

    /// Construct a page number, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`PageNumberError::Zero`] when `value` is zero.
    pub const fn new(value: u64) -> Result<Self, PageNumberError> {
        match NonZeroU64::new(value) {
            Some(number) => Ok(Self(number)),
            None => Err(PageNumberError::Zero),
        }
    }

    /// Parse a raw query parameter, falling back to the first page.
    ///
    /// Missing, blank, zero, negative, and non-numeric values all resolve to
    /// [`PageNumber::FIRST`].
    #[must_use]
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok())
            .unwrap_or(Self::FIRST)
    }

    /// Return the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// Return the following page number, saturating at `u64::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Return the preceding page number, or `None` on the first page.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match NonZeroU64::new(self.0.get().saturating_sub(1)) {
            Some(number) => Some(Self(number)),
            None => None,
        }
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageNumber {
    type Err = PageNumberError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let value = trimmed
            .parse::<u64>()
            .map_err(|_| PageNumberError::Invalid {
                value: trimmed.to_owned(),
            })?;
        Self::new(value)
    }
}

/// Number of items on a full page. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(NonZeroU64);

impl PageSize {
    /// Construct a page size, treating zero as one.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::PageSize;
    ///
    /// assert_eq!(PageSize::clamped(10).get(), 10);
    /// assert_eq!(PageSize::clamped(0).get(), 1);
    /// ```
    #[must_use]
    pub const fn clamped(value: u64) -> Self {
        match NonZeroU64::new(value) {
            Some(size) => Self(size),
            None => Self(NonZeroU64::MIN),
        }
    }

    /// Return the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}
