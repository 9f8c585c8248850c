//! Customer name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CustomerName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The input string is empty.
    #[error("name cannot be empty")]
    Empty,
    /// The input contains something other than letters.
    #[error("name may only contain letters (found {found:?})")]
    NonAlphabetic {
        /// First offending character.
        found: char,
    },
}

/// A customer's display name.
///
/// Names are a single word of letters. Any Unicode letter is accepted, so
/// `"Jürgen"` is valid while `"Anna Lena"` and `"R2D2"` are not.
///
/// ```
/// use shopapp_core::CustomerName;
///
/// assert!(CustomerName::parse("alice").is_ok());
/// assert!(CustomerName::parse("Jürgen").is_ok());
/// assert!(CustomerName::parse("alice smith").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CustomerName(String);

impl CustomerName {
    /// Parse a `CustomerName` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or contains a non-letter.
    pub fn parse(s: &str) -> Result<Self, NameError> {
        if s.is_empty() {
            return Err(NameError::Empty);
        }

        if let Some(found) = s.chars().find(|c| !c.is_alphabetic()) {
            return Err(NameError::NonAlphabetic { found });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CustomerName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CustomerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
