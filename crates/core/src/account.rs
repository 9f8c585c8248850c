//! Customer accounts.

use secrecy::SecretString;
use thiserror::Error;

use crate::types::{CustomerName, Email, EmailError, NameError};

/// Errors that can occur when creating an [`Account`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// The name failed validation.
    #[error("invalid name: {0}")]
    InvalidName(#[from] NameError),

    /// The email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// A customer identity.
///
/// The password is opaque and never validated; it is held as a
/// [`SecretString`] so it cannot leak through `Debug` output.
#[derive(Debug, Clone)]
pub struct Account {
    name: CustomerName,
    email: Email,
    password: SecretString,
    is_registered: bool,
}

impl Account {
    /// Create an unregistered account from raw input.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError`] if the name or email is malformed.
    pub fn new(name: &str, email: &str, password: SecretString) -> Result<Self, AccountError> {
        Ok(Self::from_parts(
            CustomerName::parse(name)?,
            Email::parse(email)?,
            password,
        ))
    }

    /// Create an unregistered account from already validated parts.
    #[must_use]
    pub const fn from_parts(name: CustomerName, email: Email, password: SecretString) -> Self {
        Self {
            name,
            email,
            password,
            is_registered: false,
        }
    }

    /// Mark the account as registered and return the confirmation text.
    ///
    /// Calling this again only repeats the confirmation.
    pub fn register(&mut self) -> String {
        self.is_registered = true;
        format!(
            "Account for {} has been created, a confirmation email was sent to {}.",
            self.name, self.email
        )
    }

    #[must_use]
    pub const fn name(&self) -> &CustomerName {
        &self.name
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// The password as supplied at creation.
    #[must_use]
    pub const fn password(&self) -> &SecretString {
        &self.password
    }

    #[must_use]
    pub const fn is_registered(&self) -> bool {
        self.is_registered
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn account() -> Account {
        Account::new("test", "test@example.com", SecretString::from("geheim")).unwrap()
    }

    #[test]
    fn test_new_account_is_unregistered() {
        assert!(!account().is_registered());
    }

    #[test]
    fn test_register_sets_flag_and_mentions_identity() {
        let mut account = account();
        let message = account.register();
        assert!(account.is_registered());
        assert!(message.contains("test"));
        assert!(message.contains("test@example.com"));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut account = account();
        let first = account.register();
        let second = account.register();
        assert_eq!(first, second);
        assert!(account.is_registered());
    }

    #[test]
    fn test_rejects_invalid_input() {
        let err = Account::new("t3st", "test@example.com", SecretString::from("x")).unwrap_err();
        assert!(matches!(err, AccountError::InvalidName(_)));

        let err = Account::new("test", "not-an-email", SecretString::from("x")).unwrap_err();
        assert!(matches!(err, AccountError::InvalidEmail(_)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let account = account();
        assert_eq!(account.password().expose_secret(), "geheim");
        assert!(!format!("{account:?}").contains("geheim"));
    }
}
