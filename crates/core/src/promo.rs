//! Promotional discount codes.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recognized promo code.
///
/// Codes match exactly (case-sensitive). Anything else is not a promo code
/// and [`PromoCode::parse`] returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromoCode {
    #[serde(rename = "PROMO20")]
    Promo20,
    #[serde(rename = "PROMO10")]
    Promo10,
}

impl PromoCode {
    /// Every recognized code.
    pub const ALL: [Self; 2] = [Self::Promo20, Self::Promo10];

    /// Look up a code from customer input.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|promo| promo.as_str() == code)
    }

    /// The code as typed by customers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Promo20 => "PROMO20",
            Self::Promo10 => "PROMO10",
        }
    }

    /// Fraction of the current total taken off.
    #[must_use]
    pub const fn rate(self) -> Decimal {
        match self {
            Self::Promo20 => Decimal::from_parts(20, 0, 0, false, 2),
            Self::Promo10 => Decimal::from_parts(10, 0, 0, false, 2),
        }
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
