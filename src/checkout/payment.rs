//! Payment amounts

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;

use super::CheckoutError;

/// A strictly positive amount the shopper says they paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PaymentAmount(Decimal);

impl PaymentAmount {
    /// Validate an amount.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidAmount`] if `amount` is zero or negative.
    pub fn new(amount: Decimal) -> Result<Self, CheckoutError> {
        if amount <= Decimal::ZERO {
            return Err(CheckoutError::InvalidAmount(amount.to_string()));
        }

        Ok(Self(amount))
    }

    /// Parse an amount typed by the shopper.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidAmount`] if the input is empty, not a
    /// decimal number, or not positive.
    pub fn parse(input: &str) -> Result<Self, CheckoutError> {
        let trimmed = input.trim();

        let amount = trimmed
            .parse::<Decimal>()
            .map_err(|_err| CheckoutError::InvalidAmount(trimmed.to_string()))?;

        Self::new(amount)
    }

    /// The validated amount.
    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl FromStr for PaymentAmount {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PaymentAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PaymentAmount> for Decimal {
    fn from(amount: PaymentAmount) -> Self {
        amount.0
    }
}
