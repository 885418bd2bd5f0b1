//! Payment method selection and card validation.
//!
//! Card data is validated here and then discarded: nothing in this module
//! is ever persisted or transmitted.

use chrono::{DateTime, Datelike, Utc};
use thiserror::Error;

/// How many years ahead a card expiry may lie.
const MAX_EXPIRY_YEARS_AHEAD: i32 = 10;

/// Errors that can occur while validating a payment method.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Cardholder name is required.
    #[error("cardholder name is required")]
    MissingHolderName,

    /// Card number must be 16 digits.
    #[error("card number must be 16 digits")]
    InvalidCardNumber,

    /// Expiry must be MM/YY.
    #[error("expiry date must be in MM/YY format")]
    InvalidExpiryFormat,

    /// Expiry month must be 1-12.
    #[error("expiry month must be between 01 and 12")]
    InvalidExpiryMonth,

    /// The card has expired.
    #[error("card has expired")]
    CardExpired,

    /// The expiry year is implausibly far ahead.
    #[error("expiry year is more than {MAX_EXPIRY_YEARS_AHEAD} years ahead")]
    ExpiryTooFarAhead,

    /// CVV must be 3 or 4 digits.
    #[error("CVV must be 3 or 4 digits")]
    InvalidCvv,
}

/// Card fields as entered on the payment screen.
#[derive(Debug, Clone)]
pub struct CardDetails {
    /// Name on the card.
    pub holder_name: String,
    /// Card number; spaces are ignored.
    pub number: String,
    /// Expiry in `MM/YY` form.
    pub expiry: String,
    /// Card verification value.
    pub cvv: String,
}

impl CardDetails {
    /// Validate all four fields against the given "now".
    ///
    /// # Errors
    ///
    /// Returns the first failing [`PaymentError`].
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), PaymentError> {
        if self.holder_name.trim().is_empty() {
            return Err(PaymentError::MissingHolderName);
        }

        let digits: String = self.number.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() != 16 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PaymentError::InvalidCardNumber);
        }

        let (month, year) = parse_expiry(&self.expiry)?;
        check_expiry(month, year, now)?;

        let cvv_len = self.cvv.len();
        if !(3..=4).contains(&cvv_len) || !self.cvv.chars().all(|c| c.is_ascii_digit()) {
            return Err(PaymentError::InvalidCvv);
        }

        Ok(())
    }
}

/// Payment method chosen on the payment screen.
///
/// Wallet methods carry no fields and always validate; card methods
/// validate their details.
#[derive(Debug, Clone)]
pub enum PaymentMethod {
    CreditCard(CardDetails),
    DebitCard(CardDetails),
    ApplePay,
    GooglePay,
}

impl PaymentMethod {
    /// Validate the method against the current time.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] for invalid card details.
    pub fn validate(&self) -> Result<(), PaymentError> {
        self.validate_at(Utc::now())
    }

    /// Validate the method against the given "now".
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] for invalid card details.
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), PaymentError> {
        match self {
            Self::CreditCard(card) | Self::DebitCard(card) => card.validate_at(now),
            Self::ApplePay | Self::GooglePay => Ok(()),
        }
    }

    /// Display label matching the payment screen.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CreditCard(_) => "Credit Card",
            Self::DebitCard(_) => "Debit Card",
            Self::ApplePay => "Apple Pay",
            Self::GooglePay => "Google Pay",
        }
    }
}

/// Parse an `MM/YY` expiry string into numeric month and two-digit year.
fn parse_expiry(expiry: &str) -> Result<(u32, i32), PaymentError> {
    let (month_part, year_part) = expiry
        .split_once('/')
        .ok_or(PaymentError::InvalidExpiryFormat)?;

    let month: u32 = month_part
        .trim()
        .parse()
        .map_err(|_| PaymentError::InvalidExpiryFormat)?;
    let year: i32 = year_part
        .trim()
        .parse()
        .map_err(|_| PaymentError::InvalidExpiryFormat)?;

    Ok((month, year))
}

fn check_expiry(month: u32, year: i32, now: DateTime<Utc>) -> Result<(), PaymentError> {
    if !(1..=12).contains(&month) {
        return Err(PaymentError::InvalidExpiryMonth);
    }

    let current_year = now.year() % 100;
    let current_month = now.month();

    if year < current_year {
        return Err(PaymentError::CardExpired);
    }
    if year > current_year + MAX_EXPIRY_YEARS_AHEAD {
        return Err(PaymentError::ExpiryTooFarAhead);
    }
    if year == current_year && month < current_month {
        return Err(PaymentError::CardExpired);
    }

    Ok(())
}
