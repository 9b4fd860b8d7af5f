//! Currency Conversion
//!
//! Amounts are stored in minor units of the base currency (USD). Customers see
//! prices in the display currency (PKR). [`CurrencyConversion`] is the only
//! place the exchange rate is applied, in either direction.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Errors raised while converting between currencies.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// The exchange rate was zero or negative.
    #[error("exchange rate must be positive")]
    NonPositiveRate,

    /// The amount was negative where only non-negative amounts are allowed.
    #[error("amount must not be negative")]
    NegativeAmount,

    /// The converted amount does not fit the target representation.
    #[error("converted amount is out of range")]
    Overflow,
}

/// Converts between base-currency minor units and display-currency amounts.
///
/// Both currencies use two decimal places, so minor units convert with the same
/// rate as major units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyConversion {
    rate: Decimal,
    display: &'static Currency,
}

impl CurrencyConversion {
    /// Create a USD to PKR conversion with the given rate (PKR per USD).
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::NonPositiveRate`] if `rate` is zero or negative.
    pub fn new(rate: Decimal) -> Result<Self, ConversionError> {
        if rate <= Decimal::ZERO {
            return Err(ConversionError::NonPositiveRate);
        }

        Ok(Self {
            rate,
            display: iso::PKR,
        })
    }

    /// Display-currency units per base-currency unit.
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Convert a display-currency major amount (e.g. `500` PKR) into base minor
    /// units, rounded half away from zero.
    ///
    /// # Errors
    ///
    /// - [`ConversionError::NegativeAmount`]: `amount` is negative.
    /// - [`ConversionError::Overflow`]: the result does not fit in a `u64`.
    pub fn display_major_to_base_minor(&self, amount: Decimal) -> Result<u64, ConversionError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ConversionError::NegativeAmount);
        }

        amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|minor| minor.checked_div(self.rate))
            .ok_or(ConversionError::Overflow)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .ok_or(ConversionError::Overflow)
    }

    /// Convert base minor units into display-currency money for presentation.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Overflow`] if the converted amount does not fit.
    pub fn to_display(&self, minor: u64) -> Result<Money<'static, Currency>, ConversionError> {
        let display_minor = Decimal::from(minor)
            .checked_mul(self.rate)
            .ok_or(ConversionError::Overflow)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or(ConversionError::Overflow)?;

        Ok(Money::from_minor(display_minor, self.display))
    }
}
