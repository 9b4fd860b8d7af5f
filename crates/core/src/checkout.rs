//! Checkout
//!
//! Order totals for a set of priced cart lines, in base-currency minor units.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::currency::{ConversionError, CurrencyConversion};

/// How the customer settles the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Paid to the courier on delivery, subject to a surcharge.
    CashOnDelivery,

    /// Paid up front.
    BankTransfer,
}

impl PaymentMethod {
    /// Stable storage name of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "cash_on_delivery",
            Self::BankTransfer => "bank_transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when parsing an unknown payment method name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash_on_delivery" => Ok(Self::CashOnDelivery),
            "bank_transfer" => Ok(Self::BankTransfer),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// Fixed checkout fees, already in base-currency minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutFees {
    /// Flat shipping fee charged on every order.
    pub shipping: u64,

    /// Extra fee charged on cash-on-delivery orders.
    pub cod_surcharge: u64,
}

impl CheckoutFees {
    /// Build fees from display-currency amounts, converting each exactly once and
    /// rounding each to whole minor units.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] if either amount is negative or out of range.
    pub fn from_display(
        shipping: Decimal,
        cod_surcharge: Decimal,
        conversion: &CurrencyConversion,
    ) -> Result<Self, ConversionError> {
        Ok(Self {
            shipping: conversion.display_major_to_base_minor(shipping)?,
            cod_surcharge: conversion.display_major_to_base_minor(cod_surcharge)?,
        })
    }

    /// Surcharge applicable to `method`.
    pub fn surcharge_for(&self, method: PaymentMethod) -> u64 {
        match method {
            PaymentMethod::CashOnDelivery => self.cod_surcharge,
            PaymentMethod::BankTransfer => 0,
        }
    }
}

/// A line that can be priced at checkout.
pub trait PricedLine {
    /// Unit price in base minor units.
    fn unit_price(&self) -> u64;

    /// Number of units.
    fn quantity(&self) -> u32;
}

/// Computed totals for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Sum of line prices.
    pub subtotal: u64,

    /// Shipping fee.
    pub shipping: u64,

    /// Payment method surcharge, zero unless cash on delivery.
    pub surcharge: u64,

    /// Amount due.
    pub total: u64,
}

/// Errors that can occur when quoting an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    /// There were no lines to price.
    #[error("no lines to price")]
    NoLines,

    /// A line had a quantity of zero.
    #[error("line quantity must be at least one")]
    InvalidQuantity,

    /// An intermediate amount overflowed.
    #[error("order total overflowed")]
    Overflow,
}

/// Price `lines` for `method` with the given fees.
///
/// # Errors
///
/// - [`QuoteError::NoLines`]: `lines` is empty.
/// - [`QuoteError::InvalidQuantity`]: a line has a zero quantity.
/// - [`QuoteError::Overflow`]: any sum exceeds `u64`.
pub fn quote<L: PricedLine>(
    lines: &[L],
    method: PaymentMethod,
    fees: &CheckoutFees,
) -> Result<Quote, QuoteError> {
    if lines.is_empty() {
        return Err(QuoteError::NoLines);
    }

    let subtotal = lines.iter().try_fold(0_u64, |acc, line| {
        if line.quantity() == 0 {
            return Err(QuoteError::InvalidQuantity);
        }

        line.unit_price()
            .checked_mul(u64::from(line.quantity()))
            .and_then(|amount| acc.checked_add(amount))
            .ok_or(QuoteError::Overflow)
    })?;

    let surcharge = fees.surcharge_for(method);

    let total = subtotal
        .checked_add(fees.shipping)
        .and_then(|amount| amount.checked_add(surcharge))
        .ok_or(QuoteError::Overflow)?;

    Ok(Quote {
        subtotal,
        shipping: fees.shipping,
        surcharge,
        total,
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    struct Line(u64, u32);

    impl PricedLine for Line {
        fn unit_price(&self) -> u64 {
            self.0
        }

        fn quantity(&self) -> u32 {
            self.1
        }
    }

    fn fees() -> Result<CheckoutFees, ConversionError> {
        CheckoutFees::from_display(
            Decimal::from(500),
            Decimal::from(250),
            &CurrencyConversion::new(Decimal::from(280))?,
        )
    }

    #[test]
    fn fees_are_converted_once() -> TestResult {
        assert_eq!(
            fees()?,
            CheckoutFees {
                shipping: 179,
                cod_surcharge: 89,
            }
        );

        Ok(())
    }

    #[test]
    fn fees_round_to_cents_before_they_are_summed() -> TestResult {
        // 1.01 PKR at 200 PKR/USD is 0.505 cents, which rounds up to 1 for each fee.
        let fees = CheckoutFees::from_display(
            Decimal::new(101, 2),
            Decimal::new(101, 2),
            &CurrencyConversion::new(Decimal::from(200))?,
        )?;

        let quote = quote(&[Line(1_000, 1)], PaymentMethod::CashOnDelivery, &fees)?;

        assert_eq!((quote.shipping, quote.surcharge), (1, 1));
        assert_eq!(quote.total, 1_002);
        assert_eq!(quote.total, quote.subtotal + quote.shipping + quote.surcharge);

        Ok(())
    }

    #[test]
    fn bank_transfer_total_has_no_surcharge() -> TestResult {
        let quote = quote(&[Line(10_000, 2)], PaymentMethod::BankTransfer, &fees()?)?;

        assert_eq!(
            quote,
            Quote {
                subtotal: 20_000,
                shipping: 179,
                surcharge: 0,
                total: 20_179,
            }
        );

        Ok(())
    }

    #[test]
    fn cash_on_delivery_adds_surcharge() -> TestResult {
        let quote = quote(&[Line(10_000, 2)], PaymentMethod::CashOnDelivery, &fees()?)?;

        assert_eq!(quote.surcharge, 89);
        assert_eq!(quote.total, 20_268);

        Ok(())
    }

    #[test]
    fn subtotal_sums_every_line() -> TestResult {
        let quote = quote(
            &[Line(1_250, 3), Line(499, 1), Line(0, 4)],
            PaymentMethod::BankTransfer,
            &fees()?,
        )?;

        assert_eq!(quote.subtotal, 4_249);
        assert_eq!(quote.total, 4_428);

        Ok(())
    }

    #[test]
    fn empty_lines_are_rejected() -> TestResult {
        let lines: [Line; 0] = [];

        assert_eq!(
            quote(&lines, PaymentMethod::BankTransfer, &fees()?),
            Err(QuoteError::NoLines)
        );

        Ok(())
    }

    #[test]
    fn zero_quantity_is_rejected() -> TestResult {
        assert_eq!(
            quote(&[Line(100, 0)], PaymentMethod::BankTransfer, &fees()?),
            Err(QuoteError::InvalidQuantity)
        );

        Ok(())
    }

    #[test]
    fn overflow_is_reported() -> TestResult {
        assert_eq!(
            quote(&[Line(u64::MAX, 2)], PaymentMethod::BankTransfer, &fees()?),
            Err(QuoteError::Overflow)
        );

        Ok(())
    }

    #[test]
    fn payment_method_round_trips_storage_name() -> TestResult {
        assert_eq!(
            "cash_on_delivery".parse::<PaymentMethod>()?,
            PaymentMethod::CashOnDelivery
        );
        assert_eq!(PaymentMethod::BankTransfer.to_string(), "bank_transfer");
        assert!("card".parse::<PaymentMethod>().is_err());

        Ok(())
    }
}
