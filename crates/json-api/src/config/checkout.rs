//! Checkout Config

use aura::{CheckoutFees, ConversionError, CurrencyConversion};
use clap::Args;
use rust_decimal::Decimal;

/// Checkout settings. Fees are given in the display currency (PKR).
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Flat shipping fee in PKR
    #[arg(long, env = "CHECKOUT_SHIPPING_FEE", default_value = "500")]
    pub shipping_fee: Decimal,

    /// Cash-on-delivery surcharge in PKR
    #[arg(long, env = "CHECKOUT_COD_SURCHARGE", default_value = "250")]
    pub cod_surcharge: Decimal,

    /// PKR per USD
    #[arg(long, env = "CHECKOUT_EXCHANGE_RATE", default_value = "280")]
    pub exchange_rate: Decimal,

    /// Approve every well-formed card, not just the test numbers
    #[arg(
        long,
        env = "PAYMENTS_TEST_MODE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub payments_test_mode: bool,
}

impl CheckoutConfig {
    /// The currency conversion used for fees and response display strings.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange rate is not positive.
    pub fn conversion(&self) -> Result<CurrencyConversion, ConversionError> {
        CurrencyConversion::new(self.exchange_rate)
    }

    /// Fees converted into base currency minor units.
    ///
    /// # Errors
    ///
    /// Returns an error if a fee is negative or the rate is invalid.
    pub fn fees(&self, conversion: &CurrencyConversion) -> Result<CheckoutFees, ConversionError> {
        CheckoutFees::from_display(self.shipping_fee, self.cod_surcharge, conversion)
    }
}
