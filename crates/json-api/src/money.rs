//! Money in responses.

use aura::CurrencyConversion;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};

use crate::extensions::*;

/// An amount in base currency minor units with its display-currency rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct MoneyResponse {
    /// Base currency minor units (US cents)
    pub amount: u64,

    /// The amount converted to the display currency, in major units with symbol
    pub display: String,
}

impl MoneyResponse {
    pub(crate) fn new(conversion: &CurrencyConversion, amount: u64) -> Result<Self, StatusError> {
        let display = conversion
            .to_display(amount)
            .or_500("failed to convert amount for display")?
            .to_string();

        Ok(Self { amount, display })
    }
}
