//! Payments
//!
//! Card-shaped instruments and the simulated gateway that decides whether a
//! charge is approved. Instruments are checked for shape only.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Card numbers that are always approved.
pub const TEST_CARD_NUMBERS: [&str; 3] = ["4111111111111111", "4000000000000002", "4000000000000119"];

/// A card-like payment instrument as submitted by the customer.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CardInstrument {
    /// Card number, digits optionally grouped with spaces.
    pub number: String,

    /// Expiry as `MM/YY`.
    pub expiry: String,

    /// Card verification value.
    pub cvv: String,

    /// Name on the card.
    pub holder: String,
}

impl fmt::Debug for CardInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardInstrument")
            .field("number", &"<redacted>")
            .field("expiry", &"<redacted>")
            .field("cvv", &"<redacted>")
            .field("holder", &self.holder)
            .finish()
    }
}

/// Shape errors for a [`CardInstrument`]. Messages never include the value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstrumentError {
    /// Card number was not 13 to 19 digits or spaces.
    #[error("invalid card number")]
    CardNumber,

    /// Expiry was not `MM/YY` with a month between 01 and 12.
    #[error("invalid expiry date")]
    Expiry,

    /// CVV was not 3 or 4 digits.
    #[error("invalid cvv")]
    Cvv,

    /// Holder name was not 2 to 50 letters or spaces.
    #[error("invalid card holder name")]
    Holder,
}

impl CardInstrument {
    /// Check every field for shape.
    ///
    /// # Errors
    ///
    /// Returns the [`InstrumentError`] for the first field that is malformed.
    pub fn validate(&self) -> Result<(), InstrumentError> {
        let number_len = self.number.chars().count();

        if !(13..=19).contains(&number_len)
            || !self.number.chars().all(|c| c.is_ascii_digit() || c == ' ')
        {
            return Err(InstrumentError::CardNumber);
        }

        if !valid_expiry(&self.expiry) {
            return Err(InstrumentError::Expiry);
        }

        let cvv_len = self.cvv.chars().count();

        if !(3..=4).contains(&cvv_len) || !self.cvv.chars().all(|c| c.is_ascii_digit()) {
            return Err(InstrumentError::Cvv);
        }

        let holder_len = self.holder.chars().count();

        if !(2..=50).contains(&holder_len)
            || !self.holder.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
        {
            return Err(InstrumentError::Holder);
        }

        Ok(())
    }

    /// Card number with grouping spaces removed.
    pub fn digits(&self) -> String {
        self.number.chars().filter(char::is_ascii_digit).collect()
    }

    /// Last four digits of the card, for receipts and logs.
    pub fn last_four(&self) -> String {
        let digits = self.digits();
        let skip = digits.chars().count().saturating_sub(4);

        digits.chars().skip(skip).collect()
    }
}

fn valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };

    let two_digits = |part: &str| part.len() == 2 && part.chars().all(|c| c.is_ascii_digit());

    if !two_digits(month) || !two_digits(year) {
        return false;
    }

    month
        .parse::<u8>()
        .is_ok_and(|month| (1..=12).contains(&month))
}

/// Outcome of a gateway authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayDecision {
    /// The charge went through.
    Approved,

    /// The charge was refused.
    Declined,
}

/// Deterministic stand-in for a card gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedGateway {
    test_mode: bool,
}

impl SimulatedGateway {
    /// Create a gateway. In test mode every well-formed card is approved.
    pub fn new(test_mode: bool) -> Self {
        Self { test_mode }
    }

    /// Decide on a charge against `instrument`.
    ///
    /// # Errors
    ///
    /// Returns an [`InstrumentError`] if the instrument is malformed.
    pub fn authorize(&self, instrument: &CardInstrument) -> Result<GatewayDecision, InstrumentError> {
        instrument.validate()?;

        let digits = instrument.digits();

        if TEST_CARD_NUMBERS.contains(&digits.as_str()) || self.test_mode {
            Ok(GatewayDecision::Approved)
        } else {
            Ok(GatewayDecision::Declined)
        }
    }
}
