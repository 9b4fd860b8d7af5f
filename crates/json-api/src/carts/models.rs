//! Cart request and response bodies.

use aura::CurrencyConversion;
use aura_app::domain::{
    carts::{
        data::{ImportOutcome, NewCartLine},
        records::{CartLineRecord, CartLineUuid},
    },
    products::records::TesterUuid,
};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, money::MoneyResponse};

/// A cart line as sent by the client.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineRequest {
    /// Client-side line id, kept when importing a guest cart. Generated when
    /// absent.
    pub uuid: Option<Uuid>,
    pub product_uuid: Uuid,
    pub tester_uuid: Option<Uuid>,
    pub size: String,
    pub quantity: u32,

    /// Unit price in base currency minor units (US cents)
    pub unit_price: u64,
}

impl From<CartLineRequest> for NewCartLine {
    fn from(request: CartLineRequest) -> Self {
        NewCartLine {
            uuid: request.uuid.map_or_else(CartLineUuid::new, CartLineUuid::from),
            product_uuid: request.product_uuid.into(),
            tester_uuid: request.tester_uuid.map(TesterUuid::from),
            size: request.size,
            quantity: request.quantity,
            unit_price: request.unit_price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub tester_uuid: Option<Uuid>,
    pub tester_name: Option<String>,
    pub size: String,
    pub quantity: u32,
    pub unit_price: MoneyResponse,
    pub line_total: MoneyResponse,
    pub created_at: String,
    pub updated_at: String,
}

impl CartLineResponse {
    pub(crate) fn new(
        line: CartLineRecord,
        conversion: &CurrencyConversion,
    ) -> Result<Self, StatusError> {
        let line_total = line_total(&line)?;

        Ok(Self {
            uuid: line.uuid.into(),
            product_uuid: line.product_uuid.into(),
            tester_uuid: line.tester_uuid.map(Uuid::from),
            unit_price: MoneyResponse::new(conversion, line.unit_price)?,
            line_total: MoneyResponse::new(conversion, line_total)?,
            created_at: line.created_at.to_string(),
            updated_at: line.updated_at.to_string(),
            product_name: line.product_name,
            tester_name: line.tester_name,
            size: line.size,
            quantity: line.quantity,
        })
    }
}

pub(crate) fn line_total(line: &CartLineRecord) -> Result<u64, StatusError> {
    line.unit_price
        .checked_mul(u64::from(line.quantity))
        .ok_or("line total overflowed")
        .or_500("failed to price cart line")
}

/// What happened to one imported guest line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub(crate) enum ImportOutcomeResponse {
    /// Stored as a new server line.
    Added { line: CartLineResponse },

    /// A server line already exists for the same variant; nothing changed.
    Conflict {
        guest: Uuid,
        existing: CartLineResponse,
    },
}

impl ImportOutcomeResponse {
    pub(crate) fn new(
        outcome: ImportOutcome,
        conversion: &CurrencyConversion,
    ) -> Result<Self, StatusError> {
        Ok(match outcome {
            ImportOutcome::Added(line) => Self::Added {
                line: CartLineResponse::new(line, conversion)?,
            },
            ImportOutcome::Conflict { guest, existing } => Self::Conflict {
                guest: guest.into(),
                existing: CartLineResponse::new(existing, conversion)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use aura_app::domain::products::records::ProductUuid;
    use testresult::TestResult;

    use crate::test_helpers::make_line;

    use super::*;

    #[test]
    fn missing_uuid_is_generated_and_given_uuid_is_kept() {
        let request = |uuid| CartLineRequest {
            uuid,
            product_uuid: Uuid::now_v7(),
            tester_uuid: None,
            size: "100 ml".to_string(),
            quantity: 1,
            unit_price: 100_00,
        };

        let given = Uuid::now_v7();
        let kept = NewCartLine::from(request(Some(given)));
        let generated = NewCartLine::from(request(None));

        assert_eq!(kept.uuid.into_uuid(), given);
        assert_ne!(generated.uuid.into_uuid(), given);
    }

    #[test]
    fn line_total_multiplies_quantity() -> TestResult {
        let line = make_line(CartLineUuid::new());

        assert_eq!(line_total(&line)?, 200_00);

        Ok(())
    }

    #[test]
    fn overflowing_line_total_is_an_error() {
        let line = CartLineRecord {
            unit_price: u64::MAX,
            product_uuid: ProductUuid::new(),
            ..make_line(CartLineUuid::new())
        };

        assert!(line_total(&line).is_err(), "expected overflow to be rejected");
    }
}
