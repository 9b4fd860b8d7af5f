//! Product request and response bodies.

use aura::CurrencyConversion;
use aura_app::domain::products::{
    data::ProductDetailsData,
    records::{
        Category, FragranceType, ProductDetails, ProductRecord, ProductStatus, TesterRecord,
    },
};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, money::MoneyResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub brand_name: String,
    pub description: Option<String>,

    /// One of `mens`, `womens`, `unisex`, `special_offer`
    pub category: String,

    /// One of `EDP`, `EDT`, `EDC`, `Oil`
    pub fragrance_type: String,
    pub notes: Option<String>,
    pub price: MoneyResponse,

    /// Informational only; not applied at checkout
    pub discount_percentage: u8,
    pub sku: String,
    pub stock_quantity: u32,
    pub minimum_stock: u32,

    /// Stock is at or below the minimum
    pub low_stock: bool,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ProductResponse {
    pub(crate) fn new(
        product: ProductRecord,
        conversion: &CurrencyConversion,
    ) -> Result<Self, StatusError> {
        Ok(Self {
            uuid: product.uuid.into(),
            low_stock: product.is_low_stock(),
            price: MoneyResponse::new(conversion, product.price)?,
            category: product.category.to_string(),
            fragrance_type: product.fragrance_type.to_string(),
            status: product.status.to_string(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
            name: product.name,
            brand_name: product.brand_name,
            description: product.description,
            notes: product.notes,
            discount_percentage: product.discount_percentage,
            sku: product.sku,
            stock_quantity: product.stock_quantity,
            minimum_stock: product.minimum_stock,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TesterResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub name: String,
    pub price: MoneyResponse,
    pub size: String,
}

impl TesterResponse {
    pub(crate) fn new(
        tester: TesterRecord,
        conversion: &CurrencyConversion,
    ) -> Result<Self, StatusError> {
        Ok(Self {
            uuid: tester.uuid.into(),
            product_uuid: tester.product_uuid.into(),
            price: MoneyResponse::new(conversion, tester.price)?,
            name: tester.name,
            size: tester.size,
        })
    }
}

/// A product with its tester variants.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDetailsResponse {
    pub product: ProductResponse,
    pub testers: Vec<TesterResponse>,
}

impl ProductDetailsResponse {
    pub(crate) fn new(
        details: ProductDetails,
        conversion: &CurrencyConversion,
    ) -> Result<Self, StatusError> {
        Ok(Self {
            product: ProductResponse::new(details.product, conversion)?,
            testers: details
                .testers
                .into_iter()
                .map(|tester| TesterResponse::new(tester, conversion))
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Editable product fields, shared by create and update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    pub name: String,
    pub brand_name: String,
    pub description: Option<String>,
    pub category: String,
    pub fragrance_type: String,
    pub notes: Option<String>,

    /// Price in base currency minor units (US cents)
    pub price: u64,

    #[serde(default)]
    pub discount_percentage: u8,

    #[serde(default)]
    pub stock_quantity: u32,

    /// Defaults to 10
    pub minimum_stock: Option<u32>,

    /// `active` (default) or `inactive`
    pub status: Option<String>,
}

impl ProductRequest {
    pub(crate) fn into_details(self) -> Result<ProductDetailsData, StatusError> {
        Ok(ProductDetailsData {
            category: self
                .category
                .parse::<Category>()
                .or_400("Invalid product category")?,
            fragrance_type: self
                .fragrance_type
                .parse::<FragranceType>()
                .or_400("Invalid product fragrance_type")?,
            status: self
                .status
                .as_deref()
                .map(str::parse::<ProductStatus>)
                .transpose()
                .or_400("Invalid product status")?
                .unwrap_or(ProductStatus::Active),
            name: self.name,
            brand_name: self.brand_name,
            description: self.description,
            notes: self.notes,
            price: self.price,
            discount_percentage: self.discount_percentage,
            stock_quantity: self.stock_quantity,
            minimum_stock: self.minimum_stock,
        })
    }
}
