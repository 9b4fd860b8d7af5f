//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{domain::UnknownVariant, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Tester UUID
pub type TesterUuid = TypedUuid<TesterRecord>;

/// Storefront collection a product is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Mens,
    Womens,
    Unisex,
    SpecialOffer,
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Mens, Self::Womens, Self::Unisex, Self::SpecialOffer];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mens => "mens",
            Self::Womens => "womens",
            Self::Unisex => "unisex",
            Self::SpecialOffer => "special_offer",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("category", s))
    }
}

/// Concentration of the fragrance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragranceType {
    EauDeParfum,
    EauDeToilette,
    EauDeCologne,
    Oil,
}

impl FragranceType {
    pub const ALL: [Self; 4] = [
        Self::EauDeParfum,
        Self::EauDeToilette,
        Self::EauDeCologne,
        Self::Oil,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EauDeParfum => "EDP",
            Self::EauDeToilette => "EDT",
            Self::EauDeCologne => "EDC",
            Self::Oil => "Oil",
        }
    }
}

impl fmt::Display for FragranceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FragranceType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("fragrance type", s))
    }
}

/// Whether the product is shown in the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

impl ProductStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(UnknownVariant::new("product status", other)),
        }
    }
}

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub brand_name: String,
    pub description: Option<String>,
    pub category: Category,
    pub fragrance_type: FragranceType,
    pub notes: Option<String>,
    pub price: u64,
    pub discount_percentage: u8,
    pub sku: String,
    pub stock_quantity: u32,
    pub minimum_stock: u32,
    pub status: ProductStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Stock has fallen to or below the reorder threshold.
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.minimum_stock
    }
}

/// Tester Record
#[derive(Debug, Clone, PartialEq)]
pub struct TesterRecord {
    pub uuid: TesterUuid,
    pub product_uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub size: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product together with its tester variants.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub product: ProductRecord,
    pub testers: Vec<TesterRecord>,
}

/// Active product counts per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Collections {
    pub all: u64,
    pub mens: u64,
    pub womens: u64,
    pub unisex: u64,
    pub special_offer: u64,
}
