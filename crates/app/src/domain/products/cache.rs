//! Catalog cache keys and entries.

use smallvec::smallvec;

use crate::{
    cache::Tags,
    domain::products::records::{Category, Collections, ProductDetails, ProductRecord, ProductUuid},
};

/// Tag carried by every cached listing.
pub const PRODUCT_LIST_TAG: &str = "product-list";

/// Tag carried by every cached view of a single product.
#[must_use]
pub fn product_tag(product: ProductUuid) -> String {
    format!("product:{product}")
}

/// Every cacheable catalog read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKey {
    Products { category: Option<Category> },
    Product(ProductUuid),
    Collections,
}

impl CatalogKey {
    /// Tags the entry for this key is stored under.
    #[must_use]
    pub fn tags(&self) -> Tags {
        match self {
            Self::Products { .. } | Self::Collections => smallvec![PRODUCT_LIST_TAG.to_string()],
            Self::Product(product) => smallvec![product_tag(*product)],
        }
    }
}

/// A cached catalog read.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEntry {
    Products(Vec<ProductRecord>),
    Product(ProductDetails),
    Collections(Collections),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listings_share_the_list_tag() {
        assert_eq!(
            CatalogKey::Products { category: None }.tags().as_slice(),
            [PRODUCT_LIST_TAG.to_string()]
        );
        assert_eq!(
            CatalogKey::Products {
                category: Some(Category::Mens)
            }
            .tags(),
            CatalogKey::Collections.tags()
        );
    }

    #[test]
    fn product_views_are_tagged_by_uuid() {
        let product = ProductUuid::new();

        assert_eq!(
            CatalogKey::Product(product).tags().as_slice(),
            [format!("product:{product}")]
        );
    }
}
