use aura_app::domain::products::{
    ProductsService,
    data::{NewProduct, ProductDetailsData},
    records::{Category, FragranceType, ProductStatus, ProductUuid},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product display name
    #[arg(long)]
    name: String,

    /// Brand name
    #[arg(long)]
    brand: String,

    /// One of mens, womens, unisex, special_offer
    #[arg(long)]
    category: Category,

    /// One of EDP, EDT, EDC, Oil
    #[arg(long, default_value = "EDP")]
    fragrance_type: FragranceType,

    /// Price in base currency minor units (US cents)
    #[arg(long)]
    price: u64,

    #[arg(long, default_value_t = 0)]
    discount_percentage: u8,

    #[arg(long, default_value_t = 0)]
    stock: u32,

    #[arg(long)]
    minimum_stock: Option<u32>,

    #[arg(long)]
    description: Option<String>,

    /// Fragrance notes, free text
    #[arg(long)]
    notes: Option<String>,

    /// Create the product as inactive
    #[arg(long)]
    inactive: bool,
}

pub(crate) async fn run(
    service: &impl ProductsService,
    args: CreateProductArgs,
) -> Result<(), String> {
    let product = service
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            details: ProductDetailsData {
                name: args.name,
                brand_name: args.brand,
                description: args.description,
                category: args.category,
                fragrance_type: args.fragrance_type,
                notes: args.notes,
                price: args.price,
                discount_percentage: args.discount_percentage,
                stock_quantity: args.stock,
                minimum_stock: args.minimum_stock,
                status: if args.inactive {
                    ProductStatus::Inactive
                } else {
                    ProductStatus::Active
                },
            },
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("sku: {}", product.sku);

    Ok(())
}
