//! Test Helpers

use aura::{CardInstrument, PaymentMethod};

use crate::domain::{
    carts::{data::NewCartLine, records::CartLineUuid},
    customers::data::Contact,
    orders::{
        data::{LineSelection, NewOrder},
        records::OrderUuid,
    },
    products::{
        data::ProductDetailsData,
        records::{Category, FragranceType, ProductStatus, ProductUuid},
    },
};

pub(crate) fn product_details(price: u64) -> ProductDetailsData {
    ProductDetailsData {
        name: "Oud Royale".to_string(),
        brand_name: "Maison Aura".to_string(),
        description: Some("Smoked oud over rose".to_string()),
        category: Category::Mens,
        fragrance_type: FragranceType::EauDeParfum,
        notes: Some("oud, rose, saffron".to_string()),
        price,
        discount_percentage: 0,
        stock_quantity: 25,
        minimum_stock: None,
        status: ProductStatus::Active,
    }
}

pub(crate) fn new_line(product: ProductUuid, unit_price: u64, quantity: u32) -> NewCartLine {
    NewCartLine {
        uuid: CartLineUuid::new(),
        product_uuid: product,
        tester_uuid: None,
        size: "100 ml".to_string(),
        quantity,
        unit_price,
    }
}

pub(crate) fn contact() -> Contact {
    Contact {
        name: "Ayesha Khan".to_string(),
        phone: "0300 1234567".to_string(),
        email: "ayesha@example.com".to_string(),
        city: "Lahore".to_string(),
        address: "12 Mall Road".to_string(),
        postal_code: "54000".to_string(),
    }
}

pub(crate) fn new_order(payment_method: PaymentMethod, selection: LineSelection) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        contact: contact(),
        payment_method,
        selection,
    }
}

pub(crate) fn card(number: &str) -> CardInstrument {
    CardInstrument {
        number: number.to_string(),
        expiry: "12/29".to_string(),
        cvv: "123".to_string(),
        holder: "Ayesha Khan".to_string(),
    }
}
