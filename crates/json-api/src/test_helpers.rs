//! Test helpers.

use std::sync::Arc;

use aura::{CurrencyConversion, PaymentMethod};
use aura_app::{
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartLineRecord, CartLineUuid},
        },
        customers::{MockCustomersService, data::Contact},
        orders::{
            MockOrdersService,
            records::{OrderItem, OrderRecord, OrderStatus, OrderUuid, PaymentStatus},
        },
        payments::MockPaymentsService,
        products::{
            MockProductsService,
            records::{Category, FragranceType, ProductRecord, ProductStatus, ProductUuid},
        },
    },
    identity::UserUuid,
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*, test::RequestBuilder};
use uuid::Uuid;

use crate::{
    identity::{self, USER_ROLE_HEADER, USER_UUID_HEADER},
    state::State,
};

pub(crate) const CUSTOMER: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));
pub(crate) const ADMIN: UserUuid = UserUuid::from_uuid(Uuid::from_u128(2));

/// One mock per service. Unconfigured mocks panic on any call.
#[derive(Default)]
pub(crate) struct Mocks {
    pub products: MockProductsService,
    pub carts: MockCartsService,
    pub orders: MockOrdersService,
    pub payments: MockPaymentsService,
    pub customers: MockCustomersService,
}

impl Mocks {
    #[expect(clippy::expect_used, reason = "the fixed test rate is positive")]
    pub(crate) fn into_state(self) -> Arc<State> {
        let conversion =
            CurrencyConversion::new(Decimal::from(280)).expect("valid exchange rate");

        State::shared(
            AppContext {
                products: Arc::new(self.products),
                carts: Arc::new(self.carts),
                orders: Arc::new(self.orders),
                payments: Arc::new(self.payments),
                customers: Arc::new(self.customers),
            },
            conversion,
        )
    }

    /// Serve `route` behind the identity middleware.
    pub(crate) fn into_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(identity::handler)
                .push(route),
        )
    }
}

/// Attach gateway identity headers to a test request.
pub(crate) trait AsCaller {
    fn as_customer(self) -> Self;

    fn as_admin(self) -> Self;
}

impl AsCaller for RequestBuilder {
    fn as_customer(self) -> Self {
        self.add_header(USER_UUID_HEADER, CUSTOMER.to_string(), true)
            .add_header(USER_ROLE_HEADER, "customer", true)
    }

    fn as_admin(self) -> Self {
        self.add_header(USER_UUID_HEADER, ADMIN.to_string(), true)
            .add_header(USER_ROLE_HEADER, "admin", true)
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Oud Royale".to_string(),
        brand_name: "Maison Aura".to_string(),
        description: None,
        category: Category::Mens,
        fragrance_type: FragranceType::EauDeParfum,
        notes: None,
        price: 100_00,
        discount_percentage: 0,
        sku: "SKU-AB12CD34".to_string(),
        stock_quantity: 25,
        minimum_stock: 10,
        status: ProductStatus::Active,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_line(uuid: CartLineUuid) -> CartLineRecord {
    CartLineRecord {
        uuid,
        owner_uuid: CUSTOMER,
        product_uuid: ProductUuid::from_uuid(Uuid::from_u128(10)),
        product_name: "Oud Royale".to_string(),
        tester_uuid: None,
        tester_name: None,
        size: "100 ml".to_string(),
        quantity: 2,
        unit_price: 100_00,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
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

pub(crate) fn make_order(uuid: OrderUuid) -> OrderRecord {
    let line = make_line(CartLineUuid::from_uuid(Uuid::from_u128(20)));

    OrderRecord {
        uuid,
        owner_uuid: CUSTOMER,
        contact: contact(),
        subtotal: 200_00,
        shipping_fee: 1_79,
        cod_surcharge: 0,
        total: 201_79,
        payment_method: PaymentMethod::BankTransfer,
        payment_status: PaymentStatus::Pending,
        order_status: OrderStatus::Pending,
        items: vec![OrderItem::from(&line)],
        transaction_reference: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
