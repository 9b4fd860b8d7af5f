//! Test context for service-level integration tests.

use std::{sync::Arc, time::Duration};

use aura::{CheckoutFees, CurrencyConversion, SimulatedGateway};
use rust_decimal::Decimal;

use crate::{
    database::Db,
    domain::{
        carts::PgCartsService,
        customers::PgCustomersService,
        orders::PgOrdersService,
        payments::PgPaymentsService,
        products::{
            PgProductsService, ProductsService, ProductsServiceError,
            data::{NewProduct, NewTester},
            records::{ProductRecord, ProductUuid, TesterRecord, TesterUuid},
        },
    },
    events::TracingEventPublisher,
};

use super::{db::TestDb, helpers::product_details};

pub(crate) struct TestContext {
    pub db: TestDb,
    pub fees: CheckoutFees,
    pub products: PgProductsService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
    pub customers: PgCustomersService,
    pub payments: PgPaymentsService,
}

impl TestContext {
    /// A fresh database with every service wired against it.
    ///
    /// Fees are the storefront defaults (500 and 250 PKR at 280 PKR/USD) and
    /// the payment gateway runs in test mode.
    pub async fn new() -> Self {
        let db = TestDb::new().await;
        let app_db = Db::new(db.pool().clone());

        let conversion =
            CurrencyConversion::new(Decimal::from(280)).expect("valid exchange rate");
        let fees = CheckoutFees::from_display(Decimal::from(500), Decimal::from(250), &conversion)
            .expect("valid fees");

        let events = Arc::new(TracingEventPublisher);

        Self {
            products: PgProductsService::new(app_db.clone(), Duration::from_secs(300)),
            carts: PgCartsService::new(app_db.clone()),
            orders: PgOrdersService::new(app_db.clone(), fees, events.clone()),
            customers: PgCustomersService::new(app_db.clone()),
            payments: PgPaymentsService::new(app_db, SimulatedGateway::new(true), events),
            fees,
            db,
        }
    }

    /// A `Db` handle for building services with non-default collaborators.
    pub fn app_db(&self) -> Db {
        Db::new(self.db.pool().clone())
    }

    /// Create an active product at `price` cents.
    pub async fn create_product(&self, price: u64) -> Result<ProductRecord, ProductsServiceError> {
        self.products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                details: product_details(price),
            })
            .await
    }

    /// Attach a default-sized tester to `product`.
    pub async fn create_tester(
        &self,
        product: ProductUuid,
        price: u64,
    ) -> Result<TesterRecord, ProductsServiceError> {
        self.products
            .add_tester(
                product,
                NewTester {
                    uuid: TesterUuid::new(),
                    name: "Discovery vial".to_string(),
                    price,
                    size: None,
                },
            )
            .await
    }
}
