//! App Router

use salvo::Router;

use crate::{carts, customers, identity, orders, payments, products};

/// Every route that needs a caller identity.
///
/// Admin-only routes sit behind [`identity::require_admin`].
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(identity::handler)
        .push(storefront_router())
        .push(admin_router())
}

fn storefront_router() -> Router {
    Router::new()
        .push(Router::with_path("collections").get(products::collections::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .push(Router::with_path("import").post(carts::import::handler))
                .push(
                    Router::with_path("lines")
                        .post(carts::add::handler)
                        .push(
                            Router::with_path("{line}")
                                .put(carts::update::handler)
                                .delete(carts::remove::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("orders")
                .post(orders::place::handler)
                .push(Router::with_path("mine").get(orders::mine::handler))
                .push(
                    Router::with_path("{order}/payments").post(payments::authorize::handler),
                ),
        )
        .push(Router::with_path("customers/me").get(customers::me::handler))
}

fn admin_router() -> Router {
    Router::new()
        .hoop(identity::require_admin)
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler)
                        .push(Router::with_path("testers").post(products::testers::handler)),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(Router::with_path("statistics").get(orders::statistics::handler))
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .patch(orders::update::handler)
                        .delete(orders::delete::handler),
                ),
        )
        .push(Router::with_path("customers").get(customers::index::handler))
}
