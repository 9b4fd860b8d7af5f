//! Identity middleware.
//!
//! The storefront sits behind a gateway that authenticates users and forwards
//! who they are in `x-user-uuid` and `x-user-role`. Anything else is a 401.

use aura_app::identity::{Identity, Role, UserUuid};
use salvo::prelude::*;
use tracing::Span;

use crate::extensions::*;

pub(crate) const USER_UUID_HEADER: &str = "x-user-uuid";
pub(crate) const USER_ROLE_HEADER: &str = "x-user-role";

#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(identity) = identity_from_headers(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid identity headers"));
        ctrl.skip_rest();

        return;
    };

    Span::current().record("user", tracing::field::display(identity.user));

    depot.insert_identity(identity);

    ctrl.call_next(req, depot, res).await;
}

/// Rejects non-admin callers. Must run after [`handler`].
#[handler]
pub(crate) async fn require_admin(depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    if let Err(status) = depot.admin_or_403() {
        res.render(status);
        ctrl.skip_rest();
    }
}

fn identity_from_headers(req: &Request) -> Option<Identity> {
    let user = req
        .header::<String>(USER_UUID_HEADER)?
        .trim()
        .parse::<UserUuid>()
        .ok()?;

    let role = req
        .header::<String>(USER_ROLE_HEADER)?
        .trim()
        .parse::<Role>()
        .ok()?;

    Some(Identity::new(user, role))
}
