//! State

use std::sync::Arc;

use aura::CurrencyConversion;
use aura_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Turns base-currency amounts into display strings for responses.
    pub(crate) conversion: CurrencyConversion,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, conversion: CurrencyConversion) -> Self {
        Self { app, conversion }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, conversion: CurrencyConversion) -> Arc<Self> {
        Arc::new(Self::new(app, conversion))
    }
}
