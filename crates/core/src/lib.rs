//! Aura
//!
//! Aura is the pricing core of the Aura storefront: checkout quotes, the single
//! base-to-display currency conversion and the simulated card gateway.

pub mod checkout;
pub mod currency;
pub mod payments;

pub use checkout::{CheckoutFees, PaymentMethod, PricedLine, Quote, QuoteError, quote};
pub use currency::{ConversionError, CurrencyConversion};
pub use payments::{CardInstrument, GatewayDecision, InstrumentError, SimulatedGateway};
