//! Aura Domain Concerns

pub mod carts;
pub mod customers;
pub mod orders;
pub mod payments;
pub mod products;

mod columns;

pub use columns::{OutOfRange, UnknownVariant};
