//! Customers
//!
//! The customer ledger: lifetime spend and order count per user, maintained
//! by order placement.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::CustomersServiceError;
pub use service::*;
