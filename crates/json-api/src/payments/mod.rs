//! Payments

pub(crate) mod authorize;
pub(crate) mod errors;
