//! Order Handlers

pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod mine;
pub(crate) mod place;
pub(crate) mod statistics;
pub(crate) mod update;
