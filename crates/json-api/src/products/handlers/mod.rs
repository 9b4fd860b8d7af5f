//! Product Handlers

pub(crate) mod collections;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod testers;
pub(crate) mod update;
