//! Cart Handlers

pub(crate) mod add;
pub(crate) mod get;
pub(crate) mod import;
pub(crate) mod remove;
pub(crate) mod update;
