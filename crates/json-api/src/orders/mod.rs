//! Orders

pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod models;

pub(crate) use handlers::{delete, get, index, mine, place, statistics, update};
