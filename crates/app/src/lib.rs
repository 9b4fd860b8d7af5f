//! Shared application domain and persistence modules.

pub mod cache;
pub mod context;
pub mod database;
pub mod domain;
pub mod events;
pub mod identity;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
