//! Catalog Config

use std::time::Duration;

use clap::Args;

/// Catalog cache settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Seconds a cached catalog read stays fresh
    #[arg(long, env = "CATALOG_CACHE_TTL_SECONDS", default_value_t = 300)]
    pub cache_ttl_seconds: u64,
}

impl CatalogConfig {
    /// Cache lifetime as a `Duration`.
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}
