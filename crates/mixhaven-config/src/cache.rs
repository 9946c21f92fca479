//! Live configuration shared by commands and gateway handlers.

use crate::schema::Config;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Holds the active [`Config`]. Readers take a snapshot without locking.
pub struct ConfigCache {
    current: ArcSwap<Config>,
}

impl ConfigCache {
    /// Wraps a configuration that has already been validated.
    pub fn new(config: Config) -> Self {
        Self {
            current: ArcSwap::new(Arc::new(config)),
        }
    }

    /// Snapshot of the active configuration.
    pub fn get(&self) -> Arc<Config> {
        self.current.load_full()
    }
}
