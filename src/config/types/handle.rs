//! The loaded config, readable from the HTTP pool and the actor runtime
//! without locking.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::config::PlaypenConfig;

static CONFIG: LazyLock<ArcSwap<PlaypenConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(PlaypenConfig::default()));

/// Current config. Defaults until `init_config` runs.
#[inline]
pub fn cfg() -> Arc<PlaypenConfig> {
    CONFIG.load_full()
}

/// Publish the config loaded in `main`.
pub fn init_config(config: PlaypenConfig) -> Arc<PlaypenConfig> {
    let config = Arc::new(config);
    CONFIG.store(Arc::clone(&config));
    config
}
