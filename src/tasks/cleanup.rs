//! TTL Cleanup Task
//!
//! Background sweep that actively removes expired in-memory store entries.
//! The store also expires lazily on access, so the sweep only bounds how
//! long dead entries occupy capacity.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::store::MemoryStore;

/// Spawns a task that sweeps expired entries every `interval_secs` seconds.
///
/// Returns the task's `JoinHandle`; abort it during shutdown. Timer-driven
/// eviction runs independently of request traffic and shares the store's
/// single serialization point, so it cannot race-corrupt the index.
pub fn spawn_cleanup_task(store: Arc<MemoryStore>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "starting TTL cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            match store.cleanup_expired() {
                Ok(0) => debug!("TTL cleanup: nothing expired"),
                Ok(removed) => info!(removed, "TTL cleanup: removed expired entries"),
                Err(err) => warn!(%err, "TTL cleanup pass failed"),
            }
        }
    })
}
