//! The periodic expiry sweep.
//!
//! A detached task, fully decoupled from request handling: it wakes on
//! a fixed interval, takes the same store lock every request handler
//! takes, deletes what's past its TTL, and releases. Because each sweep
//! takes the lock exactly once and never awaits while holding it, it
//! cannot deadlock with in-flight handlers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use walletgate_session::{SessionConfig, SessionStore};

/// Spawns the sweep task. Runs until the handle is aborted (or the
/// runtime shuts down).
pub fn spawn_sweeper(
    store: Arc<Mutex<SessionStore>>,
    config: SessionConfig,
) -> JoinHandle<()> {
    let ttl = Duration::from_secs(config.ttl_secs);
    // `tokio::time::interval` panics on a zero period; clamp rather
    // than crash on a zeroed config.
    let period = Duration::from_secs(config.sweep_interval_secs.max(1));

    tokio::spawn(async move {
        tracing::debug!(
            ttl_secs = ttl.as_secs(),
            period_secs = period.as_secs(),
            "expiry sweeper started"
        );

        let mut interval = tokio::time::interval(period);
        // The first tick of an interval fires immediately; a sweep at
        // startup is pointless (the store is empty), so consume it.
        interval.tick().await;

        loop {
            interval.tick().await;
            let removed = store.lock().await.sweep_expired(ttl);
            if !removed.is_empty() {
                tracing::debug!(removed = removed.len(), "expiry sweep");
            }
        }
    })
}

// =========================================================================
// Tests
// =========================================================================
