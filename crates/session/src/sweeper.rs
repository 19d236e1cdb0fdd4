//! Idle-session eviction.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sparkle_core::session::SessionStore;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Remove every session idle for at least `idle_timeout`. Returns the number
/// evicted.
///
/// The session's own lock is taken before removal, so a sweep never races an
/// in-flight utterance: if a submit holds the lock, the sweep waits, and by
/// the time it looks the session's `last_activity` is fresh again.
pub async fn sweep_once(store: &Arc<dyn SessionStore>, idle_timeout: Duration) -> usize {
    let now = Utc::now();
    let mut evicted = 0;

    for id in store.ids().await {
        let Some(handle) = store.get(&id).await else {
            continue;
        };
        let session = handle.lock().await;
        if session.idle_secs(now) >= idle_timeout.as_secs() as i64 {
            store.remove(&id).await;
            info!(
                session_id = %id,
                idle_secs = session.idle_secs(now),
                "Idle session evicted"
            );
            evicted += 1;
        }
    }

    if evicted > 0 {
        let remaining = store.len().await;
        debug!(evicted, remaining, "Sweep complete");
    }
    evicted
}

/// Spawn the background sweep loop. The task runs until aborted.
pub fn spawn_sweeper(
    store: Arc<dyn SessionStore>,
    idle_timeout: Duration,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            sweep_once(&store, idle_timeout).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemorySessionStore;
    use chrono::Duration as ChronoDuration;
    use sparkle_core::profile::LearnerProfile;
    use sparkle_core::session::Session;

    fn session_idle_for(secs: i64) -> Session {
        let profile = LearnerProfile::new("child_123", "Emma", 6).unwrap();
        let tier = profile.tier();
        let mut session = Session::new(profile, tier, "mw_001".into());
        session.last_activity = Utc::now() - ChronoDuration::seconds(secs);
        session
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted_and_fresh_ones_kept() {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let stale = store.insert(session_idle_for(3600)).await;
        let fresh = store.insert(session_idle_for(0)).await;

        let evicted = sweep_once(&store, Duration::from_secs(1800)).await;
        assert_eq!(evicted, 1);
        assert!(store.get(&stale).await.is_none());
        assert!(store.get(&fresh).await.is_some());
    }

    #[tokio::test]
    async fn sweep_on_empty_store_is_a_noop() {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        assert_eq!(sweep_once(&store, Duration::from_secs(1)).await, 0);
    }

    #[tokio::test]
    async fn exact_timeout_boundary_evicts() {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let id = store.insert(session_idle_for(1800)).await;

        sweep_once(&store, Duration::from_secs(1800)).await;
        assert!(store.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn sweeper_task_runs_on_its_interval() {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        store.insert(session_idle_for(3600)).await;

        let handle = spawn_sweeper(
            store.clone(),
            Duration::from_secs(1800),
            Duration::from_millis(10),
        );

        // First tick fires immediately; give the task a moment to run it.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(store.is_empty().await);
        handle.abort();
    }
}
