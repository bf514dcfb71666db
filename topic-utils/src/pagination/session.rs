//! Per-user pagination session storage.

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use tokio::{sync::RwLock, time::Instant};

/// Fallback lifetime when `now + ttl` is not representable.
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

/// Storage for transient per-user pagination state.
///
/// Writes for the same user are last-writer-wins.
#[async_trait]
pub trait SessionStore<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    /// Store `state` for `user_id`, replacing any previous session.
    async fn set(&self, user_id: u64, state: S);

    /// Return the last live state stored for `user_id`.
    async fn get(&self, user_id: u64) -> Option<S>;

    /// Drop the session for `user_id`, if any.
    async fn remove(&self, user_id: u64);

    /// Evict every expired session and return how many were removed.
    async fn prune_expired(&self) -> usize;
}

struct SessionEntry<S> {
    state: S,
    expires_at: Instant,
}

/// In-process session store with an idle time-to-live.
///
/// Every `set` refreshes the entry's deadline. Expired entries are invisible
/// to `get` and are removed by `prune_expired`.
pub struct MemorySessionStore<S> {
    ttl: Duration,
    entries: RwLock<HashMap<u64, SessionEntry<S>>>,
}

impl<S> MemorySessionStore<S> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Deadline for an entry written now. Saturates for TTLs past the clock's range.
    fn deadline(&self) -> Instant {
        let now = Instant::now();
        now.checked_add(self.ttl).unwrap_or_else(|| now + FAR_FUTURE)
    }

    /// Number of stored entries, including ones that expired but were not pruned yet.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl<S> SessionStore<S> for MemorySessionStore<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn set(&self, user_id: u64, state: S) {
        let entry = SessionEntry {
            state,
            expires_at: self.deadline(),
        };

        self.entries.write().await.insert(user_id, entry);
    }

    async fn get(&self, user_id: u64) -> Option<S> {
        let entries = self.entries.read().await;
        entries
            .get(&user_id)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.state.clone())
    }

    async fn remove(&self, user_id: u64) {
        self.entries.write().await.remove(&user_id);
    }

    async fn prune_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(120);

    #[tokio::test]
    async fn get_returns_last_state_set() {
        let store = MemorySessionStore::<u32>::new(TTL);
        assert_eq!(store.get(7).await, None);

        store.set(7, 1).await;
        store.set(7, 2).await;
        store.set(8, 9).await;

        assert_eq!(store.get(7).await, Some(2));
        assert_eq!(store.get(8).await, Some(9));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn remove_drops_only_that_user() {
        let store = MemorySessionStore::<&str>::new(TTL);
        store.set(1, "a").await;
        store.set(2, "b").await;

        store.remove(1).await;

        assert_eq!(store.get(1).await, None);
        assert_eq!(store.get(2).await, Some("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn sessions_expire_after_ttl() {
        let store = MemorySessionStore::<u8>::new(TTL);
        assert_eq!(store.ttl(), TTL);
        store.set(1, 10).await;

        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        assert_eq!(store.get(1).await, Some(10));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(store.get(1).await, None);
        assert_eq!(store.len().await, 1);

        assert_eq!(store.prune_expired().await, 1);
        assert!(store.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn set_refreshes_deadline() {
        let store = MemorySessionStore::<u8>::new(TTL);
        store.set(1, 1).await;
        store.set(2, 2).await;

        tokio::time::advance(Duration::from_secs(100)).await;
        store.set(1, 3).await;

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(store.prune_expired().await, 1);
        assert_eq!(store.get(1).await, Some(3));
        assert_eq!(store.get(2).await, None);
    }

    #[tokio::test]
    async fn oversized_ttl_does_not_overflow() {
        let store = MemorySessionStore::<u8>::new(Duration::MAX);
        store.set(1, 1).await;

        assert_eq!(store.get(1).await, Some(1));
        assert_eq!(store.prune_expired().await, 0);
    }
}
