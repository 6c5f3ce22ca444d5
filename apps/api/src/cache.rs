//! In-memory keyed cache owned by a service instance (no module-level globals).
//!
//! Writes are last-writer-wins. Locks are held only for the duration of a single
//! call and never across an `.await`.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;
use std::time::Duration;

use tokio::time::Instant;

/// Minimal cache interface. Implement this to back a service with something
/// other than process memory.
pub trait Cache<K, V>: Send + Sync {
    /// Returns a fresh entry, or `None` if missing or stale.
    fn get(&self, key: &K) -> Option<V>;
    fn set(&self, key: K, value: V);
    fn evict(&self, key: &K) -> Option<V>;
    /// All fresh values, in no particular order.
    fn values(&self) -> Vec<V>;
}

/// HashMap-backed cache with an optional freshness window.
///
/// Stale entries are treated as absent on read and dropped on the next write.
pub struct TtlCache<K, V> {
    ttl: Option<Duration>,
    entries: RwLock<HashMap<K, (Instant, V)>>,
}

impl<K, V> TtlCache<K, V> {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Entries never go stale.
    pub fn unbounded() -> Self {
        Self {
            ttl: None,
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn is_fresh(&self, inserted_at: Instant) -> bool {
        match self.ttl {
            Some(ttl) => inserted_at.elapsed() < ttl,
            None => true,
        }
    }
}

impl<K, V> Cache<K, V> for TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        entries
            .get(key)
            .filter(|(inserted_at, _)| self.is_fresh(*inserted_at))
            .map(|(_, value)| value.clone())
    }

    fn set(&self, key: K, value: V) {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        if self.ttl.is_some() {
            entries.retain(|_, (inserted_at, _)| self.is_fresh(*inserted_at));
        }
        entries.insert(key, (Instant::now(), value));
    }

    fn evict(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries.remove(key).map(|(_, value)| value)
    }

    fn values(&self) -> Vec<V> {
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        entries
            .values()
            .filter(|(inserted_at, _)| self.is_fresh(*inserted_at))
            .map(|(_, value)| value.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let cache: TtlCache<String, u32> = TtlCache::unbounded();
        cache.set("a".to_string(), 1);
        assert_eq!(cache.get(&"a".to_string()), Some(1));
        assert_eq!(cache.get(&"b".to_string()), None);
    }

    #[test]
    fn test_last_writer_wins() {
        let cache: TtlCache<&str, u32> = TtlCache::unbounded();
        cache.set("k", 1);
        cache.set("k", 2);
        assert_eq!(cache.get(&"k"), Some(2));
        assert_eq!(cache.values().len(), 1);
    }

    #[test]
    fn test_evict_returns_value() {
        let cache: TtlCache<&str, u32> = TtlCache::unbounded();
        cache.set("k", 9);
        assert_eq!(cache.evict(&"k"), Some(9));
        assert_eq!(cache.get(&"k"), None);
        assert_eq!(cache.evict(&"k"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let cache: TtlCache<&str, u32> = TtlCache::with_ttl(Duration::from_secs(3600));
        cache.set("k", 1);

        tokio::time::advance(Duration::from_secs(3599)).await;
        assert_eq!(cache.get(&"k"), Some(1));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get(&"k"), None);
        assert!(cache.values().is_empty());
    }
}
