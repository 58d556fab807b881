//! Keyed Query Cache
//!
//! Disposable mirror of server data. Entries are never patched in place:
//! mutations invalidate keys and subscribed views refetch.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use leptos::prelude::*;
use tracing::{debug, warn};

use crate::key::{KeyPattern, QueryKey};

type Erased = Arc<dyn Any + Send + Sync>;

/// What a view renders for one key
#[derive(Clone, Debug, PartialEq)]
pub enum QueryState<T, E> {
    /// Required parameters are missing, nothing was requested
    Idle,
    /// First fetch in progress, no data yet
    Loading,
    /// Data available; `refreshing` while a background refetch runs
    Ready { data: T, refreshing: bool },
    /// Last fetch failed
    Failed(E),
}

impl<T, E> QueryState<T, E> {
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            QueryState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }
}

struct Entry {
    data: Option<Erased>,
    error: Option<Erased>,
    stale: bool,
    in_flight: bool,
    /// Bumped on every invalidation so late responses can be recognised
    generation: u64,
    trigger: ArcTrigger,
}

impl Entry {
    fn new() -> Self {
        Self {
            data: None,
            error: None,
            stale: true,
            in_flight: false,
            generation: 0,
            trigger: ArcTrigger::new(),
        }
    }
}

/// Proof that the holder owns the single in-flight request for a key
#[derive(Debug)]
pub struct FetchTicket {
    key: QueryKey,
    generation: u64,
}

/// Shared query cache, cheap to clone and provided via context
#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<QueryKey, Entry>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe the running reactive observer to changes of `key`
    pub fn track(&self, key: &QueryKey) {
        let trigger = self
            .lock()
            .entry(key.clone())
            .or_insert_with(Entry::new)
            .trigger
            .clone();
        trigger.track();
    }

    /// True when the key has no fresh data and no request is running for it
    pub fn needs_fetch(&self, key: &QueryKey) -> bool {
        match self.lock().get(key) {
            Some(entry) => entry.stale && !entry.in_flight,
            None => true,
        }
    }

    /// Claim the request for `key`.
    ///
    /// Returns `None` when another caller already has a request in flight for
    /// the same key; that caller's result will be shared through the cache.
    pub fn begin_fetch(&self, key: &QueryKey) -> Option<FetchTicket> {
        let (ticket, trigger) = {
            let mut entries = self.lock();
            let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
            if entry.in_flight {
                debug!(key = %key, "fetch already in flight, sharing result");
                return None;
            }
            entry.in_flight = true;
            let ticket = FetchTicket {
                key: key.clone(),
                generation: entry.generation,
            };
            (ticket, entry.trigger.clone())
        };
        debug!(key = %key, "fetch started");
        trigger.notify();
        Some(ticket)
    }

    /// Store the outcome of a fetch started with [`QueryCache::begin_fetch`]
    pub fn complete<T, E>(&self, ticket: FetchTicket, result: Result<T, E>)
    where
        T: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        let trigger = {
            let mut entries = self.lock();
            let entry = entries
                .entry(ticket.key.clone())
                .or_insert_with(Entry::new);
            entry.in_flight = false;
            match result {
                Ok(data) => {
                    entry.data = Some(Arc::new(data));
                    entry.error = None;
                }
                Err(error) => {
                    entry.error = Some(Arc::new(error));
                }
            }
            // invalidated while the request was running: the response may predate the change
            entry.stale = entry.generation != ticket.generation;
            entry.trigger.clone()
        };
        debug!(key = %ticket.key, "fetch completed");
        trigger.notify();
    }

    /// Mark every matching key stale and wake its subscribers.
    ///
    /// Returns how many cached keys matched.
    pub fn invalidate(&self, pattern: &KeyPattern) -> usize {
        let triggers: Vec<ArcTrigger> = {
            let mut entries = self.lock();
            entries
                .iter_mut()
                .filter(|(key, _)| pattern.matches(key))
                .map(|(_, entry)| {
                    entry.stale = true;
                    entry.generation += 1;
                    entry.trigger.clone()
                })
                .collect()
        };
        debug!(pattern = %pattern, count = triggers.len(), "invalidated");
        for trigger in &triggers {
            trigger.notify();
        }
        triggers.len()
    }

    pub fn invalidate_all(&self, patterns: &[KeyPattern]) -> usize {
        patterns.iter().map(|pattern| self.invalidate(pattern)).sum()
    }

    /// Current state of `key` as seen by a view
    pub fn state<T, E>(&self, key: &QueryKey) -> QueryState<T, E>
    where
        T: Clone + 'static,
        E: Clone + 'static,
    {
        let entries = self.lock();
        let Some(entry) = entries.get(key) else {
            return QueryState::Loading;
        };

        if !entry.in_flight {
            if let Some(error) = &entry.error {
                match error.downcast_ref::<E>() {
                    Some(error) => return QueryState::Failed(error.clone()),
                    None => warn!(key = %key, "cached error has unexpected type"),
                }
            }
        }

        match &entry.data {
            Some(data) => match data.downcast_ref::<T>() {
                Some(data) => QueryState::Ready {
                    data: data.clone(),
                    refreshing: entry.in_flight,
                },
                None => {
                    warn!(key = %key, "cached data has unexpected type");
                    QueryState::Loading
                }
            },
            None => QueryState::Loading,
        }
    }

    /// Cached data for `key`, if any
    pub fn data<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.lock()
            .get(key)
            .and_then(|entry| entry.data.as_ref())
            .and_then(|data| data.downcast_ref::<T>())
            .cloned()
    }

    /// Number of keys currently cached
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: u32) -> QueryKey {
        QueryKey::new("evento").with(id)
    }

    #[test]
    fn test_same_key_fetch_is_deduplicated() {
        let cache = QueryCache::new();
        let first = cache.begin_fetch(&key(1));
        assert!(first.is_some());
        assert!(cache.begin_fetch(&key(1)).is_none());
        assert!(!cache.needs_fetch(&key(1)));

        // distinct keys proceed independently
        assert!(cache.begin_fetch(&key(2)).is_some());
    }

    #[test]
    fn test_complete_stores_data() {
        let cache = QueryCache::new();
        let ticket = cache.begin_fetch(&key(1)).unwrap();
        assert_eq!(cache.state::<String, String>(&key(1)), QueryState::Loading);

        cache.complete::<String, String>(ticket, Ok("Campamento".to_string()));

        assert_eq!(
            cache.state::<String, String>(&key(1)),
            QueryState::Ready {
                data: "Campamento".to_string(),
                refreshing: false
            }
        );
        assert!(!cache.needs_fetch(&key(1)));
    }

    #[test]
    fn test_failure_is_exposed_not_retried() {
        let cache = QueryCache::new();
        let ticket = cache.begin_fetch(&key(1)).unwrap();
        cache.complete::<String, String>(ticket, Err("Evento no encontrado".to_string()));

        assert_eq!(
            cache.state::<String, String>(&key(1)),
            QueryState::Failed("Evento no encontrado".to_string())
        );
        assert!(!cache.needs_fetch(&key(1)));
    }

    #[test]
    fn test_invalidate_keeps_data_while_refreshing() {
        let cache = QueryCache::new();
        let ticket = cache.begin_fetch(&key(1)).unwrap();
        cache.complete::<u32, String>(ticket, Ok(10));

        assert_eq!(cache.invalidate(&KeyPattern::from(key(1))), 1);
        assert!(cache.needs_fetch(&key(1)));

        let _ticket = cache.begin_fetch(&key(1)).unwrap();
        assert_eq!(
            cache.state::<u32, String>(&key(1)),
            QueryState::Ready {
                data: 10,
                refreshing: true
            }
        );
    }

    #[test]
    fn test_invalidation_during_fetch_leaves_entry_stale() {
        let cache = QueryCache::new();
        let ticket = cache.begin_fetch(&key(1)).unwrap();
        cache.invalidate(&KeyPattern::from(key(1)));
        cache.complete::<u32, String>(ticket, Ok(3));

        assert_eq!(cache.data::<u32>(&key(1)), Some(3));
        assert!(cache.needs_fetch(&key(1)));
    }

    #[test]
    fn test_scope_invalidation_only_touches_scope() {
        let cache = QueryCache::new();
        for filter in ["vigentes", "cancelados"] {
            let ticket = cache.begin_fetch(&QueryKey::new("eventos").with(filter)).unwrap();
            cache.complete::<u32, String>(ticket, Ok(0));
        }
        let ticket = cache.begin_fetch(&QueryKey::new("grupos")).unwrap();
        cache.complete::<u32, String>(ticket, Ok(0));

        assert_eq!(cache.invalidate(&KeyPattern::Scope("eventos")), 2);
        assert!(!cache.needs_fetch(&QueryKey::new("grupos")));
    }

    #[test]
    fn test_retry_after_error_shows_loading() {
        let cache = QueryCache::new();
        let ticket = cache.begin_fetch(&key(1)).unwrap();
        cache.complete::<u32, String>(ticket, Err("sin conexión".to_string()));

        cache.invalidate(&KeyPattern::from(key(1)));
        let _ticket = cache.begin_fetch(&key(1)).unwrap();
        assert_eq!(cache.state::<u32, String>(&key(1)), QueryState::Loading);
    }
}
