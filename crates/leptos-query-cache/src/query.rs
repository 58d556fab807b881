//! Query Hook
//!
//! Binds a cache key to a fetcher for the lifetime of a component.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::cache::{QueryCache, QueryState};
use crate::key::{KeyPattern, QueryKey};

/// Provide a fresh cache to all children
pub fn provide_query_cache() -> QueryCache {
    let cache = QueryCache::new();
    provide_context(cache.clone());
    cache
}

/// Get the cache from context
pub fn use_query_cache() -> QueryCache {
    expect_context::<QueryCache>()
}

/// Handle returned by [`use_query`]
pub struct Query<T: Send + Sync + 'static, E: Send + Sync + 'static> {
    state: Signal<QueryState<T, E>>,
    key: Memo<Option<QueryKey>>,
    cache: StoredValue<QueryCache>,
}

impl<T: Send + Sync + 'static, E: Send + Sync + 'static> Clone for Query<T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static, E: Send + Sync + 'static> Copy for Query<T, E> {}

impl<T, E> Query<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Tracked read of the current state
    pub fn state(&self) -> QueryState<T, E> {
        self.state.get()
    }

    pub fn signal(&self) -> Signal<QueryState<T, E>> {
        self.state
    }

    /// Data if ready, tracked
    pub fn data(&self) -> Option<T> {
        self.state.with(|state| state.data().cloned())
    }

    /// Re-issue the read for the current key
    pub fn refetch(&self) {
        if let Some(key) = self.key.get_untracked() {
            self.cache
                .with_value(|cache| cache.invalidate(&KeyPattern::Exact(key)));
        }
    }
}

/// Subscribe to the key of `params` and fetch it whenever it is missing or stale.
///
/// `params` returning `None` disables the query: no request is issued and the
/// state stays [`QueryState::Idle`]. Results are written to the cache, never
/// to component state, so a view that unmounts mid-request is left alone.
pub fn use_query<P, T, E, Fut>(
    params: impl Fn() -> Option<P> + Send + Sync + 'static,
    key_of: fn(&P) -> QueryKey,
    fetcher: impl Fn(P) -> Fut + 'static,
) -> Query<T, E>
where
    P: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    let cache = use_query_cache();
    let current = Memo::new(move |_| params());
    let key = Memo::new(move |_| current.with(|p| p.as_ref().map(key_of)));

    let effect_cache = cache.clone();
    Effect::new(move |_| {
        let (Some(key), Some(params)) = (key.get(), current.get()) else {
            return;
        };
        effect_cache.track(&key);
        if !effect_cache.needs_fetch(&key) {
            return;
        }
        if let Some(ticket) = effect_cache.begin_fetch(&key) {
            let cache = effect_cache.clone();
            let request = fetcher(params);
            spawn_local(async move {
                let result = request.await;
                cache.complete(ticket, result);
            });
        }
    });

    let state_cache = cache.clone();
    let state = Signal::derive(move || match key.get() {
        None => QueryState::Idle,
        Some(key) => {
            state_cache.track(&key);
            state_cache.state::<T, E>(&key)
        }
    });

    Query {
        state,
        key,
        cache: StoredValue::new(cache),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use any_spawner::Executor;
    use std::future::{ready, Ready};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn event_key(id: &u32) -> QueryKey {
        QueryKey::new("evento").with(id)
    }

    fn counting_fetcher(calls: Arc<AtomicUsize>) -> impl Fn(u32) -> Ready<Result<String, String>> {
        move |id| {
            calls.fetch_add(1, Ordering::SeqCst);
            ready(Ok(format!("evento {id}")))
        }
    }

    fn setup() -> (Owner, QueryCache) {
        let _ = Executor::init_futures_executor();
        let owner = Owner::new();
        owner.set();
        let cache = provide_query_cache();
        (owner, cache)
    }

    #[test]
    fn test_missing_params_issue_no_request() {
        let (_owner, cache) = setup();
        let calls = Arc::new(AtomicUsize::new(0));

        let query: Query<String, String> =
            use_query(|| None::<u32>, event_key, counting_fetcher(calls.clone()));
        Executor::poll_local();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(query.signal().get_untracked(), QueryState::Idle);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_present_params_fetch_once_and_share() {
        let (_owner, cache) = setup();
        let calls = Arc::new(AtomicUsize::new(0));

        let first: Query<String, String> =
            use_query(|| Some(4u32), event_key, counting_fetcher(calls.clone()));
        Executor::poll_local();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            first.signal().get_untracked(),
            QueryState::Ready {
                data: "evento 4".to_string(),
                refreshing: false
            }
        );

        // a second view of the same key reads the cached result
        let second: Query<String, String> =
            use_query(|| Some(4u32), event_key, counting_fetcher(calls.clone()));
        Executor::poll_local();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(second.signal().get_untracked().data().is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_refetch_reissues_request() {
        let (_owner, _cache) = setup();
        let calls = Arc::new(AtomicUsize::new(0));

        let query: Query<String, String> =
            use_query(|| Some(7u32), event_key, counting_fetcher(calls.clone()));
        Executor::poll_local();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        query.refetch();
        Executor::poll_local();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!query.signal().get_untracked().is_loading());
    }
}
