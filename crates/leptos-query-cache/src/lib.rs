//! Leptos Query Cache
//!
//! Keyed, de-duplicated reads with invalidate-and-refetch semantics,
//! plus a mutation hook that refuses overlapping dispatches.

mod cache;
mod key;
mod mutation;
mod query;

pub use cache::{FetchTicket, QueryCache, QueryState};
pub use key::{KeyPattern, QueryKey};
pub use mutation::{use_mutation, Mutation, MutationGate};
pub use query::{provide_query_cache, use_query, use_query_cache, Query};
