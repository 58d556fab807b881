//! Query View Component
//!
//! Renders exactly one of loading / error / empty / populated for a query.

use leptos::prelude::*;
use leptos_query_cache::QueryState;

use crate::error::ApiError;
use crate::queries::ApiQuery;

/// Which view a query state maps to
#[derive(Debug, Clone, PartialEq)]
enum Branch<T> {
    /// Disabled query, nothing was requested
    Idle,
    Loading,
    Failed(ApiError),
    Empty,
    Ready { data: T, refreshing: bool },
}

fn branch<T>(state: QueryState<T, ApiError>, is_empty: Option<fn(&T) -> bool>) -> Branch<T> {
    match state {
        QueryState::Idle => Branch::Idle,
        QueryState::Loading => Branch::Loading,
        QueryState::Failed(err) => Branch::Failed(err),
        QueryState::Ready { data, .. } if is_empty.is_some_and(|empty| empty(&data)) => {
            Branch::Empty
        }
        QueryState::Ready { data, refreshing } => Branch::Ready { data, refreshing },
    }
}

/// Four-way view over a query.
///
/// The error branch shows the transport message and a retry button that
/// refetches the same key. Data stays on screen while a refetch runs.
#[component]
pub fn QueryView<T, F, V>(
    query: ApiQuery<T>,
    /// View of the ready data
    render: F,
    /// Data that should show `empty_text` instead of `render`
    #[prop(optional)]
    is_empty: Option<fn(&T) -> bool>,
    #[prop(default = "No hay nada para mostrar")] empty_text: &'static str,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> V + Send + Sync + 'static,
    V: IntoView + 'static,
{
    move || match branch(query.state(), is_empty) {
        Branch::Idle => ().into_any(),
        Branch::Loading => view! { <p class="query-loading">"Cargando..."</p> }.into_any(),
        Branch::Failed(err) => view! {
            <div class="query-error">
                <p>{err.message()}</p>
                <button on:click=move |_| query.refetch()>"Reintentar"</button>
            </div>
        }
        .into_any(),
        Branch::Empty => view! { <EmptyState text=empty_text /> }.into_any(),
        Branch::Ready { data, refreshing } => view! {
            <div class="query-ready" class:refreshing=refreshing>
                {render(data)}
            </div>
        }
        .into_any(),
    }
}

/// Placeholder for a list with nothing to show
#[component]
pub fn EmptyState(text: &'static str) -> impl IntoView {
    view! { <p class="query-empty">{text}</p> }
}

/// `is_empty` for list queries
#[allow(clippy::ptr_arg)]
pub fn no_items<T>(items: &Vec<T>) -> bool {
    items.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(items: Vec<u32>) -> QueryState<Vec<u32>, ApiError> {
        QueryState::Ready { data: items, refreshing: false }
    }

    #[test]
    fn test_disabled_query_is_not_loading() {
        assert_eq!(branch::<Vec<u32>>(QueryState::Idle, Some(no_items)), Branch::Idle);
        assert_eq!(branch::<Vec<u32>>(QueryState::Loading, Some(no_items)), Branch::Loading);
    }

    #[test]
    fn test_failure_keeps_error() {
        let err = ApiError::Http { status: 404, message: "Evento no encontrado".to_string() };
        assert_eq!(
            branch::<Vec<u32>>(QueryState::Failed(err.clone()), Some(no_items)),
            Branch::Failed(err)
        );
    }

    #[test]
    fn test_empty_only_when_asked() {
        assert_eq!(branch(ready(Vec::new()), Some(no_items)), Branch::Empty);
        assert_eq!(
            branch(ready(Vec::new()), None),
            Branch::Ready { data: Vec::new(), refreshing: false }
        );
    }

    #[test]
    fn test_refreshing_data_stays_ready() {
        let state = QueryState::Ready { data: vec![3], refreshing: true };
        assert_eq!(
            branch(state, Some(no_items)),
            Branch::Ready { data: vec![3], refreshing: true }
        );
    }
}
