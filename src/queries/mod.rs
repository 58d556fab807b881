//! Query Hooks
//!
//! One hook per read operation. Hooks keyed by an id stay disabled until the
//! id is present and non-zero.

pub mod keys;

use leptos::prelude::*;
use leptos_query_cache::{use_query, Query};

use crate::api::{Api, EventFilter};
use crate::context::use_api;
use crate::error::ApiError;
use crate::models::{
    Event, FollowStatus, Group, JoinRequest, Member, News, RegistrationStatus, Role, Session,
};

pub type ApiQuery<T> = Query<T, ApiError>;

/// Treat a missing or zero id as "not ready"
pub fn present(id: Option<u32>) -> Option<u32> {
    id.filter(|id| *id != 0)
}

/// Hook keyed by a single id
fn use_by_id<T, Fut>(
    id: impl Fn() -> Option<u32> + Send + Sync + 'static,
    key_of: fn(&u32) -> leptos_query_cache::QueryKey,
    fetch: impl Fn(Api, u32) -> Fut + 'static,
) -> ApiQuery<T>
where
    T: Clone + Send + Sync + 'static,
    Fut: std::future::Future<Output = Result<T, ApiError>> + 'static,
{
    let api = use_api();
    use_query(move || present(id()), key_of, move |id| fetch(api.clone(), id))
}

// ========================
// Events
// ========================

pub fn use_events(
    filter: impl Fn() -> EventFilter + Send + Sync + 'static,
) -> ApiQuery<Vec<Event>> {
    let api = use_api();
    use_query(
        move || Some(filter()),
        keys::events,
        move |filter| {
            let api = api.clone();
            async move { api.list_events(filter).await }
        },
    )
}

pub fn use_event(id: impl Fn() -> Option<u32> + Send + Sync + 'static) -> ApiQuery<Event> {
    use_by_id(id, keys::event, |api, id| async move { api.get_event(id).await })
}

/// Registration of the current user, waitlist position included
pub fn use_registration(
    event_id: impl Fn() -> Option<u32> + Send + Sync + 'static,
) -> ApiQuery<RegistrationStatus> {
    use_by_id(event_id, keys::registration, |api, id| async move {
        api.registration_details(id).await
    })
}

/// Registered or not, without the waitlist details; enough for list cards
pub fn use_registration_check(
    event_id: impl Fn() -> Option<u32> + Send + Sync + 'static,
) -> ApiQuery<RegistrationStatus> {
    use_by_id(event_id, keys::registration_check, |api, id| async move {
        api.check_registration(id).await
    })
}

pub fn use_registrants(
    event_id: impl Fn() -> Option<u32> + Send + Sync + 'static,
) -> ApiQuery<Vec<Member>> {
    use_by_id(event_id, keys::registrants, |api, id| async move {
        api.list_registrants(id).await
    })
}

// ========================
// Groups
// ========================

pub fn use_groups() -> ApiQuery<Vec<Group>> {
    let api = use_api();
    use_query(
        || Some(()),
        keys::groups,
        move |_| {
            let api = api.clone();
            async move { api.list_groups().await }
        },
    )
}

pub fn use_group(id: impl Fn() -> Option<u32> + Send + Sync + 'static) -> ApiQuery<Group> {
    use_by_id(id, keys::group, |api, id| async move { api.get_group(id).await })
}

pub fn use_follow_status(
    group_id: impl Fn() -> Option<u32> + Send + Sync + 'static,
) -> ApiQuery<Option<FollowStatus>> {
    use_by_id(group_id, keys::follow_status, |api, id| async move {
        api.follow_status(id).await
    })
}

pub fn use_join_requests(
    group_id: impl Fn() -> Option<u32> + Send + Sync + 'static,
) -> ApiQuery<Vec<JoinRequest>> {
    use_by_id(group_id, keys::join_requests, |api, id| async move {
        api.list_join_requests(id).await
    })
}

pub fn use_members(
    group_id: impl Fn() -> Option<u32> + Send + Sync + 'static,
) -> ApiQuery<Vec<Member>> {
    use_by_id(group_id, keys::members, |api, id| async move {
        api.list_members(id).await
    })
}

// ========================
// Roles & users
// ========================

pub fn use_roles() -> ApiQuery<Vec<Role>> {
    let api = use_api();
    use_query(
        || Some(()),
        keys::roles,
        move |_| {
            let api = api.clone();
            async move { api.list_roles().await }
        },
    )
}

pub fn use_users() -> ApiQuery<Vec<Member>> {
    let api = use_api();
    use_query(
        || Some(()),
        keys::users,
        move |_| {
            let api = api.clone();
            async move { api.list_users().await }
        },
    )
}

/// The single source of the logged-in user; read it through `AppContext`
pub fn use_session() -> ApiQuery<Option<Session>> {
    let api = use_api();
    use_query(
        || Some(()),
        keys::session,
        move |_| {
            let api = api.clone();
            async move { api.current_session().await }
        },
    )
}

// ========================
// News
// ========================

pub fn use_news() -> ApiQuery<Vec<News>> {
    let api = use_api();
    use_query(
        || Some(()),
        keys::news_list,
        move |_| {
            let api = api.clone();
            async move { api.list_news().await }
        },
    )
}

pub fn use_news_item(id: impl Fn() -> Option<u32> + Send + Sync + 'static) -> ApiQuery<News> {
    use_by_id(id, keys::news_item, |api, id| async move { api.get_news(id).await })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_zero_id_disables() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some(0)), None);
        assert_eq!(present(Some(4)), Some(4));
    }

    #[test]
    fn test_keys_discriminate_by_id() {
        assert_eq!(keys::event(&3).to_string(), "evento/3");
        assert_ne!(keys::members(&3), keys::members(&4));
        assert_ne!(keys::members(&3), keys::join_requests(&3));
        assert_ne!(keys::registration(&3), keys::registration_check(&3));
        assert_eq!(keys::registration_check(&3).scope(), keys::REGISTRATION);
        assert_eq!(keys::events(&EventFilter::Past).to_string(), "eventos/transcurridos");
    }
}
