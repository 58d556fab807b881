//! Cache Keys
//!
//! Every read hook's key is built here so the invalidation policy and the
//! hooks cannot drift apart.

use leptos_query_cache::QueryKey;

use crate::api::EventFilter;

pub const EVENTS: &str = "eventos";
pub const EVENT: &str = "evento";
pub const REGISTRATION: &str = "inscripcion";
pub const REGISTRANTS: &str = "inscritos";
pub const GROUPS: &str = "grupos";
pub const GROUP: &str = "grupo";
pub const FOLLOW_STATUS: &str = "seguimiento";
pub const JOIN_REQUESTS: &str = "solicitudes";
pub const MEMBERS: &str = "miembros";
pub const ROLES: &str = "roles";
pub const USERS: &str = "usuarios";
pub const SESSION: &str = "sesion";
pub const NEWS_LIST: &str = "noticias";
pub const NEWS_ITEM: &str = "noticia";

pub fn events(filter: &EventFilter) -> QueryKey {
    QueryKey::new(EVENTS).with(filter.slug())
}

pub fn event(id: &u32) -> QueryKey {
    QueryKey::new(EVENT).with(id)
}

pub fn registration(event_id: &u32) -> QueryKey {
    QueryKey::new(REGISTRATION).with(event_id)
}

/// Plain registered/not-registered check, kept apart from the full details
pub fn registration_check(event_id: &u32) -> QueryKey {
    QueryKey::new(REGISTRATION).with(event_id).with("estado")
}

pub fn registrants(event_id: &u32) -> QueryKey {
    QueryKey::new(REGISTRANTS).with(event_id)
}

pub fn groups(_: &()) -> QueryKey {
    QueryKey::new(GROUPS)
}

pub fn group(id: &u32) -> QueryKey {
    QueryKey::new(GROUP).with(id)
}

pub fn follow_status(group_id: &u32) -> QueryKey {
    QueryKey::new(FOLLOW_STATUS).with(group_id)
}

pub fn join_requests(group_id: &u32) -> QueryKey {
    QueryKey::new(JOIN_REQUESTS).with(group_id)
}

pub fn members(group_id: &u32) -> QueryKey {
    QueryKey::new(MEMBERS).with(group_id)
}

pub fn roles(_: &()) -> QueryKey {
    QueryKey::new(ROLES)
}

pub fn users(_: &()) -> QueryKey {
    QueryKey::new(USERS)
}

pub fn session(_: &()) -> QueryKey {
    QueryKey::new(SESSION)
}

pub fn news_list(_: &()) -> QueryKey {
    QueryKey::new(NEWS_LIST)
}

pub fn news_item(id: &u32) -> QueryKey {
    QueryKey::new(NEWS_ITEM).with(id)
}
