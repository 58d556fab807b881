//! Mutation Policy
//!
//! Which cached reads each write makes stale, and what the user is told
//! when it settles. The map below is maintained by hand: a write that
//! forgets a key leaves that view stale until its next refetch.

use std::future::Future;

use leptos_query_cache::{use_mutation, use_query_cache, KeyPattern, Mutation};
use tracing::{debug, warn};

use crate::context::use_api;
use crate::error::{ApiError, CompositeError};
use crate::models::{Decision, News, NewsForm};
use crate::queries::keys;
use crate::store::use_notifier;

/// A write operation and the ids it touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    CreateEvent,
    EditEvent(u32),
    CancelEvent(u32),
    DeleteEvent(u32),
    RegisterForEvent(u32),
    UnregisterFromEvent(u32),
    CreateGroup,
    EditGroup(u32),
    FollowGroup(u32),
    ResolveJoinRequest { group_id: u32, decision: Decision },
    AssignRole { group_id: Option<u32> },
    Login,
    Logout,
    RegisterAccount,
    CreateNews,
    EditNews(u32),
    PinNews(u32),
    UnpinNews(u32),
    DeleteNews(u32),
    CreatePinnedNews,
}

impl Change {
    /// Pin toggle for a news item, named by the state it ends in
    pub fn set_pinned(id: u32, pinned: bool) -> Self {
        if pinned {
            Change::PinNews(id)
        } else {
            Change::UnpinNews(id)
        }
    }

    /// Keys to mark stale once the write succeeds
    pub fn invalidations(&self) -> Vec<KeyPattern> {
        use KeyPattern::{Exact, Scope};

        match *self {
            Change::CreateEvent => vec![Scope(keys::EVENTS)],
            Change::EditEvent(id) | Change::CancelEvent(id) | Change::DeleteEvent(id) => {
                vec![Scope(keys::EVENTS), Exact(keys::event(&id))]
            }
            Change::RegisterForEvent(id) | Change::UnregisterFromEvent(id) => vec![
                Scope(keys::EVENTS),
                Exact(keys::event(&id)),
                Exact(keys::registration(&id)),
                Exact(keys::registration_check(&id)),
                Exact(keys::registrants(&id)),
            ],
            Change::CreateGroup => vec![Exact(keys::groups(&()))],
            Change::EditGroup(id) => vec![Exact(keys::groups(&())), Exact(keys::group(&id))],
            Change::FollowGroup(id) => {
                vec![Exact(keys::follow_status(&id)), Exact(keys::join_requests(&id))]
            }
            Change::ResolveJoinRequest { group_id, .. } => {
                vec![Exact(keys::join_requests(&group_id)), Exact(keys::members(&group_id))]
            }
            Change::AssignRole { group_id } => {
                let mut patterns = vec![Exact(keys::users(&()))];
                if let Some(group_id) = group_id {
                    patterns.push(Exact(keys::members(&group_id)));
                }
                patterns
            }
            Change::Login | Change::Logout => vec![
                Exact(keys::session(&())),
                Scope(keys::REGISTRATION),
                Scope(keys::FOLLOW_STATUS),
            ],
            Change::RegisterAccount => Vec::new(),
            Change::CreateNews | Change::CreatePinnedNews => vec![Exact(keys::news_list(&()))],
            Change::EditNews(id)
            | Change::PinNews(id)
            | Change::UnpinNews(id)
            | Change::DeleteNews(id) => {
                vec![Exact(keys::news_list(&())), Exact(keys::news_item(&id))]
            }
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Change::CreateEvent => "Evento creado",
            Change::EditEvent(_) => "Evento actualizado",
            Change::CancelEvent(_) => "Evento cancelado",
            Change::DeleteEvent(_) => "Evento eliminado",
            Change::RegisterForEvent(_) => "Inscripción realizada",
            Change::UnregisterFromEvent(_) => "Te diste de baja del evento",
            Change::CreateGroup => "Grupo creado",
            Change::EditGroup(_) => "Grupo actualizado",
            Change::FollowGroup(_) => "Solicitud enviada",
            Change::ResolveJoinRequest { decision: Decision::Approve, .. } => "Solicitud aprobada",
            Change::ResolveJoinRequest { decision: Decision::Reject, .. } => "Solicitud rechazada",
            Change::AssignRole { .. } => "Rol asignado",
            Change::Login => "Sesión iniciada",
            Change::Logout => "Sesión cerrada",
            Change::RegisterAccount => "Cuenta creada, ya podés iniciar sesión",
            Change::CreateNews => "Noticia publicada",
            Change::EditNews(_) => "Noticia actualizada",
            Change::PinNews(_) => "Noticia fijada",
            Change::UnpinNews(_) => "Noticia desfijada",
            Change::DeleteNews(_) => "Noticia eliminada",
            Change::CreatePinnedNews => "Noticia publicada y fijada",
        }
    }
}

/// Mutation that invalidates per [`Change::invalidations`] on success and
/// shows a toast either way.
///
/// `change_of` names the write for a given input so ids can come from it;
/// `on_success` runs after invalidation (e.g. to navigate away).
pub fn use_mutation_with_policy<I, O, F, Fut>(
    change_of: impl Fn(&I) -> Change + 'static,
    mutate: F,
    on_success: impl Fn(O) + 'static,
) -> Mutation<I>
where
    I: Clone + 'static,
    O: 'static,
    F: Fn(crate::api::Api, I) -> Fut + 'static,
    Fut: Future<Output = Result<O, ApiError>> + 'static,
{
    let api = use_api();
    let cache = use_query_cache();
    let notifier = use_notifier();

    use_mutation(
        move |input: I| mutate(api.clone(), input),
        move |input: I, result: Result<O, ApiError>| {
            let change = change_of(&input);
            match result {
                Ok(output) => {
                    let stale = cache.invalidate_all(&change.invalidations());
                    debug!(?change, stale, "mutation settled");
                    notifier.success(change.success_message());
                    on_success(output);
                }
                Err(e) => {
                    warn!(?change, error = %e, "mutation failed");
                    notifier.error(e.message());
                }
            }
        },
    )
}

// ========================
// Composite: create then pin
// ========================

/// Create a news item unpinned, then pin it with a second write
pub async fn create_pinned_news<C, CF, P, PF>(
    form: NewsForm,
    create: C,
    pin: P,
) -> Result<News, CompositeError>
where
    C: FnOnce(NewsForm) -> CF,
    CF: Future<Output = Result<News, ApiError>>,
    P: FnOnce(u32, NewsForm) -> PF,
    PF: Future<Output = Result<News, ApiError>>,
{
    let unpinned = NewsForm {
        pinned: false,
        pinned_until: None,
        ..form.clone()
    };
    let created = create(unpinned).await.map_err(CompositeError::Create)?;

    let pinned = NewsForm { pinned: true, ..form };
    pin(created.id, pinned).await.map_err(CompositeError::Pin)
}

/// Keys to mark stale once the composite settles.
///
/// A failed pin still leaves a new item on the server.
pub fn composite_invalidations(result: &Result<News, CompositeError>) -> Vec<KeyPattern> {
    match result {
        Err(e) if !e.partially_applied() => Vec::new(),
        _ => Change::CreatePinnedNews.invalidations(),
    }
}

pub fn use_create_pinned_news(on_success: impl Fn(News) + 'static) -> Mutation<NewsForm> {
    let api = use_api();
    let cache = use_query_cache();
    let notifier = use_notifier();

    use_mutation(
        move |form: NewsForm| {
            let create_api = api.clone();
            let pin_api = api.clone();
            create_pinned_news(
                form,
                move |form| async move { create_api.create_news(&form).await },
                move |id, form| async move { pin_api.update_news(id, &form).await },
            )
        },
        move |_, result: Result<News, CompositeError>| {
            cache.invalidate_all(&composite_invalidations(&result));
            match result {
                Ok(news) => {
                    notifier.success(Change::CreatePinnedNews.success_message());
                    on_success(news);
                }
                Err(e) => {
                    warn!(error = %e, partial = e.partially_applied(), "create pinned news failed");
                    notifier.error(e.to_string());
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use leptos_query_cache::QueryKey;
    use std::cell::RefCell;

    fn news(id: u32, form: &NewsForm) -> News {
        News {
            id,
            title: form.title.clone(),
            description: form.description.clone(),
            date: "2025-03-10".to_string(),
            pinned: form.pinned,
            pinned_until: form.pinned_until.clone(),
        }
    }

    fn form() -> NewsForm {
        NewsForm {
            title: "Asamblea".to_string(),
            description: "Sábado 10 hs".to_string(),
            pinned: true,
            pinned_until: Some("2025-04-01T00:00:00Z".to_string()),
        }
    }

    fn http(status: u16, message: &str) -> ApiError {
        ApiError::Http { status, message: message.to_string() }
    }

    #[test]
    fn test_resolving_request_touches_only_that_group() {
        let patterns = Change::ResolveJoinRequest {
            group_id: 3,
            decision: Decision::Approve,
        }
        .invalidations();
        let hit = |key: QueryKey| patterns.iter().any(|p| p.matches(&key));

        assert!(hit(keys::join_requests(&3)));
        assert!(hit(keys::members(&3)));
        assert!(!hit(keys::join_requests(&4)));
        assert!(!hit(keys::members(&4)));
        assert!(!hit(keys::groups(&())));
        assert!(!hit(keys::follow_status(&3)));
    }

    #[test]
    fn test_registration_refreshes_event_views() {
        let patterns = Change::RegisterForEvent(9).invalidations();
        let hit = |key: QueryKey| patterns.iter().any(|p| p.matches(&key));

        assert!(hit(keys::event(&9)));
        assert!(hit(keys::registration(&9)));
        assert!(hit(keys::registration_check(&9)));
        assert!(hit(keys::registrants(&9)));
        assert!(hit(keys::events(&crate::api::EventFilter::Current)));
        assert!(!hit(keys::registration(&8)));
        assert!(!hit(keys::registration_check(&8)));
    }

    #[test]
    fn test_role_assignment_scoped_to_group() {
        let global = Change::AssignRole { group_id: None }.invalidations();
        assert_eq!(global.len(), 1);

        let scoped = Change::AssignRole { group_id: Some(2) }.invalidations();
        assert!(scoped.iter().any(|p| p.matches(&keys::members(&2))));
        assert!(Change::RegisterAccount.invalidations().is_empty());
    }

    #[test]
    fn test_unpin_is_reported_as_unpin() {
        let unpin = Change::set_pinned(4, false);
        assert_eq!(unpin, Change::UnpinNews(4));
        assert_eq!(unpin.success_message(), "Noticia desfijada");
        assert_eq!(Change::set_pinned(4, true).success_message(), "Noticia fijada");

        // same views go stale either way
        assert_eq!(unpin.invalidations(), Change::PinNews(4).invalidations());
        assert!(unpin.invalidations().iter().any(|p| p.matches(&keys::news_item(&4))));
    }

    #[test]
    fn test_create_pinned_runs_steps_in_order() {
        let log = RefCell::new(Vec::new());
        let result = block_on(create_pinned_news(
            form(),
            |form| {
                log.borrow_mut().push(format!("create pinned={}", form.pinned));
                async move { Ok(news(5, &form)) }
            },
            |id, form| {
                log.borrow_mut().push(format!("pin {id} pinned={}", form.pinned));
                async move { Ok(news(id, &form)) }
            },
        ));

        let pinned = result.unwrap();
        assert!(pinned.pinned);
        assert_eq!(*log.borrow(), vec!["create pinned=false", "pin 5 pinned=true"]);
        assert_eq!(composite_invalidations(&Ok(pinned)).len(), 1);
    }

    #[test]
    fn test_create_failure_skips_pin() {
        let pinned_called = RefCell::new(false);
        let result = block_on(create_pinned_news(
            form(),
            |_| async { Err(http(400, "Título requerido")) },
            |id, form| {
                *pinned_called.borrow_mut() = true;
                async move { Ok(news(id, &form)) }
            },
        ));

        let err = result.unwrap_err();
        assert_eq!(err, CompositeError::Create(http(400, "Título requerido")));
        assert!(!*pinned_called.borrow());
        assert!(composite_invalidations(&Err(err)).is_empty());
    }

    #[test]
    fn test_pin_failure_names_step_and_still_invalidates() {
        let result = block_on(create_pinned_news(
            form(),
            |form| async move { Ok(news(5, &form)) },
            |_, _| async { Err(http(500, "Error interno")) },
        ));

        let err = result.unwrap_err();
        assert!(err.partially_applied());
        assert!(err.to_string().contains("no se pudo fijar"));
        assert!(err.to_string().contains("Error interno"));

        let stale = composite_invalidations(&Err(err));
        assert!(stale.iter().any(|p| p.matches(&keys::news_list(&()))));
    }
}
