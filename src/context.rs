//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::Api;
use crate::models::{Session, UserRole};
use crate::queries::ApiQuery;

/// Screen currently shown; routing itself lives outside the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Events,
    EventDetail(u32),
    /// `None` creates a new event
    EventEdit(Option<u32>),
    Groups,
    GroupAdmin(u32),
    Secretary,
    News,
    Login,
    Register,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
    /// Logged-in user, `None` while anonymous or still loading
    pub session: Signal<Option<Session>>,
}

impl AppContext {
    pub fn new(
        page: (ReadSignal<Page>, WriteSignal<Page>),
        session: ApiQuery<Option<Session>>,
    ) -> Self {
        Self {
            page: page.0,
            set_page: page.1,
            session: Signal::derive(move || session.data().flatten()),
        }
    }

    pub fn navigate(&self, page: Page) {
        self.set_page.set(page);
    }

    /// Role of the current user; anonymous users count as members
    pub fn role(&self) -> UserRole {
        self.session
            .with(|session| session.as_ref().map(Session::role))
            .unwrap_or_default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.with(Option::is_some)
    }

    pub fn can_manage_group(&self, group_id: u32) -> bool {
        self.session
            .with(|session| session.as_ref().is_some_and(|s| s.can_manage_group(group_id)))
    }
}

/// Get the app context
pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}

/// Get the API client from context
pub fn use_api() -> Api {
    expect_context::<Api>()
}
