//! Eventos Frontend App
//!
//! Provides the shared services and switches between pages.

use leptos::prelude::*;
use leptos_query_cache::provide_query_cache;
use reactive_stores::Store;
use tracing::info;

use crate::api::Api;
use crate::components::{
    EventDetail, EventEditor, EventsPage, GroupAdmin, GroupsPage, LoginForm, NavBar, NewsPage,
    RegisterForm, SecretaryPage, Toaster,
};
use crate::config::ApiConfig;
use crate::context::{AppContext, Page};
use crate::queries::use_session;
use crate::store::{Notifier, ToastState};

#[component]
pub fn App() -> impl IntoView {
    let config = ApiConfig::load();
    info!(api = %config.api_base, auth = %config.auth_base, "starting");

    // Provide services to all children
    let toast_ms = config.toast_ms;
    provide_context(Api::new(config));
    provide_query_cache();
    provide_context(Notifier::new(Store::new(ToastState::default()), toast_ms));

    let page = signal(Page::default());
    let session = use_session();
    let ctx = AppContext::new(page, session);
    provide_context(ctx);

    view! {
        <div class="app-layout">
            <NavBar />
            <main class="main-content">
                {move || match ctx.page.get() {
                    Page::Events => view! { <EventsPage /> }.into_any(),
                    Page::EventDetail(id) => view! { <EventDetail id=id /> }.into_any(),
                    Page::EventEdit(id) => view! { <EventEditor id=id /> }.into_any(),
                    Page::Groups => view! { <GroupsPage /> }.into_any(),
                    Page::GroupAdmin(id) => view! { <GroupAdmin id=id /> }.into_any(),
                    Page::Secretary => view! { <SecretaryPage /> }.into_any(),
                    Page::News => view! { <NewsPage /> }.into_any(),
                    Page::Login => view! { <LoginForm /> }.into_any(),
                    Page::Register => view! { <RegisterForm /> }.into_any(),
                }}
            </main>
            <Toaster />
        </div>
    }
}
