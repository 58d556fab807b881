//! Navigation Bar

use leptos::prelude::*;

use crate::components::LogoutButton;
use crate::context::{use_app, Page};

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app();

    let link = move |label: &'static str, page: Page| {
        view! {
            <button
                class=move || if ctx.page.get() == page { "nav-link active" } else { "nav-link" }
                on:click=move |_| ctx.navigate(page)
            >
                {label}
            </button>
        }
    };

    view! {
        <nav class="nav-bar">
            {link("Eventos", Page::Events)}
            {link("Grupos", Page::Groups)}
            {link("Noticias", Page::News)}
            <Show when=move || ctx.role().is_secretary()>
                {link("Secretaría", Page::Secretary)}
            </Show>
            <span class="nav-spacer"></span>
            {move || match ctx.session.get() {
                Some(session) => view! {
                    <span class="nav-user">{session.name}</span>
                    <LogoutButton />
                }
                .into_any(),
                None => view! {
                    {link("Ingresar", Page::Login)}
                    {link("Crear cuenta", Page::Register)}
                }
                .into_any(),
            }}
        </nav>
    }
}
