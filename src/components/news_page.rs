//! News Page
//!
//! Searchable news feed. Pinned items come first and show how long the
//! pin lasts; secretaries create, edit, pin and delete.

use leptos::prelude::*;

use crate::components::{no_items, DeleteConfirmButton, EmptyState, QueryView};
use crate::context::use_app;
use crate::dates::{format_date, now};
use crate::filters::{filter_news, is_pin_active, sort_news};
use crate::markdown::{excerpt, parse_markdown};
use crate::models::{News, NewsForm};
use crate::mutations::{use_create_pinned_news, use_mutation_with_policy, Change};
use crate::queries::{use_news, use_news_item};
use crate::timers::use_countdown;

const EXCERPT_CHARS: usize = 180;

#[component]
pub fn NewsPage() -> impl IntoView {
    let ctx = use_app();
    let news = use_news();
    let (search, set_search) = signal(String::new());
    // item being edited; `Some(None)` is a new one
    let (editing, set_editing) = signal(None::<Option<u32>>);

    view! {
        <section class="news-page">
            <header class="page-header">
                <h1>"Noticias"</h1>
                <Show when=move || ctx.role().is_secretary()>
                    <button on:click=move |_| set_editing.set(Some(None))>"Nueva noticia"</button>
                </Show>
            </header>

            {move || editing.get().map(|id| view! {
                <NewsEditor id=id on_done=Callback::new(move |_| set_editing.set(None)) />
            })}

            <input
                type="search"
                placeholder="Buscar noticias"
                prop:value=move || search.get()
                on:input=move |ev| set_search.set(event_target_value(&ev))
            />

            <QueryView
                query=news
                is_empty=no_items
                empty_text="No hay noticias"
                render={move |list: Vec<News>| {
                    let shown = sort_news(filter_news(&list, &search.get()), now());
                    if shown.is_empty() {
                        return view! { <EmptyState text="Ninguna noticia coincide con la búsqueda" /> }.into_any();
                    }
                    view! {
                        <div class="news-list">
                            {shown.into_iter().map(|item| view! {
                                <NewsCard
                                    news=item
                                    on_edit=Callback::new(move |id| set_editing.set(Some(Some(id))))
                                />
                            }).collect_view()}
                        </div>
                    }
                    .into_any()
                }}
            />
        </section>
    }
}

#[component]
fn NewsCard(news: News, on_edit: Callback<u32>) -> impl IntoView {
    let ctx = use_app();
    let id = news.id;
    let (expanded, set_expanded) = signal(false);

    let pin_expiry = Signal::derive({
        let news = news.clone();
        move || is_pin_active(&news, now()).then(|| news.pinned_until.clone()).flatten()
    });
    let countdown = use_countdown(pin_expiry);

    let pin = use_mutation_with_policy(
        |(id, form): &(u32, NewsForm)| Change::set_pinned(*id, form.pinned),
        |api, (id, form): (u32, NewsForm)| async move { api.update_news(id, &form).await },
        |_| {},
    );
    let delete = use_mutation_with_policy(
        |id: &u32| Change::DeleteNews(*id),
        |api, id: u32| async move { api.delete_news(id).await },
        |_| {},
    );

    let pinned_now = is_pin_active(&news, now());
    let toggle_form = NewsForm {
        pinned: !pinned_now,
        pinned_until: None,
        ..NewsForm::from_news(&news)
    };
    let body = news.description.clone();

    view! {
        <article class="news-card" class:pinned=pinned_now>
            <h3>{news.title.clone()}</h3>
            <p class="news-date">{format_date(&news.date)}</p>
            {move || countdown.get().map(|left| view! { <p class="pin-countdown">{format!("Fijada por {}", left)}</p> })}
            {move || if expanded.get() {
                view! { <div class="news-body" inner_html=parse_markdown(&body)></div> }.into_any()
            } else {
                view! { <p class="news-excerpt">{excerpt(&body, EXCERPT_CHARS)}</p> }.into_any()
            }}
            <button class="link-btn" on:click=move |_| set_expanded.update(|e| *e = !*e)>
                {move || if expanded.get() { "Ver menos" } else { "Leer más" }}
            </button>
            <Show when=move || ctx.role().is_secretary()>
                <div class="admin-actions">
                    <button on:click=move |_| on_edit.run(id)>"Editar"</button>
                    <button
                        disabled=move || pin.is_pending()
                        on:click={
                            let form = toggle_form.clone();
                            move |_| pin.dispatch((id, form.clone()))
                        }
                    >
                        {if pinned_now { "Desfijar" } else { "Fijar" }}
                    </button>
                    <DeleteConfirmButton
                        label="Eliminar"
                        pending=delete.pending()
                        on_confirm=move |_| delete.dispatch(id)
                    />
                </div>
            </Show>
        </article>
    }
}

/// Edits the server's current copy of `id`; `None` writes a new item
#[component]
fn NewsEditor(id: Option<u32>, on_done: Callback<()>) -> impl IntoView {
    match id {
        None => view! { <NewsFormPanel news=None on_done=on_done /> }.into_any(),
        Some(id) => {
            let item = use_news_item(move || Some(id));
            view! {
                <QueryView
                    query=item
                    render={move |news: News| view! { <NewsFormPanel news=Some(news) on_done=on_done /> }}
                />
            }
            .into_any()
        }
    }
}

#[component]
fn NewsFormPanel(news: Option<News>, on_done: Callback<()>) -> impl IntoView {
    let id = news.as_ref().map(|n| n.id);
    let form = RwSignal::new(news.as_ref().map(NewsForm::from_news).unwrap_or_default());

    let save = use_mutation_with_policy(
        move |_: &NewsForm| id.map_or(Change::CreateNews, Change::EditNews),
        move |api, form: NewsForm| async move {
            match id {
                Some(id) => api.update_news(id, &form).await,
                None => api.create_news(&form).await,
            }
        },
        move |_| on_done.run(()),
    );
    let create_pinned = use_create_pinned_news(move |_| on_done.run(()));
    let pending = move || save.is_pending() || create_pinned.is_pending();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let values = form.get();
        if values.title.trim().is_empty() {
            return;
        }
        // new pinned items are created first and pinned afterwards
        if id.is_none() && values.pinned {
            create_pinned.dispatch(values);
        } else {
            save.dispatch(values);
        }
    };

    view! {
        <form class="news-form" on:submit=submit>
            <h2>{if id.is_some() { "Editar noticia" } else { "Nueva noticia" }}</h2>
            <input
                type="text"
                placeholder="Título"
                prop:value=move || form.with(|f| f.title.clone())
                on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
            />
            <textarea
                placeholder="Texto (admite Markdown)"
                prop:value=move || form.with(|f| f.description.clone())
                on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
            ></textarea>
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|f| f.pinned)
                    on:change=move |ev| form.update(|f| f.pinned = event_target_checked(&ev))
                />
                "Fijar"
            </label>
            <Show when=move || form.with(|f| f.pinned)>
                <label>
                    "Fijada hasta"
                    <input
                        type="datetime-local"
                        prop:value=move || form.with(|f| f.pinned_until.clone().unwrap_or_default())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.pinned_until = (!value.is_empty()).then_some(value));
                        }
                    />
                </label>
            </Show>
            <div class="form-actions">
                <button type="submit" disabled=pending>"Publicar"</button>
                <button type="button" on:click=move |_| on_done.run(())>"Cancelar"</button>
            </div>
        </form>
    }
}
