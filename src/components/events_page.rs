//! Events Page
//!
//! Tabbed event list with client-side search, date-part and category
//! filters, and pagination.

use leptos::prelude::*;
use leptos_query_cache::QueryState;

use crate::api::EventFilter;
use crate::card_state::CardState;
use crate::components::{no_items, EmptyState, QueryView};
use crate::context::{use_app, use_api, Page};
use crate::error::ApiError;
use crate::dates::{format_date_time, now};
use crate::filters::{categories, filter_events, paginate, upcoming_events, EventQuery};
use crate::models::Event;
use crate::queries::{use_events, use_registration_check};

fn parse_part<T: std::str::FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

#[component]
pub fn EventsPage() -> impl IntoView {
    let ctx = use_app();
    let page_size = use_api().config().page_size;

    let (filter, set_filter) = signal(EventFilter::Current);
    let (query, set_query) = signal(EventQuery::default());
    let (page, set_page) = signal(0usize);
    let events = use_events(move || filter.get());

    // a new tab or search starts from the first page
    Effect::new(move |_| {
        filter.track();
        query.track();
        set_page.set(0);
    });

    let update = move |f: fn(&mut EventQuery, String), value: String| {
        set_query.update(|q| f(q, value));
    };

    view! {
        <section class="events-page">
            <header class="page-header">
                <h1>"Eventos"</h1>
                <Show when=move || ctx.role().is_secretary()>
                    <button on:click=move |_| ctx.navigate(Page::EventEdit(None))>"Nuevo evento"</button>
                </Show>
            </header>

            <div class="tabs">
                {EventFilter::ALL.iter().map(|&tab| view! {
                    <button
                        class=move || if filter.get() == tab { "tab active" } else { "tab" }
                        on:click=move |_| set_filter.set(tab)
                    >
                        {tab.label()}
                    </button>
                }).collect_view()}
            </div>

            <div class="event-filters">
                <input
                    type="search"
                    placeholder="Buscar por nombre o descripción"
                    prop:value=move || query.with(|q| q.text.clone())
                    on:input=move |ev| update(|q, v| q.text = v, event_target_value(&ev))
                />
                <input
                    type="number"
                    placeholder="Año"
                    on:input=move |ev| update(|q, v| q.year = parse_part(&v), event_target_value(&ev))
                />
                <input
                    type="number"
                    placeholder="Mes"
                    min="1"
                    max="12"
                    on:input=move |ev| update(|q, v| q.month = parse_part(&v), event_target_value(&ev))
                />
                <input
                    type="number"
                    placeholder="Día"
                    min="1"
                    max="31"
                    on:input=move |ev| update(|q, v| q.day = parse_part(&v), event_target_value(&ev))
                />
                <select on:change=move |ev| {
                    update(|q, v| q.category = (!v.is_empty()).then_some(v), event_target_value(&ev))
                }>
                    <option value="">"Todas las categorías"</option>
                    {move || {
                        events
                            .data()
                            .map(|list| categories(&list))
                            .unwrap_or_default()
                            .into_iter()
                            .map(|c| view! { <option value=c.clone()>{c.clone()}</option> })
                            .collect_view()
                    }}
                </select>
            </div>

            <Show when=move || filter.get() == EventFilter::Current && query.with(EventQuery::is_empty)>
                <UpcomingStrip events=events.signal() />
            </Show>

            <QueryView
                query=events
                is_empty=no_items
                empty_text="No hay eventos"
                render={move |list: Vec<Event>| {
                    let matching = filter_events(&list, &query.get());
                    if matching.is_empty() {
                        return view! { <EmptyState text="Ningún evento coincide con los filtros" /> }.into_any();
                    }
                    let current = paginate(&matching, page.get(), page_size);
                    let (has_prev, has_next) = (current.has_prev(), current.has_next());
                    let number = current.page;
                    let total = current.total_pages;
                    view! {
                        <div class="event-grid">
                            {current.items.into_iter().map(|event| view! { <EventCard event=event /> }).collect_view()}
                        </div>
                        <div class="pagination">
                            <button disabled=!has_prev on:click=move |_| set_page.set(number.saturating_sub(1))>
                                "Anterior"
                            </button>
                            <span>{format!("Página {} de {}", number + 1, total)}</span>
                            <button disabled=!has_next on:click=move |_| set_page.set(number + 1)>
                                "Siguiente"
                            </button>
                        </div>
                    }
                    .into_any()
                }}
            />
        </section>
    }
}

/// Next few events, soonest first
#[component]
fn UpcomingStrip(events: Signal<QueryState<Vec<Event>, ApiError>>) -> impl IntoView {
    let ctx = use_app();
    let upcoming = move || {
        events.with(|state| state.data().map(|list| upcoming_events(list, now())).unwrap_or_default())
    };

    view! {
        <aside class="upcoming">
            <h2>"Próximos eventos"</h2>
            <ul>
                {move || upcoming().into_iter().take(3).map(|event| {
                    let id = event.id;
                    view! {
                        <li on:click=move |_| ctx.navigate(Page::EventDetail(id))>
                            {event.name} " · " {format_date_time(&event.date)}
                        </li>
                    }
                }).collect_view()}
            </ul>
        </aside>
    }
}

#[component]
pub fn EventCard(event: Event) -> impl IntoView {
    let ctx = use_app();
    let id = event.id;
    // only logged-in users have a registration to look up
    let registration = use_registration_check(move || ctx.is_logged_in().then_some(id));

    let state = {
        let event = event.clone();
        move || CardState::derive(&event, registration.data().as_ref(), now())
    };

    view! {
        <article class="event-card" class:cancelled=event.cancelled>
            {event.image.clone().map(|src| view! { <img class="event-image" src=src /> })}
            <h3>{event.name.clone()}</h3>
            <p class="event-date">{format_date_time(&event.date)}</p>
            {event.place.clone().map(|place| view! { <p class="event-place">{place}</p> })}
            <p class="event-places">
                {format!("{} / {} inscriptos", event.registered, event.capacity)}
            </p>
            <p class="event-state">{move || state().label()}</p>
            <button on:click=move |_| ctx.navigate(Page::EventDetail(id))>"Ver detalle"</button>
        </article>
    }
}
