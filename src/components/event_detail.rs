//! Event Detail
//!
//! Full event view with the registration action, registrants for
//! secretaries and admin actions.

use leptos::prelude::*;

use crate::card_state::{CardAction, CardState};
use crate::components::{no_items, DeleteConfirmButton, QueryView};
use crate::context::{use_app, Page};
use crate::dates::{format_date, format_date_time, now};
use crate::models::{Event, Member};
use crate::mutations::{use_mutation_with_policy, Change};
use crate::queries::{use_event, use_registrants, use_registration};

#[component]
pub fn EventDetail(id: u32) -> impl IntoView {
    let event = use_event(move || Some(id));

    view! {
        <section class="event-detail">
            <QueryView
                query=event
                render={move |event: Event| view! { <EventInfo event=event /> }}
            />
        </section>
    }
}

#[component]
fn EventInfo(event: Event) -> impl IntoView {
    let ctx = use_app();
    let id = event.id;
    let registration = use_registration(move || ctx.is_logged_in().then_some(id));

    let register = use_mutation_with_policy(
        |id: &u32| Change::RegisterForEvent(*id),
        |api, id: u32| async move { api.register_for_event(id).await },
        |_| {},
    );
    let withdraw = use_mutation_with_policy(
        |id: &u32| Change::UnregisterFromEvent(*id),
        |api, id: u32| async move { api.unregister_from_event(id).await },
        |_| {},
    );
    let cancel = use_mutation_with_policy(
        |id: &u32| Change::CancelEvent(*id),
        |api, id: u32| async move { api.cancel_event(id).await },
        |_| {},
    );
    let delete = use_mutation_with_policy(
        |id: &u32| Change::DeleteEvent(*id),
        |api, id: u32| async move { api.delete_event(id).await },
        move |_| ctx.navigate(Page::Events),
    );
    let busy = Signal::derive(move || register.is_pending() || withdraw.is_pending());

    let state = {
        let event = event.clone();
        Memo::new(move |_| CardState::derive(&event, registration.data().as_ref(), now()))
    };

    let action_button = move || {
        if !ctx.is_logged_in() {
            return view! {
                <button on:click=move |_| ctx.navigate(Page::Login)>"Ingresá para inscribirte"</button>
            }
            .into_any();
        }
        match state.get().action() {
            Some(action) => view! {
                <button
                    class="primary-btn"
                    disabled=move || busy.get()
                    on:click=move |_| match action {
                        CardAction::Register | CardAction::JoinWaitlist => register.dispatch(id),
                        CardAction::Withdraw => withdraw.dispatch(id),
                    }
                >
                    {action.label()}
                </button>
            }
            .into_any(),
            None => ().into_any(),
        }
    };

    let waitlist_position = move || {
        registration
            .data()
            .filter(|r| r.registered && r.waitlisted)
            .and_then(|r| r.waitlist_position)
            .map(|n| view! { <p class="waitlist-position">{format!("Sos el suplente nº {}", n)}</p> })
    };

    let group_id = event.group_id;
    let cancelled = event.cancelled;
    let manages = move || ctx.role().is_general() || group_id.is_some_and(|g| ctx.can_manage_group(g));

    view! {
        <article class="event-info" class:cancelled=event.cancelled>
            {event.image.clone().map(|src| view! { <img class="event-image" src=src /> })}
            <h1>{event.name.clone()}</h1>
            <p class="event-date">{format_date_time(&event.date)}</p>
            {event.place.clone().map(|place| view! { <p class="event-place">{place}</p> })}
            {event.description.clone().map(|text| view! { <p class="event-description">{text}</p> })}
            <dl class="event-facts">
                <dt>"Cupo"</dt>
                <dd>{format!("{} / {} ({} libres)", event.registered, event.capacity, event.free_places())}</dd>
                <dt>"Suplentes"</dt>
                <dd>{format!("{} / {}", event.waitlisted, event.waitlist_capacity)}</dd>
                {event.registration_deadline.clone().map(|d| view! {
                    <dt>"Inscripción hasta"</dt>
                    <dd>{format_date(&d)}</dd>
                })}
                {event.withdrawal_deadline.clone().map(|d| view! {
                    <dt>"Baja hasta"</dt>
                    <dd>{format_date(&d)}</dd>
                })}
            </dl>

            <p class="event-state">{move || state.get().label()}</p>
            {waitlist_position}
            {action_button}

            <Show when=manages>
                <div class="admin-actions">
                    <button on:click=move |_| ctx.navigate(Page::EventEdit(Some(id)))>"Editar"</button>
                    <Show when=move || !cancelled>
                        <DeleteConfirmButton
                            label="Cancelar evento"
                            pending=cancel.pending()
                            on_confirm=move |_| cancel.dispatch(id)
                        />
                    </Show>
                    <DeleteConfirmButton
                        label="Eliminar"
                        pending=delete.pending()
                        on_confirm=move |_| delete.dispatch(id)
                    />
                </div>
                <Registrants event_id=id />
            </Show>
        </article>
    }
}

#[component]
fn Registrants(event_id: u32) -> impl IntoView {
    let registrants = use_registrants(move || Some(event_id));

    view! {
        <div class="registrants">
            <h2>"Inscriptos"</h2>
            <QueryView
                query=registrants
                is_empty=no_items
                empty_text="Todavía no hay inscriptos"
                render={|list: Vec<Member>| {
                    let (waitlist, primary): (Vec<Member>, Vec<Member>) =
                        list.into_iter().partition(|m| m.waitlisted);
                    view! {
                        <ol class="registrant-list">
                            {primary.into_iter().map(|m| view! { <li>{m.full_name()}</li> }).collect_view()}
                        </ol>
                        {(!waitlist.is_empty()).then(|| view! { <h3>"Suplentes"</h3> })}
                        <ol class="waitlist">
                            {waitlist.iter().map(|m| view! { <li>{m.full_name()}</li> }).collect_view()}
                        </ol>
                    }
                }}
            />
        </div>
    }
}
