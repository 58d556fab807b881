//! Event Create/Edit Form

use leptos::prelude::*;

use crate::components::{ImageInput, QueryView};
use crate::context::{use_app, Page};
use crate::models::{Event, EventForm, ImageUpload};
use crate::mutations::{use_mutation_with_policy, Change};
use crate::queries::{use_event, use_groups};

/// `id: None` creates a new event
#[component]
pub fn EventEditor(id: Option<u32>) -> impl IntoView {
    match id {
        None => view! { <EventFormFields initial=EventForm::default() id=None /> }.into_any(),
        Some(id) => {
            let event = use_event(move || Some(id));
            view! {
                <QueryView
                    query=event
                    render={move |event: Event| view! {
                        <EventFormFields initial=EventForm::from_event(&event) id=Some(id) />
                    }}
                />
            }
            .into_any()
        }
    }
}

#[component]
fn EventFormFields(initial: EventForm, id: Option<u32>) -> impl IntoView {
    let ctx = use_app();
    let groups = use_groups();
    let form = RwSignal::new(initial);
    let (image, set_image) = signal(None::<ImageUpload>);

    let save = use_mutation_with_policy(
        move |_: &EventForm| id.map_or(Change::CreateEvent, Change::EditEvent),
        move |api, form: EventForm| async move {
            match id {
                Some(id) => api.update_event(id, &form).await,
                None => api.create_event(&form).await,
            }
        },
        move |saved: Event| ctx.navigate(Page::EventDetail(saved.id)),
    );

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut values = form.get();
        if values.name.trim().is_empty() || values.date.trim().is_empty() {
            return;
        }
        values.image = image.get();
        save.dispatch(values);
    };

    let text = move |label: &'static str,
                     kind: &'static str,
                     get: fn(&EventForm) -> String,
                     set: fn(&mut EventForm, String)| {
        view! {
            <label>
                {label}
                <input
                    type=kind
                    prop:value=move || form.with(get)
                    on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                />
            </label>
        }
    };
    let number = move |label: &'static str, get: fn(&EventForm) -> u32, set: fn(&mut EventForm, u32)| {
        view! {
            <label>
                {label}
                <input
                    type="number"
                    min="0"
                    prop:value=move || form.with(get).to_string()
                    on:input=move |ev| {
                        let value = event_target_value(&ev).parse().unwrap_or(0);
                        form.update(|f| set(f, value));
                    }
                />
            </label>
        }
    };

    view! {
        <form class="event-form" on:submit=on_submit>
            <h1>{if id.is_some() { "Editar evento" } else { "Nuevo evento" }}</h1>
            {text("Nombre", "text", |f| f.name.clone(), |f, v| f.name = v)}
            <label>
                "Descripción"
                <textarea
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                ></textarea>
            </label>
            {text("Fecha", "datetime-local", |f| f.date.clone(), |f, v| f.date = v)}
            {text("Lugar", "text", |f| f.place.clone(), |f, v| f.place = v)}
            {text("Categoría", "text", |f| f.category.clone(), |f, v| f.category = v)}
            {number("Cupo", |f| f.capacity, |f, v| f.capacity = v)}
            {number("Cupo de suplentes", |f| f.waitlist_capacity, |f, v| f.waitlist_capacity = v)}
            {text("Inscripción hasta", "datetime-local", |f| f.registration_deadline.clone(), |f, v| f.registration_deadline = v)}
            {text("Baja hasta", "datetime-local", |f| f.withdrawal_deadline.clone(), |f, v| f.withdrawal_deadline = v)}
            <label>
                "Grupo"
                <select on:change=move |ev| form.update(|f| f.group_id = event_target_value(&ev).parse().ok())>
                    <option value="">"Todos los grupos"</option>
                    {move || groups.data().unwrap_or_default().into_iter().map(|g| {
                        let selected = form.with(|f| f.group_id == Some(g.id));
                        view! { <option value=g.id.to_string() selected=selected>{g.name}</option> }
                    }).collect_view()}
                </select>
            </label>
            <ImageInput set_image=set_image />
            <div class="form-actions">
                <button type="submit" disabled=move || save.is_pending()>
                    {move || if save.is_pending() { "Guardando..." } else { "Guardar" }}
                </button>
                <button type="button" on:click=move |_| match id {
                    Some(id) => ctx.navigate(Page::EventDetail(id)),
                    None => ctx.navigate(Page::Events),
                }>
                    "Volver"
                </button>
            </div>
        </form>
    }
}
