//! Groups Page
//!
//! Group list with follow requests, plus create/edit for general
//! secretaries.

use leptos::prelude::*;

use crate::components::{no_items, ImageInput, QueryView};
use crate::context::{use_app, Page};
use crate::models::{FollowStatus, Group, GroupForm, ImageUpload};
use crate::mutations::{use_mutation_with_policy, Change};
use crate::queries::{use_follow_status, use_groups};

#[component]
pub fn GroupsPage() -> impl IntoView {
    let ctx = use_app();
    let groups = use_groups();
    // group being edited; `Some(None)` is a new one
    let (editing, set_editing) = signal(None::<Option<Group>>);

    view! {
        <section class="groups-page">
            <header class="page-header">
                <h1>"Grupos"</h1>
                <Show when=move || ctx.role().is_general()>
                    <button on:click=move |_| set_editing.set(Some(None))>"Nuevo grupo"</button>
                </Show>
            </header>

            {move || editing.get().map(|group| view! {
                <GroupFormPanel group=group on_done=Callback::new(move |_| set_editing.set(None)) />
            })}

            <QueryView
                query=groups
                is_empty=no_items
                empty_text="No hay grupos"
                render={move |list: Vec<Group>| view! {
                    <div class="group-grid">
                        {list.into_iter().map(|group| view! {
                            <GroupCard group=group on_edit=Callback::new(move |g| set_editing.set(Some(Some(g)))) />
                        }).collect_view()}
                    </div>
                }}
            />
        </section>
    }
}

#[component]
fn GroupCard(group: Group, on_edit: Callback<Group>) -> impl IntoView {
    let ctx = use_app();
    let id = group.id;
    // anonymous users leave the status query idle
    let status = use_follow_status(move || ctx.is_logged_in().then_some(id));

    let follow = use_mutation_with_policy(
        |id: &u32| Change::FollowGroup(*id),
        |api, id: u32| async move { api.follow_group(id).await },
        |_| {},
    );

    let follow_area = move |current: Option<FollowStatus>| match current {
        Some(current) => view! {
            <span class="follow-status">{current.status.label()}</span>
        }
        .into_any(),
        None => view! {
            <button
                class="follow-btn"
                disabled=move || follow.is_pending()
                on:click=move |_| follow.dispatch(id)
            >
                "Seguir"
            </button>
        }
        .into_any(),
    };

    let for_edit = group.clone();
    view! {
        <article class="group-card" class:inactive=!group.active>
            {group.image.clone().map(|src| view! { <img class="group-image" src=src /> })}
            <h3>{group.name.clone()}</h3>
            {group.description.clone().map(|d| view! { <p>{d}</p> })}
            <QueryView query=status render=follow_area />
            <Show when=move || ctx.can_manage_group(id)>
                <button on:click=move |_| ctx.navigate(Page::GroupAdmin(id))>"Administrar"</button>
            </Show>
            <Show when=move || ctx.role().is_general()>
                <button on:click={
                    let group = for_edit.clone();
                    move |_| on_edit.run(group.clone())
                }>"Editar"</button>
            </Show>
        </article>
    }
}

#[component]
fn GroupFormPanel(group: Option<Group>, on_done: Callback<()>) -> impl IntoView {
    let id = group.as_ref().map(|g| g.id);
    let initial = group
        .map(|g| GroupForm {
            name: g.name,
            description: g.description.unwrap_or_default(),
            active: g.active,
            image: None,
        })
        .unwrap_or(GroupForm { active: true, ..GroupForm::default() });
    let form = RwSignal::new(initial);
    let (image, set_image) = signal(None::<ImageUpload>);

    let save = use_mutation_with_policy(
        move |_: &GroupForm| id.map_or(Change::CreateGroup, Change::EditGroup),
        move |api, form: GroupForm| async move {
            match id {
                Some(id) => api.update_group(id, &form).await,
                None => api.create_group(&form).await,
            }
        },
        move |_| on_done.run(()),
    );

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut values = form.get();
        if values.name.trim().is_empty() {
            return;
        }
        values.image = image.get();
        save.dispatch(values);
    };

    view! {
        <form class="group-form" on:submit=on_submit>
            <h2>{if id.is_some() { "Editar grupo" } else { "Nuevo grupo" }}</h2>
            <input
                type="text"
                placeholder="Nombre"
                prop:value=move || form.with(|f| f.name.clone())
                on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
            />
            <textarea
                placeholder="Descripción"
                prop:value=move || form.with(|f| f.description.clone())
                on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
            ></textarea>
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|f| f.active)
                    on:change=move |ev| form.update(|f| f.active = event_target_checked(&ev))
                />
                "Activo"
            </label>
            <ImageInput set_image=set_image />
            <div class="form-actions">
                <button type="submit" disabled=move || save.is_pending()>"Guardar"</button>
                <button type="button" on:click=move |_| on_done.run(())>"Cancelar"</button>
            </div>
        </form>
    }
}
