//! Secretary Page
//!
//! User directory with role assignment. General secretaries see every
//! user; group secretaries only their own group.

use leptos::prelude::*;

use crate::components::{no_items, EmptyState, QueryView};
use crate::context::use_app;
use crate::filters::{filter_members, paginate};
use crate::models::{Member, Role, RoleAssignment};
use crate::mutations::{use_mutation_with_policy, Change};
use crate::queries::{use_roles, use_users};
use crate::timers::use_debounced;

const SEARCH_DEBOUNCE_MS: u32 = 300;
const USERS_PER_PAGE: usize = 20;

#[component]
pub fn SecretaryPage() -> impl IntoView {
    let ctx = use_app();

    view! {
        <section class="secretary-page">
            <h1>"Secretaría"</h1>
            <Show
                when=move || ctx.role().is_secretary()
                fallback=|| view! { <p>"Esta sección es solo para secretaría."</p> }
            >
                <UserDirectory />
            </Show>
        </section>
    }
}

#[component]
fn UserDirectory() -> impl IntoView {
    let ctx = use_app();
    let users = use_users();
    let roles = use_roles();
    let (search, set_search) = signal(String::new());
    let term = use_debounced::<String>(Signal::from(search), SEARCH_DEBOUNCE_MS);
    let (page, set_page) = signal(0usize);

    Effect::new(move |_| {
        term.track();
        set_page.set(0);
    });

    // group secretaries assign roles within their own group
    let scope = move || {
        if ctx.role().is_general() {
            None
        } else {
            ctx.session.with(|s| s.as_ref().and_then(|s| s.group_id))
        }
    };

    view! {
        <input
            type="search"
            placeholder="Buscar por nombre, apellido o documento"
            prop:value=move || search.get()
            on:input=move |ev| set_search.set(event_target_value(&ev))
        />
        <QueryView
            query=users
            is_empty=no_items
            empty_text="No hay usuarios"
            render={move |list: Vec<Member>| {
                let visible: Vec<Member> = match scope() {
                    Some(group_id) => list.into_iter().filter(|m| m.group_id == Some(group_id)).collect(),
                    None => list,
                };
                let matching = filter_members(&visible, &term.get());
                if matching.is_empty() {
                    return view! { <EmptyState text="Ningún usuario coincide con la búsqueda" /> }.into_any();
                }
                let current = paginate(&matching, page.get(), USERS_PER_PAGE);
                let number = current.page;
                let (has_prev, has_next) = (current.has_prev(), current.has_next());
                let all_roles = roles.data().unwrap_or_default();
                view! {
                    <table class="user-table">
                        <thead>
                            <tr>
                                <th>"Nombre"</th>
                                <th>"Documento"</th>
                                <th>"Rol"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {current.items.into_iter().map(|member| view! {
                                <UserRow member=member roles=all_roles.clone() group_id=scope() />
                            }).collect_view()}
                        </tbody>
                    </table>
                    <div class="pagination">
                        <button disabled=!has_prev on:click=move |_| set_page.set(number.saturating_sub(1))>
                            "Anterior"
                        </button>
                        <button disabled=!has_next on:click=move |_| set_page.set(number + 1)>
                            "Siguiente"
                        </button>
                    </div>
                }
                .into_any()
            }}
        />
    }
}

#[component]
fn UserRow(member: Member, roles: Vec<Role>, group_id: Option<u32>) -> impl IntoView {
    let user_id = member.user_id;
    let (selected, set_selected) = signal(member.role_id);

    let assign = use_mutation_with_policy(
        |assignment: &RoleAssignment| Change::AssignRole { group_id: assignment.group_id },
        |api, assignment: RoleAssignment| async move { api.assign_role(&assignment).await },
        |_| {},
    );

    let current_role = Role::name_for(member.role_id, &roles).to_string();
    let document = match (&member.document_type, &member.document) {
        (Some(kind), Some(number)) => format!("{} {}", kind, number),
        (None, Some(number)) => number.clone(),
        _ => String::new(),
    };

    view! {
        <tr>
            <td>{member.full_name()}</td>
            <td>{document}</td>
            <td>{current_role}</td>
            <td>
                <select on:change=move |ev| set_selected.set(event_target_value(&ev).parse().ok())>
                    <option value="">"Elegir rol"</option>
                    {roles.into_iter().map(|role| {
                        let is_current = member.role_id == Some(role.id);
                        view! { <option value=role.id.to_string() selected=is_current>{role.name}</option> }
                    }).collect_view()}
                </select>
                <button
                    disabled=move || assign.is_pending() || selected.get().is_none()
                    on:click=move |_| {
                        if let Some(role_id) = selected.get() {
                            assign.dispatch(RoleAssignment { user_id, role_id, group_id });
                        }
                    }
                >
                    "Asignar"
                </button>
            </td>
        </tr>
    }
}
