//! Group Administration
//!
//! Pending join requests and the member list of one group.

use leptos::prelude::*;

use crate::components::{no_items, EmptyState, QueryView};
use crate::context::use_app;
use crate::dates::format_date;
use crate::filters::filter_members;
use crate::models::{Decision, JoinRequest, Member, SubscriptionStatus};
use crate::mutations::{use_mutation_with_policy, Change};
use crate::queries::{use_group, use_join_requests, use_members};

#[component]
pub fn GroupAdmin(id: u32) -> impl IntoView {
    let ctx = use_app();
    let group = use_group(move || Some(id));

    view! {
        <section class="group-admin">
            <h1>{move || group.data().map(|g| g.name).unwrap_or_else(|| "Grupo".to_string())}</h1>
            <Show
                when=move || ctx.can_manage_group(id)
                fallback=|| view! { <p>"No tenés permisos para administrar este grupo."</p> }
            >
                <JoinRequests group_id=id />
                <Members group_id=id />
            </Show>
        </section>
    }
}

#[component]
fn JoinRequests(group_id: u32) -> impl IntoView {
    let requests = use_join_requests(move || Some(group_id));
    let resolve = use_mutation_with_policy(
        move |(_, decision): &(u32, Decision)| Change::ResolveJoinRequest { group_id, decision: *decision },
        move |api, (user_id, decision): (u32, Decision)| async move {
            api.resolve_join_request(group_id, user_id, decision).await
        },
        |_| {},
    );

    view! {
        <div class="join-requests">
            <h2>"Solicitudes pendientes"</h2>
            <QueryView
                query=requests
                is_empty={|list: &Vec<JoinRequest>| !list.iter().any(|r| r.status == SubscriptionStatus::Pending)}
                empty_text="No hay solicitudes pendientes"
                render={move |list: Vec<JoinRequest>| view! {
                    <ul>
                        {list.into_iter().filter(|r| r.status == SubscriptionStatus::Pending).map(|request| {
                            let user_id = request.user_id;
                            let name = match &request.surname {
                                Some(surname) => format!("{} {}", request.name, surname),
                                None => request.name.clone(),
                            };
                            view! {
                                <li class="join-request">
                                    <span>{name}</span>
                                    {request.requested_at.map(|d| view! { <small>{format_date(&d)}</small> })}
                                    <button
                                        disabled=move || resolve.is_pending()
                                        on:click=move |_| resolve.dispatch((user_id, Decision::Approve))
                                    >
                                        "Aprobar"
                                    </button>
                                    <button
                                        disabled=move || resolve.is_pending()
                                        on:click=move |_| resolve.dispatch((user_id, Decision::Reject))
                                    >
                                        "Rechazar"
                                    </button>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                }}
            />
        </div>
    }
}

#[component]
fn Members(group_id: u32) -> impl IntoView {
    let members = use_members(move || Some(group_id));
    let (search, set_search) = signal(String::new());

    view! {
        <div class="members">
            <h2>"Miembros"</h2>
            <input
                type="search"
                placeholder="Buscar por nombre o documento"
                prop:value=move || search.get()
                on:input=move |ev| set_search.set(event_target_value(&ev))
            />
            <QueryView
                query=members
                is_empty=no_items
                empty_text="El grupo no tiene miembros"
                render={move |list: Vec<Member>| {
                    let matching = filter_members(&list, &search.get());
                    if matching.is_empty() {
                        return view! { <EmptyState text="Ningún miembro coincide con la búsqueda" /> }.into_any();
                    }
                    view! {
                        <ul class="member-list">
                            {matching.into_iter().map(|m| view! {
                                <li>
                                    {m.full_name()}
                                    {m.document.map(|d| view! { <small>{d}</small> })}
                                </li>
                            }).collect_view()}
                        </ul>
                    }
                    .into_any()
                }}
            />
        </div>
    }
}
