//! Login, Registration and Logout
//!
//! Session state is never stored here: a successful login or logout
//! invalidates the session query and every view re-reads it.

use leptos::prelude::*;

use crate::context::{use_app, Page};
use crate::models::{Credentials, Registration};
use crate::mutations::{use_mutation_with_policy, Change};

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let login = use_mutation_with_policy(
        |_: &Credentials| Change::Login,
        |api, credentials: Credentials| async move { api.login(&credentials).await },
        move |_| ctx.navigate(Page::Events),
    );

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let credentials = Credentials {
            email: email.get().trim().to_string(),
            password: password.get(),
        };
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return;
        }
        login.dispatch(credentials);
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <h2>"Ingresar"</h2>
            <input
                type="email"
                placeholder="Email"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Contraseña"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || login.is_pending()>
                {move || if login.is_pending() { "Ingresando..." } else { "Ingresar" }}
            </button>
            <p class="auth-switch">
                "¿No tenés cuenta? "
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    ctx.navigate(Page::Register);
                }>"Registrate"</a>
            </p>
        </form>
    }
}

#[component]
pub fn RegisterForm() -> impl IntoView {
    let ctx = use_app();
    let (name, set_name) = signal(String::new());
    let (surname, set_surname) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (document_type, set_document_type) = signal(String::from("DNI"));
    let (document, set_document) = signal(String::new());

    let register = use_mutation_with_policy(
        |_: &Registration| Change::RegisterAccount,
        |api, registration: Registration| async move { api.register(&registration).await },
        move |_| ctx.navigate(Page::Login),
    );

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let registration = Registration {
            name: name.get().trim().to_string(),
            surname: surname.get().trim().to_string(),
            email: email.get().trim().to_string(),
            password: password.get(),
            document_type: document_type.get(),
            document: document.get().trim().to_string(),
        };
        if registration.name.is_empty() || registration.email.is_empty() || registration.password.is_empty() {
            return;
        }
        register.dispatch(registration);
    };

    let text_field = move |placeholder: &'static str, value: ReadSignal<String>, set: WriteSignal<String>| {
        view! {
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| set.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <h2>"Crear cuenta"</h2>
            {text_field("Nombre", name, set_name)}
            {text_field("Apellido", surname, set_surname)}
            <input
                type="email"
                placeholder="Email"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Contraseña"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <select on:change=move |ev| set_document_type.set(event_target_value(&ev))>
                <option value="DNI" selected=true>"DNI"</option>
                <option value="Pasaporte">"Pasaporte"</option>
                <option value="CI">"CI"</option>
            </select>
            {text_field("Número de documento", document, set_document)}
            <button type="submit" disabled=move || register.is_pending()>
                "Registrarme"
            </button>
        </form>
    }
}

#[component]
pub fn LogoutButton() -> impl IntoView {
    let ctx = use_app();
    let logout = use_mutation_with_policy(
        |_: &()| Change::Logout,
        |api, _: ()| async move { api.logout().await },
        move |_| ctx.navigate(Page::Events),
    );

    view! {
        <button
            class="logout-btn"
            disabled=move || logout.is_pending()
            on:click=move |_| logout.dispatch(())
        >
            "Salir"
        </button>
    }
}
