//! Toast Stack

use leptos::prelude::*;

use crate::store::{store_dismiss_toast, use_notifier, ToastKind, ToastStateStoreFields};

#[component]
pub fn Toaster() -> impl IntoView {
    let store = use_notifier().store();

    view! {
        <div class="toaster" role="status">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                    };
                    let id = toast.id;
                    view! {
                        <div class=class>
                            <span class="toast-message">{toast.message}</span>
                            <button
                                class="toast-close"
                                on:click=move |_| store_dismiss_toast(&store, id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
