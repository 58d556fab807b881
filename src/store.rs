//! Notification Store
//!
//! Uses Leptos reactive_stores for the toast stack shown by `Toaster`.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Toasts currently on screen
#[derive(Clone, Debug, Default, Store)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    /// Last id handed out
    pub next_id: u32,
}

/// Type alias for the store
pub type ToastStore = Store<ToastState>;

// ========================
// Store Helper Functions
// ========================

/// Add a toast, returning its id
pub fn store_push_toast(store: &ToastStore, kind: ToastKind, message: String) -> u32 {
    let next_id = store.next_id();
    let id = {
        let mut guard = next_id.write();
        *guard += 1;
        *guard
    };
    let toasts = store.toasts();
    toasts.write().push(Toast { id, kind, message });
    id
}

/// Remove a toast by ID; unknown ids are ignored
pub fn store_dismiss_toast(store: &ToastStore, id: u32) {
    let toasts = store.toasts();
    toasts.write().retain(|toast| toast.id != id);
}

/// User-visible feedback channel, provided via context
#[derive(Clone, Copy)]
pub struct Notifier {
    store: ToastStore,
    toast_ms: u32,
}

impl Notifier {
    pub fn new(store: ToastStore, toast_ms: u32) -> Self {
        Self { store, toast_ms }
    }

    pub fn store(&self) -> ToastStore {
        self.store
    }

    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        info!(%message, "success toast");
        self.show(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        warn!(%message, "error toast");
        self.show(ToastKind::Error, message);
    }

    fn show(&self, kind: ToastKind, message: String) {
        let id = store_push_toast(&self.store, kind, message);
        let store = self.store;
        let delay = self.toast_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            store_dismiss_toast(&store, id);
        });
    }
}

/// Get the notifier from context
pub fn use_notifier() -> Notifier {
    expect_context::<Notifier>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let store = Store::new(ToastState::default());
        let first = store_push_toast(&store, ToastKind::Success, "Inscripción realizada".to_string());
        let second = store_push_toast(&store, ToastKind::Error, "Cupo completo".to_string());
        assert_ne!(first, second);
        assert_eq!(store.toasts().get_untracked().len(), 2);

        store_dismiss_toast(&store, first);
        let remaining = store.toasts().get_untracked();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].message, "Cupo completo");
        assert_eq!(remaining[0].kind, ToastKind::Error);

        store_dismiss_toast(&store, 999);
        assert_eq!(store.toasts().get_untracked().len(), 1);
    }
}
