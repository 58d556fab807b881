//! UI Components
//!
//! Pages and reusable Leptos components.

mod auth;
mod delete_confirm_button;
mod event_detail;
mod event_form;
mod events_page;
mod group_admin;
mod groups_page;
mod image_input;
mod nav_bar;
mod news_page;
mod query_view;
mod secretary_page;
mod toaster;

pub use auth::{LoginForm, LogoutButton, RegisterForm};
pub use delete_confirm_button::DeleteConfirmButton;
pub use event_detail::EventDetail;
pub use event_form::EventEditor;
pub use events_page::{EventCard, EventsPage};
pub use group_admin::GroupAdmin;
pub use groups_page::GroupsPage;
pub use image_input::ImageInput;
pub use nav_bar::NavBar;
pub use news_page::NewsPage;
pub use query_view::{no_items, EmptyState, QueryView};
pub use secretary_page::SecretaryPage;
pub use toaster::Toaster;
