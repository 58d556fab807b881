//! Event Endpoints
//!
//! Listing, detail, management and inscription of events.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;

use super::{fetch_json, fetch_list, fetch_or_anonymous, Api};
use crate::error::ApiError;
use crate::models::{Event, EventForm, ImageUpload, Member, MessageResponse, RegistrationStatus};

/// Which event list to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventFilter {
    #[default]
    All,
    Current,
    Past,
    Cancelled,
}

impl EventFilter {
    pub const ALL: [EventFilter; 4] = [
        EventFilter::All,
        EventFilter::Current,
        EventFilter::Past,
        EventFilter::Cancelled,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            EventFilter::All => "/eventos",
            EventFilter::Current => "/eventos-vigentes",
            EventFilter::Past => "/eventos-transcurridos",
            EventFilter::Cancelled => "/eventos-cancelados",
        }
    }

    /// Cache key parameter
    pub fn slug(&self) -> &'static str {
        match self {
            EventFilter::All => "todos",
            EventFilter::Current => "vigentes",
            EventFilter::Past => "transcurridos",
            EventFilter::Cancelled => "cancelados",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventFilter::All => "Todos",
            EventFilter::Current => "Vigentes",
            EventFilter::Past => "Transcurridos",
            EventFilter::Cancelled => "Cancelados",
        }
    }
}

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct EventIdArgs {
    #[serde(rename = "eventoId")]
    event_id: u32,
}

// ========================
// Commands
// ========================

impl Api {
    pub async fn list_events(&self, filter: EventFilter) -> Result<Vec<Event>, ApiError> {
        fetch_list(self.api(Method::GET, filter.path())).await
    }

    pub async fn get_event(&self, id: u32) -> Result<Event, ApiError> {
        fetch_json(self.api(Method::GET, &format!("/eventos/{}", id))).await
    }

    pub async fn create_event(&self, form: &EventForm) -> Result<Event, ApiError> {
        let request = self.api(Method::POST, "/eventos").multipart(event_multipart(form));
        fetch_json(request).await
    }

    pub async fn update_event(&self, id: u32, form: &EventForm) -> Result<Event, ApiError> {
        let request = self
            .api(Method::PUT, &format!("/eventos/{}", id))
            .multipart(event_multipart(form));
        fetch_json(request).await
    }

    pub async fn cancel_event(&self, id: u32) -> Result<MessageResponse, ApiError> {
        fetch_json(self.api(Method::PUT, &format!("/eventos/{}/cancelar", id))).await
    }

    pub async fn delete_event(&self, id: u32) -> Result<MessageResponse, ApiError> {
        fetch_json(self.api(Method::DELETE, &format!("/eventos/{}", id))).await
    }

    pub async fn register_for_event(&self, event_id: u32) -> Result<MessageResponse, ApiError> {
        let request = self
            .api(Method::POST, "/eventos/inscripcion")
            .json(&EventIdArgs { event_id });
        fetch_json(request).await
    }

    pub async fn unregister_from_event(&self, event_id: u32) -> Result<MessageResponse, ApiError> {
        let request = self
            .api(Method::DELETE, "/eventos/mi-baja")
            .json(&EventIdArgs { event_id });
        fetch_json(request).await
    }

    /// Whether the current user is registered; anonymous visitors are not
    pub async fn check_registration(&self, event_id: u32) -> Result<RegistrationStatus, ApiError> {
        let request = self
            .api(Method::POST, "/eventos/verificar-inscripcion")
            .json(&EventIdArgs { event_id });
        fetch_or_anonymous(request, RegistrationStatus::not_registered()).await
    }

    /// Registration including waitlist position
    pub async fn registration_details(
        &self,
        event_id: u32,
    ) -> Result<RegistrationStatus, ApiError> {
        let request = self
            .api(Method::POST, "/eventos/detalles-inscripcion")
            .json(&EventIdArgs { event_id });
        fetch_or_anonymous(request, RegistrationStatus::not_registered()).await
    }

    pub async fn list_registrants(&self, event_id: u32) -> Result<Vec<Member>, ApiError> {
        fetch_list(self.api(Method::GET, &format!("/eventos/{}/inscritos", event_id))).await
    }
}

fn event_multipart(form: &EventForm) -> Form {
    let mut multipart = Form::new()
        .text("nombre", form.name.clone())
        .text("descripcion", form.description.clone())
        .text("fecha", form.date.clone())
        .text("lugar", form.place.clone())
        .text("cupo", form.capacity.to_string())
        .text("cupoSuplentes", form.waitlist_capacity.to_string())
        .text("fechaLimiteInscripcion", form.registration_deadline.clone())
        .text("fechaLimiteBaja", form.withdrawal_deadline.clone())
        .text("categoria", form.category.clone());
    if let Some(group_id) = form.group_id {
        multipart = multipart.text("grupoId", group_id.to_string());
    }
    if let Some(image) = &form.image {
        multipart = multipart.part("imagen", image_part(image));
    }
    multipart
}

/// File part; an unparseable mime type is left for the server to sniff
pub(super) fn image_part(image: &ImageUpload) -> Part {
    let part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
    match part.mime_str(&image.mime) {
        Ok(part) => part,
        Err(_) => Part::bytes(image.bytes.clone()).file_name(image.file_name.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_paths() {
        assert_eq!(EventFilter::All.path(), "/eventos");
        assert_eq!(EventFilter::Current.path(), "/eventos-vigentes");
        assert_eq!(EventFilter::Past.path(), "/eventos-transcurridos");
        assert_eq!(EventFilter::Cancelled.path(), "/eventos-cancelados");
    }

    #[test]
    fn test_filter_slugs_are_distinct() {
        let mut slugs: Vec<_> = EventFilter::ALL.iter().map(|f| f.slug()).collect();
        slugs.dedup();
        assert_eq!(slugs.len(), 4);
    }

    #[test]
    fn test_event_id_body() {
        let body = serde_json::to_value(EventIdArgs { event_id: 5 }).unwrap();
        assert_eq!(body, serde_json::json!({ "eventoId": 5 }));
    }
}
