//! Frontend Models
//!
//! Data structures matching the remote API's records. The API owns these;
//! nothing here enforces their invariants.

use serde::{Deserialize, Serialize};

/// Event data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "lugar", default)]
    pub place: Option<String>,
    #[serde(rename = "cupo", default)]
    pub capacity: u32,
    #[serde(rename = "inscritos", default)]
    pub registered: u32,
    #[serde(rename = "cupoSuplentes", default)]
    pub waitlist_capacity: u32,
    #[serde(rename = "suplentes", default)]
    pub waitlisted: u32,
    #[serde(rename = "fechaLimiteInscripcion", default)]
    pub registration_deadline: Option<String>,
    #[serde(rename = "fechaLimiteBaja", default)]
    pub withdrawal_deadline: Option<String>,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(rename = "cancelado", default)]
    pub cancelled: bool,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "grupoId", default)]
    pub group_id: Option<u32>,
}

impl Event {
    /// Primary places are all taken
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.registered >= self.capacity
    }

    pub fn free_places(&self) -> u32 {
        self.capacity.saturating_sub(self.registered)
    }
}

/// Group data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: u32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// Registrant of an event or member of a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "usuarioId")]
    pub user_id: u32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido", default)]
    pub surname: Option<String>,
    #[serde(rename = "tipoDocumento", default)]
    pub document_type: Option<String>,
    #[serde(rename = "documento", default)]
    pub document: Option<String>,
    #[serde(rename = "rolId", default)]
    pub role_id: Option<u32>,
    #[serde(rename = "grupoId", default)]
    pub group_id: Option<u32>,
    #[serde(rename = "esSuplente", default)]
    pub waitlisted: bool,
}

impl Member {
    pub fn full_name(&self) -> String {
        match &self.surname {
            Some(surname) if !surname.is_empty() => format!("{} {}", self.name, surname),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: u32,
    #[serde(rename = "nombre")]
    pub name: String,
}

impl Role {
    /// Resolve a member's role id against the roles list
    pub fn name_for(role_id: Option<u32>, roles: &[Role]) -> &str {
        role_id
            .and_then(|id| roles.iter().find(|role| role.id == id))
            .map(|role| role.name.as_str())
            .unwrap_or("Sin rol")
    }
}

/// News item ("noticia")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct News {
    pub id: u32,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "fijada", default)]
    pub pinned: bool,
    #[serde(rename = "fijadaHasta", default)]
    pub pinned_until: Option<String>,
}

/// Pending request to join a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRequest {
    #[serde(rename = "usuarioId")]
    pub user_id: u32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido", default)]
    pub surname: Option<String>,
    #[serde(rename = "estado", default)]
    pub status: SubscriptionStatus,
    #[serde(rename = "fechaSolicitud", default)]
    pub requested_at: Option<String>,
}

/// Follow/subscription state of a user–group pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SubscriptionStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "aprobada")]
    Approved,
    #[serde(rename = "rechazada")]
    Rejected,
}

impl SubscriptionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "Solicitud pendiente",
            SubscriptionStatus::Approved => "Siguiendo",
            SubscriptionStatus::Rejected => "Solicitud rechazada",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowStatus {
    #[serde(rename = "estado")]
    pub status: SubscriptionStatus,
}

/// Answer of the registration check endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RegistrationStatus {
    #[serde(rename = "inscrito")]
    pub registered: bool,
    #[serde(rename = "esSuplente", default)]
    pub waitlisted: bool,
    #[serde(rename = "ordenSuplente", default)]
    pub waitlist_position: Option<u32>,
}

impl RegistrationStatus {
    pub fn not_registered() -> Self {
        Self::default()
    }
}

/// Role held by the logged-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    #[default]
    Member,
    GroupSecretary,
    GeneralSecretary,
    Admin,
}

impl UserRole {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "admin" | "administrador" => UserRole::Admin,
            "secretaria general" | "secretaria_general" => UserRole::GeneralSecretary,
            "secretaria grupal" | "secretaria_grupal" => UserRole::GroupSecretary,
            _ => UserRole::Member,
        }
    }

    /// May manage events and news
    pub fn is_secretary(&self) -> bool {
        !matches!(self, UserRole::Member)
    }

    /// May assign roles across every group
    pub fn is_general(&self) -> bool {
        matches!(self, UserRole::GeneralSecretary | UserRole::Admin)
    }
}

/// Authenticated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "usuarioId")]
    pub user_id: u32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "rol", default)]
    pub role: String,
    #[serde(rename = "grupoId", default)]
    pub group_id: Option<u32>,
}

impl Session {
    pub fn role(&self) -> UserRole {
        UserRole::from_name(&self.role)
    }

    /// Group secretaries administer only their own group
    pub fn can_manage_group(&self, group_id: u32) -> bool {
        match self.role() {
            UserRole::Member => false,
            UserRole::GroupSecretary => self.group_id == Some(group_id),
            UserRole::GeneralSecretary | UserRole::Admin => true,
        }
    }
}

/// Generic `{message}` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

// ========================
// Request bodies
// ========================

/// Fields of the create/edit event form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventForm {
    pub name: String,
    pub description: String,
    pub date: String,
    pub place: String,
    pub capacity: u32,
    pub waitlist_capacity: u32,
    pub registration_deadline: String,
    pub withdrawal_deadline: String,
    pub category: String,
    pub group_id: Option<u32>,
    pub image: Option<ImageUpload>,
}

impl EventForm {
    pub fn from_event(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            description: event.description.clone().unwrap_or_default(),
            date: event.date.clone(),
            place: event.place.clone().unwrap_or_default(),
            capacity: event.capacity,
            waitlist_capacity: event.waitlist_capacity,
            registration_deadline: event.registration_deadline.clone().unwrap_or_default(),
            withdrawal_deadline: event.withdrawal_deadline.clone().unwrap_or_default(),
            category: event.category.clone().unwrap_or_default(),
            group_id: event.group_id,
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupForm {
    pub name: String,
    pub description: String,
    pub active: bool,
    pub image: Option<ImageUpload>,
}

/// File picked in a form, read into memory for multipart upload
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct NewsForm {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "fijada")]
    pub pinned: bool,
    #[serde(rename = "fijadaHasta", skip_serializing_if = "Option::is_none")]
    pub pinned_until: Option<String>,
}

impl NewsForm {
    pub fn from_news(news: &News) -> Self {
        Self {
            title: news.title.clone(),
            description: news.description.clone(),
            pinned: news.pinned,
            pinned_until: news.pinned_until.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido")]
    pub surname: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "tipoDocumento")]
    pub document_type: String,
    #[serde(rename = "documento")]
    pub document: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoleAssignment {
    #[serde(rename = "usuarioId")]
    pub user_id: u32,
    #[serde(rename = "rolId")]
    pub role_id: u32,
    #[serde(rename = "grupoId", skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u32>,
}

/// Answer to a join request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decision {
    #[serde(rename = "aprobar")]
    Approve,
    #[serde(rename = "rechazar")]
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_decodes_with_missing_optionals() {
        let event: Event = serde_json::from_value(json!({
            "id": 7,
            "nombre": "Salida al Aconcagua",
            "fecha": "2025-03-10T08:00:00Z",
            "cupo": 20,
            "inscritos": 20,
            "campoDesconocido": true
        }))
        .unwrap();
        assert_eq!(event.name, "Salida al Aconcagua");
        assert!(event.is_full());
        assert_eq!(event.free_places(), 0);
        assert!(!event.cancelled);
        assert_eq!(event.registration_deadline, None);
    }

    #[test]
    fn test_role_name_lookup() {
        let roles = vec![
            Role { id: 1, name: "Socio".to_string() },
            Role { id: 2, name: "Secretaria grupal".to_string() },
        ];
        assert_eq!(Role::name_for(Some(2), &roles), "Secretaria grupal");
        assert_eq!(Role::name_for(Some(9), &roles), "Sin rol");
        assert_eq!(Role::name_for(None, &roles), "Sin rol");
    }

    #[test]
    fn test_session_group_scope() {
        let session = Session {
            user_id: 1,
            name: "Ana".to_string(),
            role: "Secretaria grupal".to_string(),
            group_id: Some(4),
        };
        assert_eq!(session.role(), UserRole::GroupSecretary);
        assert!(session.can_manage_group(4));
        assert!(!session.can_manage_group(5));
        assert!(!session.role().is_general());
    }

    #[test]
    fn test_registration_status_decodes_waitlist() {
        let status: RegistrationStatus = serde_json::from_value(json!({
            "inscrito": true,
            "esSuplente": true,
            "ordenSuplente": 3
        }))
        .unwrap();
        assert!(status.registered && status.waitlisted);
        assert_eq!(status.waitlist_position, Some(3));

        let status: RegistrationStatus = serde_json::from_value(json!({ "inscrito": false })).unwrap();
        assert_eq!(status, RegistrationStatus::not_registered());
    }

    #[test]
    fn test_decision_wire_names() {
        assert_eq!(serde_json::to_value(Decision::Approve).unwrap(), json!("aprobar"));
        assert_eq!(
            serde_json::to_value(SubscriptionStatus::Rejected).unwrap(),
            json!("rechazada")
        );
    }
}
