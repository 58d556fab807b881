//! Group Endpoints

use reqwest::multipart::Form;
use reqwest::Method;
use serde::Serialize;

use super::events::image_part;
use super::{fetch_json, fetch_list, fetch_or_anonymous, Api};
use crate::error::ApiError;
use crate::models::{
    Decision, FollowStatus, Group, GroupForm, JoinRequest, Member, MessageResponse,
};

#[derive(Serialize)]
struct ResolveRequestArgs {
    #[serde(rename = "usuarioId")]
    user_id: u32,
    #[serde(rename = "accion")]
    decision: Decision,
}

impl Api {
    pub async fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        fetch_list(self.api(Method::GET, "/grupos")).await
    }

    pub async fn get_group(&self, id: u32) -> Result<Group, ApiError> {
        fetch_json(self.api(Method::GET, &format!("/grupos/{}", id))).await
    }

    pub async fn create_group(&self, form: &GroupForm) -> Result<Group, ApiError> {
        let request = self.api(Method::POST, "/grupos").multipart(group_multipart(form));
        fetch_json(request).await
    }

    pub async fn update_group(&self, id: u32, form: &GroupForm) -> Result<Group, ApiError> {
        let request = self
            .api(Method::PUT, &format!("/grupos/{}", id))
            .multipart(group_multipart(form));
        fetch_json(request).await
    }

    /// Ask to follow a group; approval is decided by its secretaries
    pub async fn follow_group(&self, id: u32) -> Result<MessageResponse, ApiError> {
        fetch_json(self.api(Method::POST, &format!("/grupos/seguir/{}", id))).await
    }

    /// Current user's follow state; `None` when not following or anonymous
    pub async fn follow_status(&self, id: u32) -> Result<Option<FollowStatus>, ApiError> {
        let request = self.api(Method::GET, &format!("/grupos/{}/seguimiento", id));
        match fetch_or_anonymous(request, None::<FollowStatus>).await {
            Err(e) if e.status() == Some(404) => Ok(None),
            other => other,
        }
    }

    pub async fn list_join_requests(&self, group_id: u32) -> Result<Vec<JoinRequest>, ApiError> {
        fetch_list(self.api(Method::GET, &format!("/grupos/{}/solicitudes", group_id))).await
    }

    pub async fn resolve_join_request(
        &self,
        group_id: u32,
        user_id: u32,
        decision: Decision,
    ) -> Result<MessageResponse, ApiError> {
        let request = self
            .api(Method::POST, &format!("/grupos/{}/solicitudes", group_id))
            .json(&ResolveRequestArgs { user_id, decision });
        fetch_json(request).await
    }

    pub async fn list_members(&self, group_id: u32) -> Result<Vec<Member>, ApiError> {
        fetch_list(self.api(Method::GET, &format!("/grupos/{}/miembros", group_id))).await
    }
}

fn group_multipart(form: &GroupForm) -> Form {
    let mut multipart = Form::new()
        .text("nombre", form.name.clone())
        .text("descripcion", form.description.clone())
        .text("activo", form.active.to_string());
    if let Some(image) = &form.image {
        multipart = multipart.part("imagen", image_part(image));
    }
    multipart
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_body() {
        let body = serde_json::to_value(ResolveRequestArgs {
            user_id: 8,
            decision: Decision::Reject,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "usuarioId": 8, "accion": "rechazar" }));
    }
}
