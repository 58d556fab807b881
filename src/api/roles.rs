//! Role Endpoints

use reqwest::Method;

use super::{fetch_json, fetch_list, Api};
use crate::error::ApiError;
use crate::models::{Member, MessageResponse, Role, RoleAssignment};

impl Api {
    pub async fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        fetch_list(self.api(Method::GET, "/roles")).await
    }

    pub async fn assign_role(
        &self,
        assignment: &RoleAssignment,
    ) -> Result<MessageResponse, ApiError> {
        fetch_json(self.api(Method::PUT, "/roles/asignar").json(assignment)).await
    }

    /// Users eligible for role assignment
    pub async fn list_users(&self) -> Result<Vec<Member>, ApiError> {
        fetch_list(self.api(Method::GET, "/usuarios")).await
    }
}
