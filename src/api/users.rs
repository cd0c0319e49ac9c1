use reqwest::Method;
use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::models::{Role, User};

#[derive(Serialize)]
struct RoleQuery {
    role: Role,
}

/// Эндпоинты управления пользователями (только для администратора).
impl ApiClient {
    pub async fn get_all_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/users/all").await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ApiError> {
        self.get_json(&format!("/users/{}", id)).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User, ApiError> {
        let path = self.segment_path(&["users", "email", email])?;
        self.get_json(&path).await
    }

    pub async fn update_user_role(&self, id: i64, role: Role) -> Result<User, ApiError> {
        let response = self
            .send_query(Method::PUT, &format!("/users/{}/role", id), &RoleQuery { role })
            .await?;
        Self::decode(response).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<String, ApiError> {
        self.delete_text(&format!("/users/{}", id)).await
    }
}
