use reqwest::Method;
use serde::Serialize;
use tracing::{error, info};

use super::{ApiClient, ApiError};
use crate::models::User;

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Логин: бэкенд принимает email/пароль в query и отвечает строкой-токеном.
    /// Токен декодируется и сохраняется как текущая сессия.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        match self.request_token(email, password).await {
            Ok(token) => Ok(self.auth().establish(token, email)?),
            Err(e) => {
                // Частичные данные авторизации не оставляем
                error!("Login failed: {}", e);
                self.auth().logout();
                Err(e)
            }
        }
    }

    async fn request_token(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .send_query(Method::POST, "/auth/login", &Credentials { email, password })
            .await?;
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(body.trim().trim_matches('"').to_string())
    }

    /// Регистрация. Клиент после неё не аутентифицирован - нужен отдельный логин.
    pub async fn register(&self, user: &User) -> Result<User, ApiError> {
        let registered: User = self.send_json(Method::POST, "/auth/register", user).await?;
        info!("Registration successful. User: {}", registered.email);
        Ok(registered)
    }

    pub fn logout(&self) {
        self.auth().logout();
    }
}
