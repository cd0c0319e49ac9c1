//! HTTP-клиент к REST API кинотеатра.
//!
//! Каждый запрос проходит два шага:
//! 1.  **Запрос**: к адресу добавляется базовый URL, и если есть сессия, то
//!     заголовок `Authorization: Bearer <token>` (кроме эндпоинтов `/auth/*`).
//! 2.  **Ответ**: неуспешный статус превращается в [`ApiError`] с понятным
//!     пользователю текстом, а 401 принудительно завершает сессию.
//!
//! Эндпоинты сгруппированы по ресурсам в подмодулях, каждый добавляет свой
//! `impl ApiClient`.

pub mod auth;
pub mod bookings;
pub mod error;
pub mod halls;
pub mod movies;
pub mod seats;
pub mod showtimes;
pub mod users;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::session::AuthContext;
pub use error::{ApiError, ErrorKind};

#[derive(Clone)]
pub struct ApiClient {
    /// Базовый URL API без завершающего слэша.
    base_url: String,
    /// Асинхронный HTTP-клиент.
    http_client: reqwest::Client,
    /// Текущая сессия; её же видят экраны.
    auth: AuthContext,
}

impl ApiClient {
    pub fn new(base_url: &str, auth: AuthContext) -> Result<Self, ApiError> {
        let timeout = std::time::Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECONDS);
        Self::with_timeout(base_url, timeout, auth)
    }

    /// Создает клиент на основе настроек приложения.
    pub fn from_config(config: &Config, auth: AuthContext) -> Result<Self, ApiError> {
        Self::with_timeout(&config.api_base_url, config.timeout(), auth)
    }

    fn with_timeout(
        base_url: &str,
        timeout: std::time::Duration,
        auth: AuthContext,
    ) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            auth,
        })
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Путь из сегментов с процентным кодированием: `#`, `?` и `/` внутри
    /// значения остаются частью сегмента.
    pub(crate) fn segment_path(&self, segments: &[&str]) -> Result<String, ApiError> {
        let invalid = || ApiError::InvalidUrl(self.base_url.clone());
        let base = reqwest::Url::parse(&self.base_url).map_err(|_| invalid())?;

        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);

        let prefix = base.path().trim_end_matches('/').len();
        Ok(url.path()[prefix..].to_string())
    }

    // Шаг запроса: URL + токен
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http_client.request(method, url);

        if !path.contains("/auth/") {
            if let Some(token) = self.auth.token() {
                builder = builder.bearer_auth(token);
            }
        }
        builder
    }

    // Шаг ответа: нормализация ошибок и выход при 401
    async fn execute(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<Response, ApiError> {
        debug!("{} {}", method, path);

        let response = builder.send().await.map_err(|e| {
            warn!("{} {} failed: {}", method, path, e);
            ApiError::from_transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = error::extract_detail(&body);

        if status == StatusCode::UNAUTHORIZED {
            warn!("{} {} returned 401, logging out", method, path);
            self.auth.logout();
        } else {
            warn!("{} {} returned {}: {:?}", method, path, status, detail);
        }

        Err(ApiError::Http { status, detail })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path);
        let response = self.execute(Method::GET, path, builder).await?;
        Self::decode(response).await
    }

    pub(crate) async fn get_json_with_query<Q, T>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::GET, path).query(query);
        let response = self.execute(Method::GET, path, builder).await?;
        Self::decode(response).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method.clone(), path).json(body);
        let response = self.execute(method, path, builder).await?;
        Self::decode(response).await
    }

    /// Запрос с параметрами в query-строке и пустым телом (так бэкенд принимает
    /// логин, бронирование, смену роли и доступность места).
    pub(crate) async fn send_query<Q: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &Q,
    ) -> Result<Response, ApiError> {
        let builder = self.request(method.clone(), path).query(query);
        self.execute(method, path, builder).await
    }

    /// DELETE; бэкенд отвечает строкой-подтверждением.
    pub(crate) async fn delete_text(&self, path: &str) -> Result<String, ApiError> {
        let builder = self.request(Method::DELETE, path);
        let response = self.execute(Method::DELETE, path, builder).await?;
        response.text().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
}
