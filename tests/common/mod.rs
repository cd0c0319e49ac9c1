//! Общие помощники интеграционных тестов: токены бэкенда и клиент поверх mock-сервера.

#![allow(dead_code)]

use cinema_client::api::ApiClient;
use cinema_client::screens::Screens;
use cinema_client::session::{AuthContext, SessionStore};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use wiremock::MockServer;

/// Токен в том виде, в каком его выдаёт бэкенд.
pub fn mint_token(email: &str, role: &str, user_id: i64) -> String {
    encode(
        &Header::default(),
        &json!({"sub": email, "role": role, "userId": user_id, "exp": 4_102_444_800i64}),
        &EncodingKey::from_secret(b"backend-only-secret"),
    )
    .expect("mint token")
}

pub fn client(server: &MockServer) -> ApiClient {
    let auth = AuthContext::new(SessionStore::in_memory());
    ApiClient::new(&server.uri(), auth).expect("build client")
}

/// Клиент с уже установленной сессией.
pub fn client_as(server: &MockServer, role: &str, user_id: i64) -> ApiClient {
    let client = client(server);
    client
        .auth()
        .establish(mint_token("ann@example.com", role, user_id), "ann@example.com")
        .expect("establish session");
    client
}

pub fn screens_as(server: &MockServer, role: &str, user_id: i64) -> Screens {
    Screens::new(client_as(server, role, user_id))
}

pub fn movie_json(id: i64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "genre": "Drama",
        "durationMinutes": 120,
        "releaseDate": "2024-05-01"
    })
}

pub fn showtime_json(id: i64, hall_id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "startTime": "2026-11-02T19:00:00",
        "movie": movie_json(7, "Arrival"),
        "hall": {"id": hall_id, "name": "Red", "totalSeats": 2}
    })
}
