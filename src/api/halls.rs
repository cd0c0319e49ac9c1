use reqwest::Method;

use super::{ApiClient, ApiError};
use crate::models::{AddHallRequest, Hall, Seat};

impl ApiClient {
    pub async fn get_all_halls(&self) -> Result<Vec<Hall>, ApiError> {
        self.get_json("/halls/all").await
    }

    pub async fn get_hall(&self, id: i64) -> Result<Hall, ApiError> {
        self.get_json(&format!("/halls/{}", id)).await
    }

    pub async fn add_hall(&self, hall: &AddHallRequest) -> Result<Hall, ApiError> {
        self.send_json(Method::POST, "/halls/add", hall).await
    }

    pub async fn update_hall(&self, id: i64, hall: &AddHallRequest) -> Result<Hall, ApiError> {
        self.send_json(Method::PUT, &format!("/halls/{}", id), hall).await
    }

    pub async fn delete_hall(&self, id: i64) -> Result<String, ApiError> {
        self.delete_text(&format!("/halls/{}", id)).await
    }

    pub async fn get_seats_for_hall(&self, hall_id: i64) -> Result<Vec<Seat>, ApiError> {
        self.get_json(&format!("/halls/{}/seats", hall_id)).await
    }
}
