use reqwest::Method;

use super::{ApiClient, ApiError};
use crate::models::showtime::ShowtimePayload;
use crate::models::{AddShowtimeRequest, Showtime};

impl ApiClient {
    pub async fn get_upcoming_showtimes(&self) -> Result<Vec<Showtime>, ApiError> {
        self.get_json("/showtimes/upcoming").await
    }

    pub async fn get_showtimes_by_movie(&self, movie_id: i64) -> Result<Vec<Showtime>, ApiError> {
        self.get_json(&format!("/showtimes/movie/{}", movie_id)).await
    }

    pub async fn get_showtime(&self, id: i64) -> Result<Showtime, ApiError> {
        self.get_json(&format!("/showtimes/{}", id)).await
    }

    pub async fn add_showtime(&self, showtime: &AddShowtimeRequest) -> Result<Showtime, ApiError> {
        self.send_json(Method::POST, "/showtimes/add", &ShowtimePayload::from(showtime))
            .await
    }

    pub async fn update_showtime(&self, id: i64, showtime: &AddShowtimeRequest) -> Result<Showtime, ApiError> {
        self.send_json(
            Method::PUT,
            &format!("/showtimes/{}", id),
            &ShowtimePayload::from(showtime),
        )
        .await
    }

    pub async fn delete_showtime(&self, id: i64) -> Result<String, ApiError> {
        self.delete_text(&format!("/showtimes/{}", id)).await
    }
}
