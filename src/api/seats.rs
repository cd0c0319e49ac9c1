use reqwest::Method;
use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::models::Seat;

#[derive(Serialize)]
struct AvailabilityQuery {
    available: bool,
}

impl ApiClient {
    pub async fn get_available_seats(&self, hall_id: i64) -> Result<Vec<Seat>, ApiError> {
        self.get_json(&format!("/seats/available/{}", hall_id)).await
    }

    pub async fn update_seat_availability(
        &self,
        seat_id: i64,
        available: bool,
    ) -> Result<Seat, ApiError> {
        let response = self
            .send_query(
                Method::PUT,
                &format!("/seats/{}/availability", seat_id),
                &AvailabilityQuery { available },
            )
            .await?;
        Self::decode(response).await
    }
}
