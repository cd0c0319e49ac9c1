use reqwest::Method;

use super::{ApiClient, ApiError};
use crate::models::{BookSeatRequest, Booking, BookingOverride};

impl ApiClient {
    pub async fn book_seat(&self, booking: &BookSeatRequest) -> Result<Booking, ApiError> {
        let response = self.send_query(Method::POST, "/bookings/book", booking).await?;
        Self::decode(response).await
    }

    pub async fn get_user_bookings(&self, user_id: i64) -> Result<Vec<Booking>, ApiError> {
        self.get_json(&format!("/bookings/user/{}", user_id)).await
    }

    // Только для администратора
    pub async fn get_all_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.get_json("/bookings/all").await
    }

    pub async fn get_booking(&self, id: i64) -> Result<Booking, ApiError> {
        self.get_json(&format!("/bookings/{}", id)).await
    }

    pub async fn update_booking(&self, id: i64, changes: &BookingOverride) -> Result<Booking, ApiError> {
        self.send_json(Method::PUT, &format!("/bookings/{}", id), changes).await
    }

    pub async fn delete_booking(&self, id: i64) -> Result<String, ApiError> {
        self.delete_text(&format!("/bookings/{}", id)).await
    }
}
