use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Showtime, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showtime: Option<Showtime>,
    pub seat_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub price: f64,
}

/// Параметры бронирования. Бэкенд принимает их как query-параметры.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSeatRequest {
    pub user_id: i64,
    pub showtime_id: i64,
    pub seat_number: String,
    pub price: f64,
}

/// Правка брони администратором: отправляются только заданные поля.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl BookingOverride {
    pub fn is_empty(&self) -> bool {
        self.seat_number.is_none() && self.price.is_none()
    }
}
