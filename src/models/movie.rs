use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Showtime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub duration_minutes: i32,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showtimes: Option<Vec<Showtime>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMovieRequest {
    pub title: String,
    pub genre: String,
    pub duration_minutes: i32,
    pub release_date: NaiveDate,
}
