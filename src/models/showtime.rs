use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Hall, Movie};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Showtime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub start_time: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie: Option<Box<Movie>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall: Option<Hall>,
}

impl Showtime {
    pub fn hall_id(&self) -> Option<i64> {
        self.hall.as_ref().and_then(|h| h.id)
    }

    pub fn movie_title(&self) -> &str {
        self.movie.as_ref().map(|m| m.title.as_str()).unwrap_or("Unknown movie")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddShowtimeRequest {
    pub start_time: NaiveDateTime,
    pub movie_id: i64,
    pub hall_id: i64,
}

// Бэкенд ожидает сеанс с вложенными ссылками: {"startTime", "movie": {"id"}, "hall": {"id"}}
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShowtimePayload {
    start_time: NaiveDateTime,
    movie: IdRef,
    hall: IdRef,
}

#[derive(Serialize)]
struct IdRef {
    id: i64,
}

impl From<&AddShowtimeRequest> for ShowtimePayload {
    fn from(req: &AddShowtimeRequest) -> Self {
        ShowtimePayload {
            start_time: req.start_time,
            movie: IdRef { id: req.movie_id },
            hall: IdRef { id: req.hall_id },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn payload_nests_movie_and_hall_ids() {
        let req = AddShowtimeRequest {
            start_time: NaiveDate::from_ymd_opt(2026, 11, 2)
                .unwrap()
                .and_hms_opt(19, 30, 0)
                .unwrap(),
            movie_id: 3,
            hall_id: 5,
        };
        let json = serde_json::to_value(ShowtimePayload::from(&req)).unwrap();
        assert_eq!(json["startTime"], "2026-11-02T19:30:00");
        assert_eq!(json["movie"]["id"], 3);
        assert_eq!(json["hall"]["id"], 5);
    }

    #[test]
    fn nested_backend_showtime_parses() {
        let showtime: Showtime = serde_json::from_str(
            r#"{"id":1,"startTime":"2026-11-02T19:30:00",
                "movie":{"id":3,"title":"Heat","genre":"Crime","durationMinutes":170,"releaseDate":"1995-12-15"},
                "hall":{"id":5,"name":"IMAX","totalSeats":120}}"#,
        )
        .unwrap();
        assert_eq!(showtime.hall_id(), Some(5));
        assert_eq!(showtime.movie_title(), "Heat");
    }
}
