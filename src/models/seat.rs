use serde::{Deserialize, Serialize};

use super::Hall;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub seat_number: String,
    // Бэкенд может отдавать флаг как `available` или `isAvailable`
    #[serde(default = "default_available", alias = "isAvailable")]
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall: Option<Hall>,
}

fn default_available() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_accepts_both_field_names() {
        let a: Seat = serde_json::from_str(r#"{"id":1,"seatNumber":"A1","available":false}"#).unwrap();
        let b: Seat = serde_json::from_str(r#"{"id":2,"seatNumber":"A2","isAvailable":false}"#).unwrap();
        let c: Seat = serde_json::from_str(r#"{"id":3,"seatNumber":"A3"}"#).unwrap();
        assert!(!a.available);
        assert!(!b.available);
        assert!(c.available);
    }
}
