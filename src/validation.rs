//! Проверка форм на клиенте. Сообщение берётся у первого нарушенного правила
//! в порядке полей формы, как на экранах веб-клиента.

use chrono::{NaiveDate, NaiveDateTime};
use std::borrow::Cow;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{AddHallRequest, AddMovieRequest, AddShowtimeRequest, BookSeatRequest, Role, User};

pub const FILL_ALL_FIELDS: &str = "Please fill in all fields";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FormError(pub String);

/// Первое нарушение по списку (поле, код правила).
fn first_failure(errors: &ValidationErrors, order: &[(&str, &str)]) -> FormError {
    let fields = errors.field_errors();
    for (field, code) in order {
        let hit = fields
            .get(*field)
            .and_then(|errs| errs.iter().find(|e| e.code == *code));
        if let Some(err) = hit {
            if let Some(message) = &err.message {
                return FormError(message.to_string());
            }
        }
    }

    fields
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .map(FormError)
        .unwrap_or_else(|| FormError("Please check your input".to_string()))
}

fn fail(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn valid_release_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_date(value).is_some() {
        Ok(())
    } else {
        Err(fail("date", "Please enter a valid release date (YYYY-MM-DD)"))
    }
}

fn valid_start_time(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_start_time(value).is_some() {
        Ok(())
    } else {
        Err(fail("datetime", "Please enter a valid start time (YYYY-MM-DDTHH:MM)"))
    }
}

fn min_password_length(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.chars().count() >= 6 {
        Ok(())
    } else {
        Err(fail("password_length", "Password must be at least 6 characters"))
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Время сеанса: формат поля datetime-local, с секундами или без.
pub fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    let value = value.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/* ---------- auth ---------- */

#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    #[validate(
        length(min = 1, code = "required", message = "Please fill in all fields"),
        contains(pattern = "@", message = "Please enter a valid email address")
    )]
    pub email: String,
    #[validate(length(min = 1, code = "required", message = "Please fill in all fields"))]
    pub password: String,
}

impl LoginForm {
    pub fn check(&self) -> Result<(), FormError> {
        self.validate().map_err(|e| {
            first_failure(
                &e,
                &[("email", "required"), ("password", "required"), ("email", "contains")],
            )
        })
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, code = "required", message = "Please fill in all fields"))]
    pub name: String,
    #[validate(
        length(min = 1, code = "required", message = "Please fill in all fields"),
        contains(pattern = "@", message = "Please enter a valid email address")
    )]
    pub email: String,
    #[validate(
        length(min = 1, code = "required", message = "Please fill in all fields"),
        must_match(other = "confirm_password", message = "Passwords do not match"),
        custom(function = "min_password_length")
    )]
    pub password: String,
    /// Пустое подтверждение - это просто несовпадение паролей.
    pub confirm_password: String,
}

impl RegisterForm {
    /// Пользователь для `/auth/register`. Саморегистрация всегда с ролью USER.
    pub fn to_user(&self) -> Result<User, FormError> {
        self.validate().map_err(|e| {
            first_failure(
                &e,
                &[
                    ("name", "required"),
                    ("email", "required"),
                    ("password", "required"),
                    ("email", "contains"),
                    ("password", "must_match"),
                    ("password", "password_length"),
                ],
            )
        })?;

        Ok(User {
            id: None,
            email: self.email.clone(),
            password: self.password.clone(),
            name: self.name.clone(),
            role: Some(Role::User),
        })
    }
}

/* ---------- movies ---------- */

#[derive(Debug, Clone, Default, Validate)]
pub struct MovieForm {
    #[validate(length(min = 1, code = "required", message = "Please fill in all fields"))]
    pub title: String,
    #[validate(length(min = 1, code = "required", message = "Please fill in all fields"))]
    pub genre: String,
    #[validate(range(min = 1, message = "Please fill in all fields"))]
    pub duration_minutes: i32,
    #[validate(
        length(min = 1, code = "required", message = "Please fill in all fields"),
        custom(function = "valid_release_date")
    )]
    pub release_date: String,
}

impl MovieForm {
    pub fn to_request(&self) -> Result<AddMovieRequest, FormError> {
        self.validate().map_err(|e| {
            first_failure(
                &e,
                &[
                    ("title", "required"),
                    ("genre", "required"),
                    ("duration_minutes", "range"),
                    ("release_date", "required"),
                    ("release_date", "date"),
                ],
            )
        })?;

        let release_date = parse_date(&self.release_date)
            .ok_or_else(|| FormError("Please enter a valid release date (YYYY-MM-DD)".into()))?;
        Ok(AddMovieRequest {
            title: self.title.clone(),
            genre: self.genre.clone(),
            duration_minutes: self.duration_minutes,
            release_date,
        })
    }
}

/* ---------- halls ---------- */

#[derive(Debug, Clone, Default, Validate)]
pub struct HallForm {
    #[validate(length(min = 1, code = "required", message = "Please fill in all fields"))]
    pub name: String,
    #[validate(range(min = 1, message = "Total seats must be at least 1"))]
    pub total_seats: i32,
}

impl HallForm {
    pub fn to_request(&self) -> Result<AddHallRequest, FormError> {
        self.validate()
            .map_err(|e| first_failure(&e, &[("name", "required"), ("total_seats", "range")]))?;
        Ok(AddHallRequest {
            name: self.name.clone(),
            total_seats: self.total_seats,
        })
    }
}

/* ---------- showtimes ---------- */

#[derive(Debug, Clone, Default, Validate)]
pub struct ShowtimeForm {
    #[validate(
        length(min = 1, code = "required", message = "Please fill in all fields"),
        custom(function = "valid_start_time")
    )]
    pub start_time: String,
    #[validate(range(min = 1, message = "Please fill in all fields"))]
    pub movie_id: i64,
    #[validate(range(min = 1, message = "Please fill in all fields"))]
    pub hall_id: i64,
}

impl ShowtimeForm {
    pub fn to_request(&self) -> Result<AddShowtimeRequest, FormError> {
        self.validate().map_err(|e| {
            first_failure(
                &e,
                &[
                    ("start_time", "required"),
                    ("movie_id", "range"),
                    ("hall_id", "range"),
                    ("start_time", "datetime"),
                ],
            )
        })?;

        let start_time = parse_start_time(&self.start_time)
            .ok_or_else(|| FormError("Please enter a valid start time (YYYY-MM-DDTHH:MM)".into()))?;
        Ok(AddShowtimeRequest {
            start_time,
            movie_id: self.movie_id,
            hall_id: self.hall_id,
        })
    }
}

/* ---------- bookings ---------- */

#[derive(Debug, Clone, Default, Validate)]
pub struct BookingForm {
    #[validate(required(message = "Please select a seat"))]
    pub seat_number: Option<String>,
    #[validate(required(message = "Please select a seat"))]
    pub user_id: Option<i64>,
    #[validate(range(exclusive_min = 0.0, message = "Please enter a valid price"))]
    pub price: f64,
}

impl BookingForm {
    pub fn to_request(&self, showtime_id: i64) -> Result<BookSeatRequest, FormError> {
        self.validate().map_err(|e| {
            first_failure(
                &e,
                &[("seat_number", "required"), ("user_id", "required"), ("price", "range")],
            )
        })?;
        if !self.price.is_finite() {
            return Err(FormError("Please enter a valid price".into()));
        }

        match (&self.seat_number, self.user_id) {
            (Some(seat_number), Some(user_id)) => Ok(BookSeatRequest {
                user_id,
                showtime_id,
                seat_number: seat_number.clone(),
                price: self.price,
            }),
            _ => Err(FormError("Please select a seat".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn register(name: &str, email: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn login_requires_fields_before_email_format() {
        let form = LoginForm { email: String::new(), password: "x".into() };
        assert_eq!(form.check().unwrap_err().0, FILL_ALL_FIELDS);

        let form = LoginForm { email: "ann".into(), password: String::new() };
        assert_eq!(form.check().unwrap_err().0, FILL_ALL_FIELDS);

        let form = LoginForm { email: "ann".into(), password: "x".into() };
        assert_eq!(form.check().unwrap_err().0, "Please enter a valid email address");

        assert!(LoginForm { email: "ann@x.io".into(), password: "x".into() }.check().is_ok());
    }

    #[test]
    fn register_rule_order() {
        let err = register("", "ann", "abc", "xyz").to_user().unwrap_err();
        assert_eq!(err.0, FILL_ALL_FIELDS);

        let err = register("Ann", "ann", "abc", "xyz").to_user().unwrap_err();
        assert_eq!(err.0, "Please enter a valid email address");

        let err = register("Ann", "ann@x.io", "abc", "xyz").to_user().unwrap_err();
        assert_eq!(err.0, "Passwords do not match");

        let err = register("Ann", "ann@x.io", "abc", "abc").to_user().unwrap_err();
        assert_eq!(err.0, "Password must be at least 6 characters");
    }

    #[test]
    fn blank_confirmation_is_a_mismatch() {
        let err = register("Ann", "ann@x.io", "secret1", "").to_user().unwrap_err();
        assert_eq!(err.0, "Passwords do not match");
    }

    #[test]
    fn register_builds_plain_user() {
        let user = register("Ann", "ann@x.io", "secret1", "secret1").to_user().unwrap();
        assert_eq!(user.role, Some(Role::User));
        assert_eq!(user.password, "secret1");
        assert_eq!(user.id, None);
    }

    #[test]
    fn movie_form_checks_duration_and_date() {
        let mut form = MovieForm {
            title: "Heat".into(),
            genre: "Crime".into(),
            duration_minutes: 0,
            release_date: "1995-12-15".into(),
        };
        assert_eq!(form.to_request().unwrap_err().0, FILL_ALL_FIELDS);

        form.duration_minutes = 170;
        form.release_date = "15/12/1995".into();
        assert_eq!(
            form.to_request().unwrap_err().0,
            "Please enter a valid release date (YYYY-MM-DD)"
        );

        form.release_date = "1995-12-15".into();
        let req = form.to_request().unwrap();
        assert_eq!(req.release_date, NaiveDate::from_ymd_opt(1995, 12, 15).unwrap());
    }

    #[test]
    fn hall_needs_at_least_one_seat() {
        let form = HallForm { name: "Hall 1".into(), total_seats: 0 };
        assert_eq!(form.to_request().unwrap_err().0, "Total seats must be at least 1");
        let form = HallForm { name: String::new(), total_seats: 0 };
        assert_eq!(form.to_request().unwrap_err().0, FILL_ALL_FIELDS);
    }

    #[test]
    fn showtime_accepts_datetime_local_format() {
        let form = ShowtimeForm { start_time: "2026-11-02T19:30".into(), movie_id: 1, hall_id: 2 };
        let req = form.to_request().unwrap();
        assert_eq!(req.start_time.to_string(), "2026-11-02 19:30:00");

        let form = ShowtimeForm { start_time: "2026-11-02T19:30".into(), movie_id: 0, hall_id: 2 };
        assert_eq!(form.to_request().unwrap_err().0, FILL_ALL_FIELDS);
    }

    #[test]
    fn booking_requires_seat_then_price() {
        let form = BookingForm { seat_number: None, user_id: Some(1), price: 0.0 };
        assert_eq!(form.to_request(3).unwrap_err().0, "Please select a seat");

        let form = BookingForm { seat_number: Some("A1".into()), user_id: None, price: 10.0 };
        assert_eq!(form.to_request(3).unwrap_err().0, "Please select a seat");

        let form = BookingForm { seat_number: Some("A1".into()), user_id: Some(1), price: 0.0 };
        assert_eq!(form.to_request(3).unwrap_err().0, "Please enter a valid price");

        let form = BookingForm { seat_number: Some("A1".into()), user_id: Some(1), price: f64::NAN };
        assert_eq!(form.to_request(3).unwrap_err().0, "Please enter a valid price");

        let req = BookingForm { seat_number: Some("A1".into()), user_id: Some(1), price: 12.5 }
            .to_request(3)
            .unwrap();
        assert_eq!(req.showtime_id, 3);
        assert_eq!(req.seat_number, "A1");
    }

    proptest! {
        #[test]
        fn login_email_without_at_sign_is_rejected(email in "[a-z0-9.]{1,20}") {
            let form = LoginForm { email, password: "pw".into() };
            prop_assert_eq!(form.check().unwrap_err().0, "Please enter a valid email address");
        }

        #[test]
        fn hall_seat_count_rule(seats in -100i32..100) {
            let form = HallForm { name: "Main".into(), total_seats: seats };
            prop_assert_eq!(form.to_request().is_ok(), seats >= 1);
        }
    }
}
