use tracing::warn;

use super::{Outcome, Screens};
use crate::api::ApiError;
use crate::feedback::{Action, Banner};
use crate::models::{Booking, BookingOverride, Seat, Showtime};
use crate::routing::{Access, Route};
use crate::validation::BookingForm;

/// Схема зала для сеанса: сам сеанс и все места его зала.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatMap {
    pub showtime: Showtime,
    pub seats: Vec<Seat>,
}

impl SeatMap {
    /// Выбор места: занятое место выбрать нельзя.
    pub fn select(&self, seat_number: &str) -> Result<&Seat, Banner> {
        let seat = self
            .seats
            .iter()
            .find(|s| s.seat_number.eq_ignore_ascii_case(seat_number.trim()))
            .ok_or_else(|| {
                Banner::from_message(format!("Seat {} does not exist in this hall", seat_number))
            })?;

        if !seat.available {
            return Err(Banner::from_message(
                "This seat has already been booked. Please select another seat.",
            ));
        }
        Ok(seat)
    }

    pub fn available(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().filter(|s| s.available)
    }
}

impl Screens {
    /// Открывает экран бронирования: сеанс -> зал -> места зала.
    pub async fn open_booking(&self, showtime_id: i64) -> Outcome<SeatMap> {
        if let Some(redirect) = self.check_access(Route::Booking(showtime_id)) {
            return redirect;
        }

        self.load(Action::LoadSeats, self.seat_map(showtime_id)).await
    }

    async fn seat_map(&self, showtime_id: i64) -> Result<SeatMap, ApiError> {
        let showtime = self.client().get_showtime(showtime_id).await?;
        let seats = match showtime.hall_id() {
            Some(hall_id) => self.client().get_seats_for_hall(hall_id).await?,
            None => {
                warn!("Showtime {} has no hall attached", showtime_id);
                Vec::new()
            }
        };
        Ok(SeatMap { showtime, seats })
    }

    /// Бронирование выбранного места. Место сверяется со свежей схемой зала:
    /// несуществующее или занятое место до бэкенда не доходит.
    /// После успеха - на «Мои брони».
    pub async fn book(
        &self,
        showtime_id: i64,
        seat_number: Option<&str>,
        price: f64,
    ) -> Outcome<Booking> {
        if let Some(redirect) = self.check_access(Route::Booking(showtime_id)) {
            return redirect;
        }

        let form = BookingForm {
            seat_number: seat_number.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            user_id: self.auth().user().and_then(|u| u.id),
            price,
        };
        let mut request = match form.to_request(showtime_id) {
            Ok(request) => request,
            Err(e) => return Outcome::invalid(e),
        };

        let map = match self.seat_map(showtime_id).await {
            Ok(map) => map,
            Err(e) => {
                warn!("Seat map for showtime {} failed: {}", showtime_id, e);
                return Outcome::api_error(Action::LoadSeats, &e);
            }
        };
        match map.select(&request.seat_number) {
            Ok(seat) => request.seat_number = seat.seat_number.clone(),
            Err(banner) => return Outcome::failed(banner),
        }

        self.submit(Action::Book, Some(Route::MyBookings), || async move {
            self.client().book_seat(&request).await
        })
        .await
    }

    /// Брони пользователя; администратор видит все брони.
    pub async fn my_bookings(&self) -> Outcome<Vec<Booking>> {
        if let Some(redirect) = self.check_access(Route::MyBookings) {
            return redirect;
        }

        if self.auth().is_admin() {
            return self.load(Action::LoadBookings, self.client().get_all_bookings()).await;
        }

        match self.auth().user().and_then(|u| u.id) {
            Some(user_id) => {
                self.load(Action::LoadBookings, self.client().get_user_bookings(user_id))
                    .await
            }
            None => Outcome::failed(Banner::from_message(
                "Unable to determine your user id. Please login again.",
            )),
        }
    }

    /// Правка брони администратором (место и/или цена).
    pub async fn override_booking(&self, id: i64, changes: &BookingOverride) -> Outcome<Booking> {
        if let Some(redirect) = self.require(Access::Admin) {
            return redirect;
        }
        if changes.is_empty() {
            return Outcome::failed(Banner::from_message("Nothing to update"));
        }
        if matches!(changes.price, Some(p) if !(p.is_finite() && p > 0.0)) {
            return Outcome::failed(Banner::from_message("Please enter a valid price"));
        }

        self.submit(Action::UpdateBooking, Some(Route::MyBookings), || {
            self.client().update_booking(id, changes)
        })
        .await
    }

    pub async fn cancel_booking(&self, id: i64) -> Outcome<String> {
        if let Some(redirect) = self.require(Access::Admin) {
            return redirect;
        }
        self.submit(Action::DeleteBooking, Some(Route::MyBookings), || {
            self.client().delete_booking(id)
        })
        .await
    }
}
