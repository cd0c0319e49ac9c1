use super::{Outcome, Screens};
use crate::feedback::Action;
use crate::models::{Hall, Seat};
use crate::routing::{Access, Route};
use crate::validation::HallForm;

impl Screens {
    pub async fn list_halls(&self) -> Outcome<Vec<Hall>> {
        self.load(Action::LoadHalls, self.client().get_all_halls()).await
    }

    pub async fn load_hall(&self, id: i64) -> Outcome<Hall> {
        self.load(Action::LoadHalls, self.client().get_hall(id)).await
    }

    // Места зала по клику в списке залов
    pub async fn hall_seats(&self, hall_id: i64) -> Outcome<Vec<Seat>> {
        self.load(Action::LoadSeats, self.client().get_seats_for_hall(hall_id)).await
    }

    pub async fn add_hall(&self, form: &HallForm) -> Outcome<Hall> {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => return Outcome::invalid(e),
        };
        self.submit(Action::AddHall, Some(Route::Halls), || async move {
            self.client().add_hall(&request).await
        })
        .await
    }

    pub async fn edit_hall(&self, id: i64, form: &HallForm) -> Outcome<Hall> {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => return Outcome::invalid(e),
        };
        self.submit(Action::EditHall, Some(Route::Halls), || async move {
            self.client().update_hall(id, &request).await
        })
        .await
    }

    pub async fn delete_hall(&self, id: i64) -> Outcome<String> {
        self.submit(Action::DeleteHall, Some(Route::Halls), || self.client().delete_hall(id))
            .await
    }

    /// Ручное переключение доступности места (требует входа).
    pub async fn set_seat_availability(&self, seat_id: i64, available: bool) -> Outcome<Seat> {
        if let Some(redirect) = self.require(Access::Authenticated) {
            return redirect;
        }
        self.submit(Action::UpdateSeat, None, || {
            self.client().update_seat_availability(seat_id, available)
        })
        .await
    }
}

impl From<&Hall> for HallForm {
    fn from(hall: &Hall) -> Self {
        HallForm { name: hall.name.clone(), total_seats: hall.total_seats }
    }
}
