use super::{Outcome, Screens};
use crate::api::ApiError;
use crate::feedback::Action;
use crate::models::{Hall, Movie, Showtime};
use crate::routing::Route;
use crate::validation::ShowtimeForm;

/// Списки для выпадающих полей формы сеанса.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowtimeOptions {
    pub movies: Vec<Movie>,
    pub halls: Vec<Hall>,
}

impl Screens {
    pub async fn list_showtimes(&self) -> Outcome<Vec<Showtime>> {
        self.load(Action::LoadShowtimes, self.client().get_upcoming_showtimes())
            .await
    }

    pub async fn showtimes_by_movie(&self, movie_id: i64) -> Outcome<Vec<Showtime>> {
        self.load(Action::LoadShowtimes, self.client().get_showtimes_by_movie(movie_id))
            .await
    }

    pub async fn load_showtime(&self, id: i64) -> Outcome<Showtime> {
        self.load(Action::LoadShowtimes, self.client().get_showtime(id)).await
    }

    /// Фильмы и залы загружаются параллельно.
    pub async fn showtime_options(&self) -> Outcome<ShowtimeOptions> {
        let fetch = async {
            let (movies, halls) =
                tokio::try_join!(self.client().get_all_movies(), self.client().get_all_halls())?;
            Ok::<_, ApiError>(ShowtimeOptions { movies, halls })
        };
        self.load(Action::LoadShowtimes, fetch).await
    }

    pub async fn add_showtime(&self, form: &ShowtimeForm) -> Outcome<Showtime> {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => return Outcome::invalid(e),
        };
        self.submit(Action::AddShowtime, Some(Route::Showtimes), || async move {
            self.client().add_showtime(&request).await
        })
        .await
    }

    pub async fn edit_showtime(&self, id: i64, form: &ShowtimeForm) -> Outcome<Showtime> {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => return Outcome::invalid(e),
        };
        self.submit(Action::EditShowtime, Some(Route::Showtimes), || async move {
            self.client().update_showtime(id, &request).await
        })
        .await
    }

    pub async fn delete_showtime(&self, id: i64) -> Outcome<String> {
        self.submit(Action::DeleteShowtime, Some(Route::Showtimes), || {
            self.client().delete_showtime(id)
        })
        .await
    }
}

impl From<&Showtime> for ShowtimeForm {
    fn from(showtime: &Showtime) -> Self {
        ShowtimeForm {
            start_time: showtime.start_time.format("%Y-%m-%dT%H:%M").to_string(),
            movie_id: showtime.movie.as_ref().and_then(|m| m.id).unwrap_or_default(),
            hall_id: showtime.hall_id().unwrap_or_default(),
        }
    }
}
