use super::{Outcome, Screens};
use crate::feedback::Action;
use crate::models::Movie;
use crate::routing::Route;
use crate::validation::MovieForm;

impl Screens {
    pub async fn list_movies(&self) -> Outcome<Vec<Movie>> {
        self.load(Action::LoadMovies, self.client().get_all_movies()).await
    }

    /// Поиск по названию; пустой запрос возвращает полный список.
    pub async fn search_movies(&self, term: &str) -> Outcome<Vec<Movie>> {
        let term = term.trim();
        if term.is_empty() {
            return self.list_movies().await;
        }
        self.load(Action::SearchMovies, self.client().search_movies(term)).await
    }

    pub async fn load_movie(&self, id: i64) -> Outcome<Movie> {
        self.load(Action::LoadMovie, self.client().get_movie(id)).await
    }

    pub async fn add_movie(&self, form: &MovieForm) -> Outcome<Movie> {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => return Outcome::invalid(e),
        };
        self.submit(Action::AddMovie, Some(Route::Movies), || async move {
            self.client().add_movie(&request).await
        })
        .await
    }

    pub async fn edit_movie(&self, id: i64, form: &MovieForm) -> Outcome<Movie> {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => return Outcome::invalid(e),
        };
        self.submit(Action::EditMovie, Some(Route::Movies), || async move {
            self.client().update_movie(id, &request).await
        })
        .await
    }

    pub async fn delete_movie(&self, id: i64) -> Outcome<String> {
        self.submit(Action::DeleteMovie, Some(Route::Movies), || {
            self.client().delete_movie(id)
        })
        .await
    }
}

/// Форма редактирования, заполненная данными фильма.
impl From<&Movie> for MovieForm {
    fn from(movie: &Movie) -> Self {
        MovieForm {
            title: movie.title.clone(),
            genre: movie.genre.clone().unwrap_or_default(),
            duration_minutes: movie.duration_minutes,
            release_date: movie
                .release_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}
