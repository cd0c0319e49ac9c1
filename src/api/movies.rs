use reqwest::Method;
use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::models::{AddMovieRequest, Movie};

#[derive(Serialize)]
struct TitleQuery<'a> {
    title: &'a str,
}

impl ApiClient {
    pub async fn get_all_movies(&self) -> Result<Vec<Movie>, ApiError> {
        self.get_json("/movies/public/all").await
    }

    pub async fn search_movies(&self, title: &str) -> Result<Vec<Movie>, ApiError> {
        self.get_json_with_query("/movies/public/search", &TitleQuery { title })
            .await
    }

    pub async fn get_movie(&self, id: i64) -> Result<Movie, ApiError> {
        self.get_json(&format!("/movies/{}", id)).await
    }

    pub async fn add_movie(&self, movie: &AddMovieRequest) -> Result<Movie, ApiError> {
        self.send_json(Method::POST, "/movies/add", movie).await
    }

    pub async fn update_movie(&self, id: i64, movie: &AddMovieRequest) -> Result<Movie, ApiError> {
        self.send_json(Method::PUT, &format!("/movies/{}", id), movie).await
    }

    pub async fn delete_movie(&self, id: i64) -> Result<String, ApiError> {
        self.delete_text(&format!("/movies/{}", id)).await
    }
}
