//! Баннеры для пользователя: ошибка API + экран, на котором она случилась,
//! превращаются в понятную подсказку.

use std::fmt;

use crate::api::{ApiError, ErrorKind};
use crate::validation::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Warning,
    Info,
    Auth,
    Success,
}

impl BannerKind {
    pub fn icon(&self) -> &'static str {
        match self {
            BannerKind::Error => "❌",
            BannerKind::Warning => "⚠️",
            BannerKind::Info => "ℹ️",
            BannerKind::Auth => "🔐",
            BannerKind::Success => "✅",
        }
    }
}

/// Сообщение над формой. Любой баннер можно закрыть.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub dismissible: bool,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: BannerKind::Success, message: message.into(), dismissible: true }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: BannerKind::Info, message: message.into(), dismissible: true }
    }

    /// Ошибочный баннер; тип выбирается по тексту сообщения.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let kind = if message.contains("session") {
            BannerKind::Auth
        } else if message.contains("already")
            || message.contains("permission")
            || message.contains("Invalid")
        {
            BannerKind::Warning
        } else {
            BannerKind::Error
        };
        Self { kind, message, dismissible: true }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self.kind, BannerKind::Success | BannerKind::Info)
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.icon(), self.message)
    }
}

impl From<&FormError> for Banner {
    fn from(err: &FormError) -> Self {
        Banner::from_message(err.0.clone())
    }
}

/// Действие пользователя, в контексте которого показывается результат.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Login,
    Register,
    LoadMovies,
    SearchMovies,
    LoadMovie,
    AddMovie,
    EditMovie,
    DeleteMovie,
    LoadHalls,
    LoadSeats,
    AddHall,
    EditHall,
    DeleteHall,
    LoadShowtimes,
    AddShowtime,
    EditShowtime,
    DeleteShowtime,
    UpdateSeat,
    Book,
    LoadBookings,
    UpdateBooking,
    DeleteBooking,
    LoadUsers,
    UpdateRole,
    DeleteUser,
}

impl Action {
    pub fn success_message(&self) -> &'static str {
        match self {
            Action::Login => "Login successful!",
            Action::Register => "Registration successful! Redirecting to login...",
            Action::AddMovie => "Movie added successfully!",
            Action::EditMovie => "Movie updated successfully!",
            Action::DeleteMovie => "Movie deleted successfully!",
            Action::AddHall => "Hall added successfully!",
            Action::EditHall => "Hall updated successfully!",
            Action::DeleteHall => "Hall deleted successfully!",
            Action::AddShowtime => "Showtime added successfully!",
            Action::EditShowtime => "Showtime updated successfully!",
            Action::DeleteShowtime => "Showtime deleted successfully!",
            Action::UpdateSeat => "Seat availability updated!",
            Action::Book => "Booking successful!",
            Action::UpdateBooking => "Booking updated successfully!",
            Action::DeleteBooking => "Booking deleted successfully!",
            Action::UpdateRole => "User role updated successfully!",
            Action::DeleteUser => "User deleted successfully!",
            Action::LoadMovies
            | Action::SearchMovies
            | Action::LoadMovie
            | Action::LoadHalls
            | Action::LoadSeats
            | Action::LoadShowtimes
            | Action::LoadBookings
            | Action::LoadUsers => "Loaded",
        }
    }

    // Что именно запрещено не-администратору
    fn admin_subject(&self) -> Option<&'static str> {
        match self {
            Action::AddMovie => Some("add movies"),
            Action::EditMovie => Some("edit movies"),
            Action::DeleteMovie => Some("delete movies"),
            Action::AddHall => Some("add halls"),
            Action::EditHall => Some("edit halls"),
            Action::DeleteHall => Some("delete halls"),
            Action::AddShowtime => Some("add showtimes"),
            Action::EditShowtime => Some("edit showtimes"),
            Action::DeleteShowtime => Some("delete showtimes"),
            Action::UpdateBooking => Some("modify bookings"),
            Action::DeleteBooking => Some("delete bookings"),
            Action::LoadUsers => Some("view users"),
            Action::UpdateRole => Some("change user roles"),
            Action::DeleteUser => Some("delete users"),
            _ => None,
        }
    }
}

/// Подсказка по ошибке API для конкретного действия.
pub fn hint(action: Action, err: &ApiError) -> String {
    let text = err.detail().map(str::to_string).unwrap_or_else(|| err.to_string());

    // Сначала тексты сервера, которые имеют смысл независимо от статуса
    if action == Action::Book && text.contains("already booked") {
        return "This seat has already been booked. Please select another seat.".to_string();
    }
    if action == Action::Register
        && (text.contains("already registered") || text.contains("already exists"))
    {
        return "This email is already registered. Please use a different email or login."
            .to_string();
    }

    let forbidden = err.kind() == ErrorKind::Forbidden || text.contains("Access Denied");

    match err.kind() {
        ErrorKind::Unauthorized if action == Action::Login => {
            "Invalid email or password. Please check your credentials.".to_string()
        }
        ErrorKind::Unauthorized => "Your session has expired. Please login again.".to_string(),
        _ if forbidden => match action.admin_subject() {
            Some(subject) => format!(
                "You do not have permission to {}. Admin access required.",
                subject
            ),
            None => "You do not have permission to perform this action.".to_string(),
        },
        ErrorKind::NotFound if action == Action::SearchMovies => {
            "No movies found matching your search.".to_string()
        }
        ErrorKind::Connectivity => {
            "Cannot connect to server. Please check if the backend is running.".to_string()
        }
        ErrorKind::Timeout => "Request timeout. Please try again.".to_string(),
        _ => err.to_string(),
    }
}

pub fn error_banner(action: Action, err: &ApiError) -> Banner {
    Banner::from_message(hint(action, err))
}
