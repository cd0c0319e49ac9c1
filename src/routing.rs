//! Маршруты клиента, проверка доступа по роли и меню навигации.

use std::fmt;

use crate::session::AuthContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Movies,
    AddMovie,
    EditMovie(i64),
    Halls,
    AddHall,
    EditHall(i64),
    Showtimes,
    ShowtimesByMovie(i64),
    AddShowtime,
    EditShowtime(i64),
    Booking(i64),
    MyBookings,
    Users,
}

impl Route {
    /// Уровень доступа маршрута. Формы добавления/редактирования открыты всем
    /// (их защищает бэкенд), экраны бронирования требуют входа, управление
    /// пользователями - роли ADMIN.
    pub fn access(&self) -> Access {
        match self {
            Route::Booking(_) | Route::MyBookings => Access::Authenticated,
            Route::Users => Access::Admin,
            _ => Access::Public,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Movies => "/movies".to_string(),
            Route::AddMovie => "/add-movie".to_string(),
            Route::EditMovie(id) => format!("/edit-movie/{}", id),
            Route::Halls => "/halls".to_string(),
            Route::AddHall => "/add-hall".to_string(),
            Route::EditHall(id) => format!("/edit-hall/{}", id),
            Route::Showtimes => "/showtimes".to_string(),
            Route::ShowtimesByMovie(id) => format!("/showtimes/{}", id),
            Route::AddShowtime => "/add-showtime".to_string(),
            Route::EditShowtime(id) => format!("/edit-showtime/{}", id),
            Route::Booking(id) => format!("/booking/{}", id),
            Route::MyBookings => "/my-bookings".to_string(),
            Route::Users => "/users".to_string(),
        }
    }

    /// Разбор пути; `/` - это список фильмов.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        let id = |s: &str| s.parse::<i64>().ok();

        match segments.as_slice() {
            [] | ["movies"] => Some(Route::Movies),
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["add-movie"] => Some(Route::AddMovie),
            ["edit-movie", n] => id(n).map(Route::EditMovie),
            ["halls"] => Some(Route::Halls),
            ["add-hall"] => Some(Route::AddHall),
            ["edit-hall", n] => id(n).map(Route::EditHall),
            ["showtimes"] => Some(Route::Showtimes),
            ["showtimes", n] => id(n).map(Route::ShowtimesByMovie),
            ["add-showtime"] => Some(Route::AddShowtime),
            ["edit-showtime", n] => id(n).map(Route::EditShowtime),
            ["booking", n] => id(n).map(Route::Booking),
            ["my-bookings"] => Some(Route::MyBookings),
            ["users"] => Some(Route::Users),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Решение охранника маршрута.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Allow,
    Redirect(Route),
}

pub fn guard(route: Route, auth: &AuthContext) -> Guard {
    guard_access(route.access(), auth)
}

pub fn guard_access(access: Access, auth: &AuthContext) -> Guard {
    match access {
        Access::Public => Guard::Allow,
        Access::Authenticated if auth.is_authenticated() => Guard::Allow,
        Access::Authenticated => Guard::Redirect(Route::Login),
        Access::Admin if auth.is_admin() => Guard::Allow,
        // не-администратор уходит на главную
        Access::Admin => Guard::Redirect(Route::Movies),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub route: Option<Route>,
}

impl NavItem {
    fn link(label: &str, route: Route) -> Self {
        Self { label: label.to_string(), route: Some(route) }
    }
}

/// Пункты меню для текущей сессии. `route == None` - это кнопка выхода.
pub fn navigation(auth: &AuthContext) -> Vec<NavItem> {
    let mut items = vec![
        NavItem::link("Movies", Route::Movies),
        NavItem::link("Showtimes", Route::Showtimes),
        NavItem::link("Halls", Route::Halls),
    ];

    match auth.user() {
        Some(user) => {
            let bookings = if user.is_admin() { "All Bookings" } else { "My Bookings" };
            items.push(NavItem::link(bookings, Route::MyBookings));
            if user.is_admin() {
                items.push(NavItem::link("Add Movie", Route::AddMovie));
                items.push(NavItem::link("Add Hall", Route::AddHall));
                items.push(NavItem::link("Add Showtime", Route::AddShowtime));
                items.push(NavItem::link("Users", Route::Users));
            }
            items.push(NavItem { label: format!("Logout ({})", user.name), route: None });
        }
        None => {
            items.push(NavItem::link("Login", Route::Login));
            items.push(NavItem::link("Register", Route::Register));
        }
    }
    items
}
