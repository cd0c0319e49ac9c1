//! Экраны клиента. Каждый экран: загрузка данных, проверка формы, отправка,
//! баннер с результатом и маршрут для перехода.

pub mod auth;
pub mod bookings;
pub mod halls;
pub mod movies;
pub mod showtimes;
pub mod users;

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};

use crate::api::{ApiClient, ApiError, ErrorKind};
use crate::feedback::{error_banner, Action, Banner};
use crate::routing::{guard, guard_access, Access, Guard, Route};
use crate::session::AuthContext;
use crate::validation::FormError;

pub use bookings::SeatMap;

pub const ALREADY_BUSY: &str = "A request is already in progress. Please wait.";

/// Результат действия на экране.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub data: Option<T>,
    pub banner: Option<Banner>,
    pub redirect: Option<Route>,
}

impl<T> Outcome<T> {
    pub fn loaded(data: T) -> Self {
        Self { data: Some(data), banner: None, redirect: None }
    }

    pub fn done(data: T, action: Action, redirect: Option<Route>) -> Self {
        Self {
            data: Some(data),
            banner: Some(Banner::success(action.success_message())),
            redirect,
        }
    }

    pub fn failed(banner: Banner) -> Self {
        Self { data: None, banner: Some(banner), redirect: None }
    }

    pub fn redirected(route: Route) -> Self {
        Self { data: None, banner: None, redirect: Some(route) }
    }

    pub fn invalid(err: FormError) -> Self {
        Self::failed(Banner::from(&err))
    }

    /// Ошибка API. При 401 (кроме логина) пользователь отправляется на вход.
    pub fn api_error(action: Action, err: &ApiError) -> Self {
        let redirect = (err.kind() == ErrorKind::Unauthorized && action != Action::Login)
            .then_some(Route::Login);
        Self { data: None, banner: Some(error_banner(action, err)), redirect }
    }

    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }

    pub fn with_banner(mut self, banner: Banner) -> Self {
        self.banner = Some(banner);
        self
    }
}

/// Флаг «запрос в работе»: повторная отправка формы, пока идёт первая, отклоняется.
#[derive(Debug, Default)]
pub struct BusyFlag(AtomicBool);

pub struct BusyGuard<'a>(&'a AtomicBool);

impl BusyFlag {
    pub fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(&self.0))
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
pub struct Screens {
    client: ApiClient,
    busy: Arc<BusyFlag>,
}

impl Screens {
    pub fn new(client: ApiClient) -> Self {
        Self { client, busy: Arc::new(BusyFlag::default()) }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn auth(&self) -> &AuthContext {
        self.client.auth()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    // Проверка доступа к маршруту; `Some` - куда перенаправить
    fn check_access<T>(&self, route: Route) -> Option<Outcome<T>> {
        match guard(route, self.auth()) {
            Guard::Allow => None,
            Guard::Redirect(to) => {
                info!("Access to {} denied, redirecting to {}", route, to);
                Some(Outcome::redirected(to))
            }
        }
    }

    fn require<T>(&self, access: Access) -> Option<Outcome<T>> {
        match guard_access(access, self.auth()) {
            Guard::Allow => None,
            Guard::Redirect(to) => Some(Outcome::redirected(to)),
        }
    }

    /// Загрузка данных экрана.
    async fn load<T, Fut>(&self, action: Action, fetch: Fut) -> Outcome<T>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        match fetch.await {
            Ok(data) => Outcome::loaded(data),
            Err(e) => {
                error!("{:?} failed: {}", action, e);
                Outcome::api_error(action, &e)
            }
        }
    }

    /// Отправка формы под флагом занятости.
    async fn submit<T, F, Fut>(
        &self,
        action: Action,
        redirect: Option<Route>,
        send: F,
    ) -> Outcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let Some(_busy) = self.busy.try_begin() else {
            return Outcome::failed(Banner::info(ALREADY_BUSY));
        };

        match send().await {
            Ok(data) => {
                info!("{:?} succeeded", action);
                Outcome::done(data, action, redirect)
            }
            Err(e) => {
                error!("{:?} failed: {}", action, e);
                Outcome::api_error(action, &e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_flag_rejects_second_submit_until_released() {
        let flag = BusyFlag::default();
        let first = flag.try_begin();
        assert!(first.is_some());
        assert!(flag.try_begin().is_none());
        assert!(flag.is_busy());
        drop(first);
        assert!(!flag.is_busy());
        assert!(flag.try_begin().is_some());
    }

    #[test]
    fn unauthorized_errors_redirect_to_login() {
        let err = ApiError::Http { status: reqwest::StatusCode::UNAUTHORIZED, detail: None };
        let outcome: Outcome<()> = Outcome::api_error(Action::LoadBookings, &err);
        assert_eq!(outcome.redirect, Some(Route::Login));

        let outcome: Outcome<()> = Outcome::api_error(Action::Login, &err);
        assert_eq!(outcome.redirect, None);
    }
}
