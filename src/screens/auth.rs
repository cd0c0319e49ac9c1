use tracing::info;

use super::{Outcome, Screens};
use crate::feedback::Action;
use crate::models::User;
use crate::routing::Route;
use crate::validation::{LoginForm, RegisterForm};

impl Screens {
    /// Вход: после успеха - на главную.
    pub async fn login(&self, form: &LoginForm) -> Outcome<User> {
        if let Err(e) = form.check() {
            return Outcome::invalid(e);
        }
        self.submit(Action::Login, Some(Route::Movies), || {
            self.client().login(&form.email, &form.password)
        })
        .await
    }

    /// Регистрация: после успеха - на экран входа.
    pub async fn register(&self, form: &RegisterForm) -> Outcome<User> {
        let user = match form.to_user() {
            Ok(user) => user,
            Err(e) => return Outcome::invalid(e),
        };
        self.submit(Action::Register, Some(Route::Login), || async move {
            self.client().register(&user).await
        })
        .await
    }

    pub fn logout(&self) -> Outcome<()> {
        if let Some(user) = self.auth().user() {
            info!("Logging out {}", user.email);
        }
        self.client().logout();
        Outcome::redirected(Route::Login)
    }
}
