use super::{Outcome, Screens};
use crate::feedback::{Action, Banner};
use crate::models::{Role, User};
use crate::routing::Route;

/// Фильтр по email, имени или роли без учёта регистра.
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let query = query.trim().to_lowercase();
    users
        .iter()
        .filter(|u| {
            u.email.to_lowercase().contains(&query)
                || u.name.to_lowercase().contains(&query)
                || u.role.is_some_and(|r| r.as_str().to_lowercase().contains(&query))
        })
        .collect()
}

impl Screens {
    pub async fn list_users(&self, query: &str) -> Outcome<Vec<User>> {
        if let Some(redirect) = self.check_access(Route::Users) {
            return redirect;
        }

        let outcome = self.load(Action::LoadUsers, self.client().get_all_users()).await;
        let Some(users) = outcome.data else {
            return outcome;
        };

        let total = users.len();
        let filtered: Vec<User> = filter_users(&users, query).into_iter().cloned().collect();
        if filtered.is_empty() {
            let message = if total == 0 { "No users found" } else { "No users match your search" };
            return Outcome::loaded(filtered).with_banner(Banner::info(message));
        }
        Outcome::loaded(filtered)
    }

    pub async fn change_role(&self, user_id: i64, role: Role) -> Outcome<User> {
        if let Some(redirect) = self.check_access(Route::Users) {
            return redirect;
        }
        self.submit(Action::UpdateRole, Some(Route::Users), || {
            self.client().update_user_role(user_id, role)
        })
        .await
    }

    pub async fn delete_user(&self, user_id: i64) -> Outcome<String> {
        if let Some(redirect) = self.check_access(Route::Users) {
            return redirect;
        }
        self.submit(Action::DeleteUser, Some(Route::Users), || {
            self.client().delete_user(user_id)
        })
        .await
    }
}
