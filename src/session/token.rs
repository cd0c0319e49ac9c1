use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use super::SessionError;
use crate::models::{Role, User};

/// Полезная нагрузка JWT, выдаваемого бэкендом.
/// `sub` - email пользователя, `role` - ADMIN/USER, `userId` присутствует не всегда.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn is_expired_at(&self, unix_now: i64) -> bool {
        matches!(self.exp, Some(exp) if exp <= unix_now)
    }

    // Собираем пользователя из токена; email из формы - запасной вариант
    pub fn to_user(&self, fallback_email: &str) -> User {
        let email = self
            .sub
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| fallback_email.to_string());
        let name = fallback_email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string();
        let role = if self.role.as_deref() == Some("ADMIN") {
            Role::Admin
        } else {
            Role::User
        };

        User {
            id: self.user_id,
            email,
            password: String::new(),
            name,
            role: Some(role),
        }
    }
}

/// Декодирует payload токена без проверки подписи: секрет есть только у бэкенда,
/// клиенту нужны лишь идентичность и роль.
pub fn decode_claims(token: &str) -> Result<Claims, SessionError> {
    if token.split('.').count() != 3 {
        return Err(SessionError::MalformedToken);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    validation.validate_aud = false;

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|_| SessionError::MalformedToken)
}
