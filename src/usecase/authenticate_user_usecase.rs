use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::{
    domain::{
        error::DomainError,
        models::{credential::HashedPassword, user::UserRecord},
        repositories::user_store::UserStore,
        services::password_service::PasswordHasher,
        validation::{FieldKind, Schema, verify_fields},
    },
    usecase::parse_payload,
};

const LOGIN_FIELDS: Schema = &[
    ("username", FieldKind::String),
    ("password", FieldKind::String),
];

/// One fixed message for both unknown-user and wrong-password, so a caller
/// probing for account names learns nothing from the response.
pub const BAD_LOGIN: &str = "user not found or invalid password";

/// Authentication result. A denied login is a normal value, not an error;
/// only store failures raise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AuthOutcome {
    Granted(UserRecord),
    Denied { error: String },
}

impl AuthOutcome {
    pub fn denied() -> Self {
        Self::Denied {
            error: BAD_LOGIN.to_string(),
        }
    }
}

pub struct AuthenticateUserUsecase<S: UserStore, P: PasswordHasher> {
    store: S,
    password_hasher: P,
}

impl<S: UserStore, P: PasswordHasher> AuthenticateUserUsecase<S, P> {
    pub fn new(store: S, password_hasher: P) -> Self {
        Self {
            store,
            password_hasher,
        }
    }

    /// Check a username/password pair against the stored record. On success
    /// the matched record is returned unchanged.
    pub async fn authenticate(&self, payload: Option<&str>) -> Result<AuthOutcome, DomainError>
    where
        S: Send + Sync,
        P: Send + Sync,
    {
        let data = parse_payload(payload)?;
        verify_fields(LOGIN_FIELDS, &data)?;

        let username = data
            .get("username")
            .and_then(Value::as_str)
            .ok_or(DomainError::Validation)?;
        let password = data
            .get("password")
            .and_then(Value::as_str)
            .ok_or(DomainError::Validation)?;

        let mut matches = self.store.find_by_username(username).await.map_err(|e| {
            error!(error = %e, "login lookup failed");
            DomainError::StoreQuery
        })?;

        if matches.is_empty() {
            return Ok(AuthOutcome::denied());
        }
        let user = matches.remove(0);

        // The salt comes from the record's own stored hash; a record without
        // a stored credential can never verify.
        let Some(stored) = user.password.clone() else {
            return Ok(AuthOutcome::denied());
        };
        let stored = HashedPassword::new(stored);

        if self.password_hasher.hash_with(password, &stored) == stored {
            Ok(AuthOutcome::Granted(user))
        } else {
            Ok(AuthOutcome::denied())
        }
    }
}
