use serde_json::Value;
use tracing::error;

use crate::{
    domain::{
        error::DomainError,
        models::user::UserRecord,
        repositories::user_store::UserStore,
        validation::{FieldKind, Schema, verify_fields},
    },
    usecase::parse_payload,
};

const GET_FIELDS: Schema = &[("username", FieldKind::String)];

pub struct GetUserUsecase<S: UserStore> {
    store: S,
}

impl<S: UserStore> GetUserUsecase<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Look up records by username, or every active record when the payload
    /// asks for `"*"`. The matching set is returned verbatim; even an exact
    /// match comes back as a list, not a single record.
    pub async fn get_user(&self, payload: Option<&str>) -> Result<Vec<UserRecord>, DomainError>
    where
        S: Send + Sync,
    {
        let data = parse_payload(payload)?;
        verify_fields(GET_FIELDS, &data)?;

        let username = data
            .get("username")
            .and_then(Value::as_str)
            .ok_or(DomainError::Validation)?;

        let result = if username == "*" {
            self.store.scan_active().await
        } else {
            self.store.find_by_username(username).await
        };

        result.map_err(|e| {
            error!(error = %e, "user query failed");
            DomainError::StoreQuery
        })
    }
}
