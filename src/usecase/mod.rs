pub mod authenticate_user_usecase;
pub mod create_user_usecase;
pub mod get_user_usecase;

use serde_json::Value;
use tracing::error;

use crate::domain::error::DomainError;

/// Unwrap the transport envelope's body and parse it. A missing body is a
/// structural contract violation, distinct from a body that fails to parse.
pub(crate) fn parse_payload(payload: Option<&str>) -> Result<Value, DomainError> {
    let body = payload.ok_or_else(|| {
        error!("request envelope carried no body");
        DomainError::UnexpectedEvent
    })?;

    serde_json::from_str(body).map_err(|e| {
        error!(error = %e, "request body is not valid json");
        DomainError::MalformedBody
    })
}
