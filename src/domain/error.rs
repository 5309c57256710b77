use thiserror::Error;

/// Errors surfaced by the orchestrators. The message strings are part of the
/// contract; callers and tests match on the exact text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("event not as expected")]
    UnexpectedEvent,

    #[error("json body malformed")]
    MalformedBody,

    #[error("missing required fields for entry or data type was not correct or was a falsy value")]
    Validation,

    #[error("password required")]
    PasswordRequired,

    #[error("user/email already exists")]
    DuplicateUser,

    #[error("user lookup store error")]
    StoreLookup,

    #[error("user store query error")]
    StoreQuery,

    #[error("user store write error")]
    StoreWrite,
}

/// Opaque failure from a store backend. Orchestrators wrap it into one of the
/// fixed-message variants above and keep the original only for logging.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
}
