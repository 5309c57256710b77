use async_trait::async_trait;

use crate::domain::{
    error::StoreError,
    models::user::{PutAck, UserRecord},
};

/// Document-store capability set consumed by the orchestrators. Lookups
/// return the raw matching set; callers decide how many records they expect.
#[async_trait]
pub trait UserStore {
    /// Records whose username or email matches (OR over both fields). Used
    /// only for the create-time uniqueness check.
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Vec<UserRecord>, StoreError>;

    /// Exact-match lookup by username.
    async fn find_by_username(&self, username: &str) -> Result<Vec<UserRecord>, StoreError>;

    /// All records with `active == true`. First page only, no pagination.
    async fn scan_active(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// Write a record under its username key, replacing any previous item.
    async fn put(&self, record: UserRecord) -> Result<PutAck, StoreError>;
}
