use serde::{Deserialize, Serialize};

/// A persisted user account. Wire and storage field names are camelCase.
///
/// `password` holds plaintext only transiently inside a create call; whatever
/// reaches the store is always a `salt:digest` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub email: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub date_created: i64,
    pub date_updated: i64,
    pub active: bool,
}

impl UserRecord {
    /// A record is new iff its timestamps are equal. This equality is the
    /// only signal separating create intent from update intent.
    pub fn is_new(&self) -> bool {
        self.date_created == self.date_updated
    }
}

/// Acknowledgement returned by the store after a successful write, passed
/// through to the caller unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutAck {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}
