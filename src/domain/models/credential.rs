use serde::{Deserialize, Serialize};

/// Value object for a stored password hash in `salt:digest` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap an already formatted `salt:digest` string.
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The salt segment: everything before the first `:`. A stored value
    /// without a separator is treated as being all salt.
    pub fn salt(&self) -> &str {
        self.0.split(':').next().unwrap_or(&self.0)
    }
}
