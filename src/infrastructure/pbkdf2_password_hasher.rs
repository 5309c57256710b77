use pbkdf2::pbkdf2_hmac;
use rand::{RngCore, rngs::OsRng};
use sha2::Sha512;

use crate::domain::{
    models::credential::HashedPassword, services::password_service::PasswordHasher,
};

const ROUNDS: u32 = 10_000;
const KEY_LEN: usize = 64;
// salt is 16 hex characters; the hex string itself feeds the KDF
const SALT_BYTES: usize = 8;

#[derive(Clone)]
pub struct Pbkdf2PasswordHasher;

impl Pbkdf2PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    fn derive(password: &str, salt: &str) -> HashedPassword {
        let mut key = [0u8; KEY_LEN];
        pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), ROUNDS, &mut key);
        HashedPassword::new(format!("{}:{}", salt, hex::encode(key)))
    }
}

impl Default for Pbkdf2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Pbkdf2PasswordHasher {
    fn hash(&self, password: &str) -> HashedPassword {
        let mut bytes = [0u8; SALT_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self::derive(password, &hex::encode(bytes))
    }

    fn hash_with(&self, password: &str, stored: &HashedPassword) -> HashedPassword {
        Self::derive(password, stored.salt())
    }
}
