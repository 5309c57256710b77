pub mod dynamodb_user_store;
pub mod pbkdf2_password_hasher;
