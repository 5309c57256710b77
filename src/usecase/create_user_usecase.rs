use tracing::error;

use crate::{
    domain::{
        error::DomainError,
        models::user::{PutAck, UserRecord},
        repositories::user_store::UserStore,
        services::password_service::PasswordHasher,
        validation::{FieldKind, Schema, verify_fields},
    },
    usecase::parse_payload,
};

/// Fields every create/update payload must carry. `password` is checked
/// separately because it is only mandatory for brand-new records.
const CREATE_FIELDS: Schema = &[
    ("username", FieldKind::String),
    ("email", FieldKind::String),
    ("firstName", FieldKind::String),
    ("dateCreated", FieldKind::Number),
    ("dateUpdated", FieldKind::Number),
    ("active", FieldKind::Boolean),
];

pub struct CreateUserUsecase<S: UserStore, P: PasswordHasher> {
    store: S,
    password_hasher: P,
}

impl<S: UserStore, P: PasswordHasher> CreateUserUsecase<S, P> {
    pub fn new(store: S, password_hasher: P) -> Self {
        Self {
            store,
            password_hasher,
        }
    }

    /// Create a user record, or overwrite one when the payload carries
    /// update intent (`dateCreated != dateUpdated`). Returns the store's
    /// write acknowledgement unchanged.
    pub async fn create_user(&self, payload: Option<&str>) -> Result<PutAck, DomainError>
    where
        S: Send + Sync,
        P: Send + Sync,
    {
        let data = parse_payload(payload)?;
        verify_fields(CREATE_FIELDS, &data)?;

        let mut record: UserRecord = serde_json::from_value(data).map_err(|e| {
            error!(error = %e, "payload does not fit the user record shape");
            DomainError::Validation
        })?;

        // Equal timestamps mark a new account: enforce uniqueness before the
        // write. The check and the later put are two independent store calls,
        // so concurrent creates can still race; the store's own guarantees
        // are the only backstop.
        if record.is_new() {
            let matches = self
                .store
                .find_by_username_or_email(&record.username, &record.email)
                .await
                .map_err(|e| {
                    error!(error = %e, "user uniqueness lookup failed");
                    DomainError::StoreLookup
                })?;

            if !matches.is_empty() {
                return Err(DomainError::DuplicateUser);
            }

            if record.password.as_deref().is_none_or(|p| p.is_empty()) {
                return Err(DomainError::PasswordRequired);
            }
        }

        // Any password present at this point is treated as plaintext and
        // rehashed, update calls included. An update that echoes the stored
        // hash will have it rehashed as if it were a password; callers that
        // keep the old credential must omit the field.
        if let Some(plain) = record.password.take() {
            record.password = Some(self.password_hasher.hash(&plain).into_string());
        }

        self.store.put(record).await.map_err(|e| {
            error!(error = %e, "user record write failed");
            DomainError::StoreWrite
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    };

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::{
        domain::error::StoreError, infrastructure::pbkdf2_password_hasher::Pbkdf2PasswordHasher,
    };

    #[derive(Default)]
    struct StoreLog {
        lookup_called: AtomicBool,
        put_item: Mutex<Option<UserRecord>>,
    }

    /// Store stub: scripted results, records whether the uniqueness lookup
    /// ran and what got written.
    #[derive(Clone)]
    struct ScriptedStore {
        lookup_result: Result<Vec<UserRecord>, String>,
        put_result: Result<PutAck, String>,
        log: Arc<StoreLog>,
    }

    impl ScriptedStore {
        fn new(
            lookup_result: Result<Vec<UserRecord>, String>,
            put_result: Result<PutAck, String>,
        ) -> Self {
            Self {
                lookup_result,
                put_result,
                log: Arc::new(StoreLog::default()),
            }
        }
    }

    #[async_trait]
    impl UserStore for ScriptedStore {
        async fn find_by_username_or_email(
            &self,
            _username: &str,
            _email: &str,
        ) -> Result<Vec<UserRecord>, StoreError> {
            self.log.lookup_called.store(true, Ordering::SeqCst);
            self.lookup_result.clone().map_err(StoreError::Backend)
        }

        async fn find_by_username(&self, _username: &str) -> Result<Vec<UserRecord>, StoreError> {
            unimplemented!("create never queries by username alone")
        }

        async fn scan_active(&self) -> Result<Vec<UserRecord>, StoreError> {
            unimplemented!("create never scans")
        }

        async fn put(&self, record: UserRecord) -> Result<PutAck, StoreError> {
            *self.log.put_item.lock().unwrap() = Some(record);
            self.put_result.clone().map_err(StoreError::Backend)
        }
    }

    fn sample_record() -> UserRecord {
        UserRecord {
            username: "buser".to_string(),
            email: "buser@example.com".to_string(),
            first_name: "Bob".to_string(),
            last_name: Some("User".to_string()),
            password: Some("bobtestuser".to_string()),
            date_created: 20180826095612,
            date_updated: 20180826095612,
            active: true,
        }
    }

    fn payload(record: &UserRecord) -> String {
        serde_json::to_string(record).unwrap()
    }

    fn ack() -> PutAck {
        PutAck {
            request_id: Some("req-1".to_string()),
        }
    }

    #[tokio::test]
    async fn missing_payload_is_a_contract_violation() {
        let store = ScriptedStore::new(Ok(vec![]), Ok(ack()));
        let usecase = CreateUserUsecase::new(store, Pbkdf2PasswordHasher::new());

        let err = usecase.create_user(None).await.unwrap_err();
        assert_eq!(err, DomainError::UnexpectedEvent);
        assert_eq!(err.to_string(), "event not as expected");
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let store = ScriptedStore::new(Ok(vec![]), Ok(ack()));
        let usecase = CreateUserUsecase::new(store, Pbkdf2PasswordHasher::new());

        let err = usecase.create_user(Some(r#"{"test": test}"#)).await.unwrap_err();
        assert_eq!(err, DomainError::MalformedBody);
    }

    #[tokio::test]
    async fn missing_required_field_fails_validation() {
        let store = ScriptedStore::new(Ok(vec![]), Ok(ack()));
        let log = store.log.clone();
        let usecase = CreateUserUsecase::new(store, Pbkdf2PasswordHasher::new());

        // dateUpdated missing
        let body = json!({
            "username": "buser",
            "email": "buser@example.com",
            "firstName": "Bob",
            "dateCreated": 20180826095612i64,
            "active": true,
        })
        .to_string();

        let err = usecase.create_user(Some(&body)).await.unwrap_err();
        assert_eq!(err, DomainError::Validation);
        assert!(!log.lookup_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn duplicate_username_or_email_is_rejected() {
        let store = ScriptedStore::new(Ok(vec![sample_record()]), Ok(ack()));
        let log = store.log.clone();
        let usecase = CreateUserUsecase::new(store, Pbkdf2PasswordHasher::new());

        let err = usecase
            .create_user(Some(&payload(&sample_record())))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateUser);
        assert_eq!(err.to_string(), "user/email already exists");
        assert!(log.put_item.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn new_record_without_password_is_rejected() {
        let store = ScriptedStore::new(Ok(vec![]), Ok(ack()));
        let usecase = CreateUserUsecase::new(store, Pbkdf2PasswordHasher::new());

        let mut record = sample_record();
        record.password = None;

        let err = usecase.create_user(Some(&payload(&record))).await.unwrap_err();
        assert_eq!(err, DomainError::PasswordRequired);
    }

    #[tokio::test]
    async fn new_record_is_written_with_hashed_password() {
        let store = ScriptedStore::new(Ok(vec![]), Ok(ack()));
        let log = store.log.clone();
        let hasher = Pbkdf2PasswordHasher::new();
        let usecase = CreateUserUsecase::new(store, hasher.clone());

        let result = usecase
            .create_user(Some(&payload(&sample_record())))
            .await
            .unwrap();
        assert_eq!(result, ack());

        let written = log.put_item.lock().unwrap().clone().expect("put issued");
        let stored = written.password.expect("password persisted");
        assert_ne!(stored, "bobtestuser");

        // stored value verifies against the original password
        let stored = crate::domain::models::credential::HashedPassword::new(stored);
        assert_eq!(hasher.hash_with("bobtestuser", &stored), stored);
    }

    #[tokio::test]
    async fn update_skips_the_uniqueness_lookup() {
        // any lookup would report a duplicate; the update path must not ask
        let store = ScriptedStore::new(Ok(vec![sample_record()]), Ok(ack()));
        let log = store.log.clone();
        let usecase = CreateUserUsecase::new(store, Pbkdf2PasswordHasher::new());

        let mut record = sample_record();
        record.date_updated = 20180826100000;

        usecase.create_user(Some(&payload(&record))).await.unwrap();
        assert!(!log.lookup_called.load(Ordering::SeqCst));
        assert!(log.put_item.lock().unwrap().is_some());
    }

    #[tokio::test]
    async fn update_without_password_writes_no_password() {
        let store = ScriptedStore::new(Ok(vec![]), Ok(ack()));
        let log = store.log.clone();
        let usecase = CreateUserUsecase::new(store, Pbkdf2PasswordHasher::new());

        let mut record = sample_record();
        record.date_updated = 20180826100000;
        record.password = None;

        usecase.create_user(Some(&payload(&record))).await.unwrap();
        let written = log.put_item.lock().unwrap().clone().expect("put issued");
        assert_eq!(written.password, None);
    }

    #[tokio::test]
    async fn lookup_failure_wraps_as_store_lookup_error() {
        let store = ScriptedStore::new(Err("simulated error".to_string()), Ok(ack()));
        let usecase = CreateUserUsecase::new(store, Pbkdf2PasswordHasher::new());

        let err = usecase
            .create_user(Some(&payload(&sample_record())))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::StoreLookup);
        assert_eq!(err.to_string(), "user lookup store error");
    }

    #[tokio::test]
    async fn put_failure_wraps_as_store_write_error() {
        let store = ScriptedStore::new(Ok(vec![]), Err("simulated error".to_string()));
        let usecase = CreateUserUsecase::new(store, Pbkdf2PasswordHasher::new());

        let err = usecase
            .create_user(Some(&payload(&sample_record())))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::StoreWrite);
        assert_eq!(err.to_string(), "user store write error");
    }
}
