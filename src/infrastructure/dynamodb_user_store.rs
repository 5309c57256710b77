use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::{Client, config::Region, operation::RequestId, types::AttributeValue};

use crate::{
    config::StoreConfig,
    domain::{
        error::StoreError,
        models::user::{PutAck, UserRecord},
        repositories::user_store::UserStore,
    },
};

/// DynamoDB-backed user store. One table, keyed by username.
#[derive(Clone)]
pub struct DynamoDbUserStore {
    client: Client,
    table_name: String,
}

impl DynamoDbUserStore {
    pub async fn new(config: &StoreConfig) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        Self {
            client: Client::new(&shared),
            table_name: config.table_name.clone(),
        }
    }
}

#[async_trait]
impl UserStore for DynamoDbUserStore {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Vec<UserRecord>, StoreError> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .filter_expression("email = :email or username = :username")
            .expression_attribute_values(":email", AttributeValue::S(email.to_string()))
            .expression_attribute_values(":username", AttributeValue::S(username.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        output.items.unwrap_or_default().iter().map(from_item).collect()
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<UserRecord>, StoreError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("username = :username")
            .expression_attribute_values(":username", AttributeValue::S(username.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        output.items.unwrap_or_default().iter().map(from_item).collect()
    }

    async fn scan_active(&self) -> Result<Vec<UserRecord>, StoreError> {
        // first page only
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .filter_expression("active = :a")
            .expression_attribute_values(":a", AttributeValue::Bool(true))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        output.items.unwrap_or_default().iter().map(from_item).collect()
    }

    async fn put(&self, record: UserRecord) -> Result<PutAck, StoreError> {
        let output = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(&record)))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(PutAck {
            request_id: output.request_id().map(str::to_string),
        })
    }
}

fn to_item(record: &UserRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert("username".to_string(), AttributeValue::S(record.username.clone()));
    item.insert("email".to_string(), AttributeValue::S(record.email.clone()));
    item.insert("firstName".to_string(), AttributeValue::S(record.first_name.clone()));
    if let Some(last_name) = &record.last_name {
        item.insert("lastName".to_string(), AttributeValue::S(last_name.clone()));
    }
    if let Some(password) = &record.password {
        item.insert("password".to_string(), AttributeValue::S(password.clone()));
    }
    item.insert(
        "dateCreated".to_string(),
        AttributeValue::N(record.date_created.to_string()),
    );
    item.insert(
        "dateUpdated".to_string(),
        AttributeValue::N(record.date_updated.to_string()),
    );
    item.insert("active".to_string(), AttributeValue::Bool(record.active));
    item
}

fn from_item(item: &HashMap<String, AttributeValue>) -> Result<UserRecord, StoreError> {
    Ok(UserRecord {
        username: string_attr(item, "username")?,
        email: string_attr(item, "email")?,
        first_name: string_attr(item, "firstName")?,
        last_name: optional_string_attr(item, "lastName"),
        password: optional_string_attr(item, "password"),
        date_created: number_attr(item, "dateCreated")?,
        date_updated: number_attr(item, "dateUpdated")?,
        active: bool_attr(item, "active")?,
    })
}

fn string_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Result<String, StoreError> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| StoreError::Backend(format!("stored item missing string attribute {name}")))
}

fn optional_string_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Option<String> {
    item.get(name).and_then(|v| v.as_s().ok()).cloned()
}

fn number_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Result<i64, StoreError> {
    item.get(name)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse::<i64>().ok())
        .ok_or_else(|| StoreError::Backend(format!("stored item missing number attribute {name}")))
}

fn bool_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Result<bool, StoreError> {
    item.get(name)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| StoreError::Backend(format!("stored item missing bool attribute {name}")))
}
