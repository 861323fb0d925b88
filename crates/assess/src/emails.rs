use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

/// One customer email. The record shape is not fixed, so the raw JSON
/// object is kept and handed to chains whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailRecord(Map<String, Value>);

const SENDER_KEYS: [&str; 3] = ["sender", "from", "source"];
const BODY_KEYS: [&str; 4] = ["body", "email", "text", "content"];

impl EmailRecord {
    pub fn sender(&self) -> Option<&str> {
        self.first_str(&SENDER_KEYS)
    }

    pub fn body(&self) -> Option<&str> {
        self.first_str(&BODY_KEYS)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    fn first_str(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.0.get(*k).and_then(Value::as_str))
    }
}

pub async fn load_emails(path: &Path) -> Result<Vec<EmailRecord>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read emails file: {:?}", path))?;

    let emails: Vec<EmailRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Emails file is not a JSON array of objects: {:?}", path))?;

    Ok(emails)
}
