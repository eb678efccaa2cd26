//! User-profile collaborator interface.
//!
//! The profile service owns the schema and CRUD; the pipeline only ever
//! reads a single record by id to personalize answers.

use async_trait::async_trait;
use serde_json::Value;

use crate::core::config::ProfileConfig;
use crate::core::errors::PipelineError;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch one profile. `Ok(None)` means the id is unknown.
    async fn get_by_id(&self, id: &str) -> Result<Option<Value>, PipelineError>;
}

/// HTTP client for the profile service.
#[derive(Clone)]
pub struct HttpProfileStore {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpProfileStore {
    pub fn new(config: &ProfileConfig) -> Self {
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn get_by_id(&self, id: &str) -> Result<Option<Value>, PipelineError> {
        let url = format!("{}/api/profiles/{}", self.endpoint, id);
        let res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(PipelineError::internal)?;

        if res.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Internal(format!(
                "profile service error ({}): {}",
                status, text
            )));
        }

        let profile: Value = res.json().await.map_err(PipelineError::internal)?;
        Ok(Some(profile))
    }
}

/// Renders the health-relevant slice of a profile for prompt use.
///
/// Only fields that matter to a nutrition/risk assessment are included;
/// identifying fields (name, email, phone) stay out of model prompts.
pub fn profile_prompt_block(profile: &Value) -> String {
    const FIELDS: &[&str] = &[
        "gender",
        "height",
        "weight",
        "bmi",
        "waistCircumference",
        "bloodPressure",
        "bloodSugar",
        "cholesterol",
        "conditions",
        "otherConditions",
        "allergiesMedications",
        "activityLevel",
        "dietaryPreference",
        "smoking",
        "alcohol",
        "sleep",
    ];

    let mut lines = Vec::new();
    for field in FIELDS {
        if let Some(value) = profile.get(field) {
            if value.is_null() {
                continue;
            }
            let rendered = match value {
                Value::String(s) if s.is_empty() => continue,
                Value::String(s) => s.clone(),
                Value::Array(items) => items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                other => other.to_string(),
            };
            if rendered.is_empty() {
                continue;
            }
            lines.push(format!("- {}: {}", field, rendered));
        }
    }

    if lines.is_empty() {
        return String::new();
    }
    format!("User health profile:\n{}", lines.join("\n"))
}
