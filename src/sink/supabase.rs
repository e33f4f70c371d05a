use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;
use serde_json::Value;

use super::{DataSink, Filter, Result, SinkError};
use crate::config::AppConfig;

/// Supabase REST sink. Talks to the project's `/rest/v1` endpoint with the
/// anon key, the same surface the original web client used.
#[derive(Debug, Clone)]
pub struct SupabaseSink {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseSink {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        if base_url.trim().is_empty() || api_key.trim().is_empty() {
            return Err(SinkError::NotConfigured(
                "SUPABASE_URL and SUPABASE_ANON_KEY must be set".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.supabase_url, &config.supabase_key)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Startup probe: one cheap request against the REST root so a bad URL or
    /// key surfaces immediately instead of on first submission.
    pub async fn check_connection(&self) -> Result<()> {
        let response = self
            .authed(self.client.get(format!("{}/rest/v1/", self.base_url)))
            .send()
            .await
            .map_err(|e| SinkError::Request(e.to_string()))?;

        if response.status().is_success() {
            info!("Sink connection check successful: {}", self.base_url);
            Ok(())
        } else {
            Err(SinkError::Rejected {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            })
        }
    }
}

#[async_trait]
impl DataSink for SupabaseSink {
    async fn insert(&self, table: &str, record: Value) -> Result<()> {
        let response = self
            .authed(self.client.post(self.table_url(table)))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=minimal")
            .json(&record)
            .send()
            .await
            .map_err(|e| SinkError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!("Inserted record into {}", table);
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            error!("Insert into {} rejected with {}: {}", table, status, body);
            Err(SinkError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn select(
        &self,
        table: &str,
        filter: Filter<'_>,
        order: Option<&str>,
    ) -> Result<Vec<Value>> {
        let mut request = self
            .authed(self.client.get(self.table_url(table)))
            .query(&[("select", "*")]);

        if let Some((column, value)) = filter {
            request = request.query(&[(column, format!("eq.{}", value))]);
        }
        if let Some(order) = order {
            request = request.query(&[("order", order)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SinkError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Select from {} rejected with {}: {}", table, status, body);
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| SinkError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_credentials() {
        assert!(matches!(
            SupabaseSink::new("", "key"),
            Err(SinkError::NotConfigured(_))
        ));
        assert!(matches!(
            SupabaseSink::new("https://example.supabase.co", "  "),
            Err(SinkError::NotConfigured(_))
        ));
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let sink = SupabaseSink::new("https://example.supabase.co/", "key").unwrap();
        assert_eq!(
            sink.table_url("survey_responses"),
            "https://example.supabase.co/rest/v1/survey_responses"
        );
    }
}
