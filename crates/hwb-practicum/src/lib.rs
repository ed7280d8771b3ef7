//! Yandex Practicum review API adapter.
//!
//! Implements the `hwb-core` HomeworkSource port over the
//! `homework_statuses` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use hwb_core::{config::Config, domain::Cursor, errors::Error, ports::HomeworkSource, Result};

#[derive(Serialize)]
struct StatusQuery {
    from_date: i64,
}

#[derive(Clone)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http: reqwest::Client,
}

impl PracticumClient {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("http client build failed: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into(),
            token: token.into(),
            http,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(
            cfg.endpoint.clone(),
            cfg.practicum_token.clone(),
            cfg.request_timeout,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn fetch_statuses(&self, from_date: Option<Cursor>) -> Result<Value> {
        let from_date = from_date.unwrap_or_else(Cursor::now);
        debug!("Requesting {} from_date={}", self.endpoint, from_date.0);

        let resp = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&StatusQuery {
                from_date: from_date.0,
            })
            .send()
            .await
            .map_err(|e| {
                error!("Endpoint unreachable: {e}");
                Error::Connectivity(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            error!("API answered with status {status}");
            return Err(Error::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| {
            error!("Failed to read API response body: {e}");
            Error::Connectivity(e.to_string())
        })?;

        serde_json::from_str(&body).map_err(|e| {
            error!("API returned invalid JSON: {e}");
            Error::Decode(e.to_string())
        })
    }
}
