use super::{Backend, BackendResult};
use crate::config::Config;
use crate::error::Result;
use async_trait::async_trait;
use bfp_admin_common::{BackendError, Query};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::Value;

/// PostgREST client over reqwest
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.get_backend_url()?, config.get_api_key())
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let mut req = self
            .http
            .request(method, self.table_url(table))
            .header("Accept", "application/json");
        if let Some(key) = &self.api_key {
            req = req
                .header("apikey", key)
                .header("Authorization", format!("Bearer {}", key));
        }
        req
    }

    async fn send(&self, req: RequestBuilder) -> BackendResult<Value> {
        let resp = req.send().await.map_err(transport_error)?;
        let status = resp.status();
        let body = resp.text().await.map_err(transport_error)?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "backend response");

        if !status.is_success() {
            return Err(BackendError::from_response(status.as_u16(), &body));
        }
        if body.trim().is_empty() || status == StatusCode::NO_CONTENT {
            return Ok(Value::Array(Vec::new()));
        }
        serde_json::from_str(&body).map_err(|e| BackendError::new("decode", e.to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> BackendError {
    let code = if err.is_timeout() { "timeout" } else { "network" };
    BackendError::new(code, err.to_string())
}

fn into_rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

fn id_filter(id: &str) -> [(&'static str, String); 1] {
    [("id", format!("eq.{}", id))]
}

#[async_trait]
impl Backend for RestClient {
    async fn select(&self, table: &str, query: &Query) -> BackendResult<Vec<Value>> {
        tracing::debug!(table, query = ?query.pairs(), "select");
        let req = self.request(Method::GET, table).query(&query.pairs());
        Ok(into_rows(self.send(req).await?))
    }

    async fn insert(&self, table: &str, row: Value) -> BackendResult<Value> {
        tracing::debug!(table, "insert");
        let req = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&row);
        into_rows(self.send(req).await?)
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::new("empty", format!("insert into {} returned no row", table)))
    }

    async fn update(&self, table: &str, id: &str, patch: Value) -> BackendResult<Vec<Value>> {
        tracing::debug!(table, id, "update");
        let req = self
            .request(Method::PATCH, table)
            .query(&id_filter(id))
            .header("Prefer", "return=representation")
            .json(&patch);
        Ok(into_rows(self.send(req).await?))
    }

    async fn delete(&self, table: &str, id: &str) -> BackendResult<Vec<Value>> {
        tracing::debug!(table, id, "delete");
        let req = self
            .request(Method::DELETE, table)
            .query(&id_filter(id))
            .header("Prefer", "return=representation");
        Ok(into_rows(self.send(req).await?))
    }
}
