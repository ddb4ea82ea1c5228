//! Backend Service client over `fetch`
//!
//! PostgREST conventions: `/rest/v1/{table}` with `apikey` and bearer
//! headers, `Prefer: return=representation` on writes, `id=eq.{id}` for row
//! targeting. Failures come back as `BackendError`.

use bfp_admin_common::{BackendError, Query};
use gloo::storage::{LocalStorage, Storage};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

const URL_KEY: &str = "bfp.backend_url";
const API_KEY: &str = "bfp.backend_key";

/// Backend URL and key, kept in localStorage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendSettings {
    pub url: String,
    pub key: String,
}

impl BackendSettings {
    pub fn load() -> Self {
        Self {
            url: LocalStorage::get(URL_KEY).unwrap_or_default(),
            key: LocalStorage::get(API_KEY).unwrap_or_default(),
        }
    }

    pub fn save(&self) -> Result<(), String> {
        LocalStorage::set(URL_KEY, self.url.trim()).map_err(|e| format!("could not save settings: {}", e))?;
        LocalStorage::set(API_KEY, self.key.trim()).map_err(|e| format!("could not save settings: {}", e))?;
        Ok(())
    }

    pub fn clear() {
        LocalStorage::delete(URL_KEY);
        LocalStorage::delete(API_KEY);
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestClient {
    base_url: String,
    api_key: String,
}

fn js_error(err: JsValue) -> BackendError {
    let message = err.as_string().unwrap_or_else(|| format!("{:?}", err));
    BackendError::new("network", message)
}

fn encode(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}

/// `a=b&c=d` with percent-encoded values
pub fn query_string(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn into_rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

impl RestClient {
    pub fn new(settings: &BackendSettings) -> Self {
        Self {
            base_url: settings.url.trim().trim_end_matches('/').to_string(),
            api_key: settings.key.trim().to_string(),
        }
    }

    fn url(&self, table: &str, pairs: &[(String, String)]) -> String {
        let base = format!("{}/rest/v1/{}", self.base_url, table);
        if pairs.is_empty() {
            base
        } else {
            format!("{}?{}", base, query_string(pairs))
        }
    }

    async fn send(&self, method: &str, url: &str, body: Option<&Value>) -> Result<Value, BackendError> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = body {
            let text = serde_json::to_string(body).map_err(|e| BackendError::new("encode", e.to_string()))?;
            opts.set_body(&JsValue::from_str(&text));
        }

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        let headers = request.headers();
        headers.set("Accept", "application/json").map_err(js_error)?;
        if body.is_some() {
            headers.set("Content-Type", "application/json").map_err(js_error)?;
        }
        if method != "GET" {
            headers.set("Prefer", "return=representation").map_err(js_error)?;
        }
        if !self.api_key.is_empty() {
            headers.set("apikey", &self.api_key).map_err(js_error)?;
            headers
                .set("Authorization", &format!("Bearer {}", self.api_key))
                .map_err(js_error)?;
        }

        let window = web_sys::window().ok_or_else(|| BackendError::new("network", "no window"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await.map_err(js_error)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        let text = JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();

        if !resp.ok() {
            return Err(BackendError::from_response(resp.status(), &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Array(Vec::new()));
        }
        serde_json::from_str(&text).map_err(|e| BackendError::new("decode", e.to_string()))
    }

    pub async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, BackendError> {
        let url = self.url(table, &query.pairs());
        self.send("GET", &url, None).await.map(into_rows)
    }

    pub async fn insert(&self, table: &str, row: &Value) -> Result<Value, BackendError> {
        let url = self.url(table, &[]);
        let rows = into_rows(self.send("POST", &url, Some(row)).await?);
        Ok(rows.into_iter().next().unwrap_or(Value::Null))
    }

    pub async fn update(&self, table: &str, id: &str, patch: &Value) -> Result<Vec<Value>, BackendError> {
        let url = self.url(table, &[("id".to_string(), format!("eq.{}", id))]);
        self.send("PATCH", &url, Some(patch)).await.map(into_rows)
    }

    pub async fn delete(&self, table: &str, id: &str) -> Result<Vec<Value>, BackendError> {
        let url = self.url(table, &[("id".to_string(), format!("eq.{}", id))]);
        self.send("DELETE", &url, None).await.map(into_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_rows() {
        assert_eq!(into_rows(json!([{"id": 1}])).len(), 1);
        assert!(into_rows(Value::Null).is_empty());
        assert_eq!(into_rows(json!({"id": 1})), vec![json!({"id": 1})]);
    }

    #[test]
    fn test_settings_configured() {
        let mut settings = BackendSettings::default();
        assert!(!settings.is_configured());
        settings.url = "https://demo.supabase.co/".into();
        assert!(settings.is_configured());
        let client = RestClient::new(&settings);
        assert_eq!(client.url("personnel", &[]), "https://demo.supabase.co/rest/v1/personnel");
    }
}
