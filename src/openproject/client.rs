use anyhow::{Context, Result};
use base64::Engine;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::MigrationError;

/// Authenticated JSON access to the OpenProject API v3.
pub struct ApiClient {
    base_url: String,
    auth_header: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: String, api_token: &str) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(format!("apikey:{api_token}"));
        Self {
            base_url,
            auth_header: format!("Basic {encoded}"),
            client: reqwest::Client::new(),
        }
    }

    /// Absolute URLs (such as self links from earlier responses) pass through;
    /// anything else is appended to the configured endpoint.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{path}", self.base_url)
        }
    }

    pub async fn fetch(
        &self,
        path: &str,
        method: Method,
        body: Option<String>,
        headers: &[(&str, &str)],
    ) -> Result<Value> {
        let url = self.resolve(path);
        let overridden = |name: &str| headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name));

        let mut request = self.client.request(method.clone(), &url);
        if !overridden(CONTENT_TYPE.as_str()) {
            request = request.header(CONTENT_TYPE, "application/json");
        }
        if !overridden(AUTHORIZATION.as_str()) {
            request = request.header(AUTHORIZATION, &self.auth_header);
        }
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        tracing::debug!(%method, %url, "OpenProject request");
        let resp = request
            .send()
            .await
            .with_context(|| format!("OpenProject request to {url} failed"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %url, %body, "OpenProject rejected request");
            return Err(MigrationError::Api {
                status: status.as_u16(),
                url,
                body,
            }
            .into());
        }

        resp.json()
            .await
            .with_context(|| format!("Failed to parse OpenProject response from {url}"))
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.fetch(path, Method::GET, None, &[]).await
    }

    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value> {
        let body = serde_json::to_string(body)?;
        self.fetch(path, Method::POST, Some(body), &[]).await
    }
}
