//! Cloudflare API client
//!
//! A single authenticated round trip per call. The [`CloudflareApi`] trait is
//! the seam the tool handlers are written against.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value;

use crate::cloudflare::types::ApiResponse;
use crate::config::CloudflareConfig;
use crate::error::{CloudMcpError, CloudflareApiError, Result};

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized as JSON
    Json(Value),

    /// Sent verbatim as `text/plain`
    Text(String),

    /// Sent as `multipart/form-data`
    Multipart(Vec<MultipartField>),
}

/// One part of a multipart upload
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartField {
    pub name: String,
    pub value: String,
    pub file_name: Option<String>,
    pub content_type: String,
}

impl MultipartField {
    pub fn new(name: impl Into<String>, value: impl Into<String>, content_type: &str) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            file_name: None,
            content_type: content_type.to_string(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

/// Access to the Cloudflare v4 API
#[async_trait]
pub trait CloudflareApi: Send + Sync {
    /// Issue one call and return the envelope's `result`.
    ///
    /// Fails when the envelope reports `success: false`.
    async fn request(&self, method: Method, endpoint: &str, body: Option<RequestBody>)
        -> Result<Value>;

    async fn get(&self, endpoint: &str) -> Result<Value> {
        self.request(Method::GET, endpoint, None).await
    }

    async fn post(&self, endpoint: &str, body: Value) -> Result<Value> {
        self.request(Method::POST, endpoint, Some(RequestBody::Json(body)))
            .await
    }

    async fn patch(&self, endpoint: &str, body: Value) -> Result<Value> {
        self.request(Method::PATCH, endpoint, Some(RequestBody::Json(body)))
            .await
    }
}

/// HTTP implementation of [`CloudflareApi`]
pub struct CloudflareClient {
    /// HTTP client
    http_client: reqwest::Client,

    config: CloudflareConfig,
}

impl CloudflareClient {
    /// Create a new Cloudflare client
    pub fn new(config: CloudflareConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.api_base_url, endpoint)
    }
}

#[async_trait]
impl CloudflareApi for CloudflareClient {
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<RequestBody>,
    ) -> Result<Value> {
        tracing::debug!(%method, endpoint, "Cloudflare API request");

        let mut request = self
            .http_client
            .request(method.clone(), self.url(endpoint))
            .bearer_auth(&self.config.api_token);

        request = match body.filter(|_| sends_body(&method)) {
            Some(RequestBody::Json(value)) => request.json(&value),
            Some(RequestBody::Text(text)) => request.header(CONTENT_TYPE, "text/plain").body(text),
            Some(RequestBody::Multipart(fields)) => request.multipart(build_form(fields)?),
            None => request.header(CONTENT_TYPE, "application/json"),
        };

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let envelope: ApiResponse = serde_json::from_str(&text).map_err(|_| {
            CloudMcpError::Cloudflare(CloudflareApiError::UnexpectedResponse {
                message: format!("HTTP {} with non-JSON body: {}", status, preview(&text)),
            })
        })?;

        if !envelope.success {
            tracing::debug!(%status, endpoint, "Cloudflare API reported failure");
        }

        envelope.into_result()
    }
}

/// Only POST, PUT and PATCH carry a body
pub fn sends_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

/// Append URL-encoded query parameters to an endpoint
pub fn with_query(endpoint: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }

    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", endpoint, query)
}

fn build_form(fields: Vec<MultipartField>) -> Result<Form> {
    let mut form = Form::new();
    for field in fields {
        let mut part = Part::text(field.value).mime_str(&field.content_type)?;
        if let Some(file_name) = field.file_name {
            part = part.file_name(file_name);
        }
        form = form.part(field.name, part);
    }
    Ok(form)
}

fn preview(text: &str) -> &str {
    let end = text
        .char_indices()
        .nth(200)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[..end]
}
