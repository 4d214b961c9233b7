//! The request/response seam between [`crate::CatalogClient`] and the network.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::{ClientConfig, TransportError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        })
    }
}

/// One API call, with a path relative to the base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// A response of any status. Non-JSON error bodies are kept as a JSON string.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// The error message the backend attached, e.g. FastAPI's `{"detail": ...}`.
    pub fn detail(&self) -> Option<String> {
        match self.body.as_ref()? {
            Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            Value::Object(obj) => match obj.get("detail")? {
                Value::String(text) => Some(text.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            },
            _ => None,
        }
    }

    pub(crate) fn into_status_error(self) -> TransportError {
        let detail = self.detail();
        TransportError::Status {
            status: self.status,
            detail,
        }
    }
}

/// Sends API requests. Implementations perform no retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// [`Transport`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| TransportError::Network {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;
        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.config.join(&request.path);
        let mut builder = match request.method {
            Method::Get => self.http_client.get(&url),
            Method::Post => self.http_client.post(&url),
            Method::Put => self.http_client.put(&url),
            Method::Delete => self.http_client.delete(&url),
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let network = |e: reqwest::Error| TransportError::Network {
            url: url.clone(),
            message: e.to_string(),
        };
        let response = builder.send().await.map_err(network)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(network)?;
        tracing::trace!(%url, status, len = bytes.len(), "menu api response");

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ApiResponse::new(status, None));
        }
        let body = match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => value,
            Err(e) if (200..300).contains(&status) => {
                return Err(TransportError::Body(e.to_string()));
            }
            Err(_) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        };
        Ok(ApiResponse::new(status, Some(body)))
    }
}
