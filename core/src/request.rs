//! The normalized description of one outgoing API call.

use serde::Serialize;
use serde_json::Value;

use crate::error::{LoopsError, Result};
use crate::http::HttpMethod;

/// What a resource module hands to `LoopsClient::request`.
///
/// `path` is relative to the client's base URL. `headers` are merged over the
/// client's defaults and win on collision.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, Option<String>)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Add a query parameter. `None` is kept and sent as an empty value.
    pub fn query<V: Into<String>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.query.push((key.into(), value.map(Into::into)));
        self
    }

    pub fn headers(mut self, headers: &[(String, String)]) -> Self {
        self.headers.extend_from_slice(headers);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` into the request payload.
    pub fn body<S: Serialize + ?Sized>(self, body: &S) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(LoopsError::Serialization)?;
        Ok(self.json(value))
    }
}
