//! The request executor shared by every resource module.
//!
//! # Design
//! `LoopsClient` owns a base URL, the default headers derived from the API
//! key, and one transport built at construction. None of these change after
//! construction. A call goes through three steps:
//!
//! 1. `build_request` turns a `RequestSpec` into an `HttpRequest`: joins the
//!    path onto the base URL, merges caller headers over the defaults and
//!    encodes the body.
//! 2. The transport performs exactly one round-trip.
//! 3. `parse_response` classifies the `HttpResponse` by status.
//!
//! Steps 1 and 3 touch no network, so a host can drive them itself.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ApiError, LoopsError, RateLimitError, Result, UNEXPECTED_ERROR_BODY};
use crate::http::{merge_headers, HttpRequest, HttpResponse};
use crate::request::RequestSpec;
use crate::resources::{
    ApiKeyResource, ContactPropertiesResource, ContactsResource, CustomFieldsResource,
    EventsResource, MailingListsResource, TransactionalResource,
};
use crate::transport::{Transport, UreqTransport};

/// Blocking client for the Loops API.
pub struct LoopsClient<T: Transport = UreqTransport> {
    base_url: String,
    default_headers: Vec<(String, String)>,
    transport: T,
}

impl LoopsClient<UreqTransport> {
    /// Client for the production API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(api_key))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self::with_transport(config, transport)
    }

    /// Client configured from `LOOPS_API_KEY` / `LOOPS_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        ClientConfig::from_env().map(Self::from_config)
    }
}

impl<T: Transport> LoopsClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let default_headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", config.api_key()),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        Self {
            base_url: config.base_url().to_string(),
            default_headers,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one API call and classify the result.
    pub fn request(&self, spec: RequestSpec) -> Result<Value> {
        let request = self.build_request(spec)?;
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self
            .transport
            .send(&request)
            .map_err(LoopsError::Transport)?;
        debug!(status = response.status, "received response");
        self.parse_response(response)
    }

    pub fn build_request(&self, spec: RequestSpec) -> Result<HttpRequest> {
        let body = spec
            .body
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(LoopsError::Serialization)?;

        Ok(HttpRequest {
            method: spec.method,
            url: format!("{}{}", self.base_url, spec.path.trim_start_matches('/')),
            query: spec.query,
            headers: merge_headers(&self.default_headers, &spec.headers),
            body,
        })
    }

    /// Map a response to its parsed JSON body or to the matching error.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value> {
        match response.status {
            200 => serde_json::from_str(&response.body).map_err(LoopsError::InvalidResponse),
            429 => Err(RateLimitError {
                limit: response.header("x-ratelimit-limit").unwrap_or_default().to_string(),
                remaining: response
                    .header("x-ratelimit-remaining")
                    .unwrap_or_default()
                    .to_string(),
            }
            .into()),
            400 | 404 | 405 | 409 | 500 => {
                Err(ApiError::new(response.status, response.body).into())
            }
            status => Err(ApiError::new(status, UNEXPECTED_ERROR_BODY).into()),
        }
    }

    pub fn api_key(&self) -> ApiKeyResource<'_, T> {
        ApiKeyResource::new(self)
    }

    pub fn contacts(&self) -> ContactsResource<'_, T> {
        ContactsResource::new(self)
    }

    pub fn contact_properties(&self) -> ContactPropertiesResource<'_, T> {
        ContactPropertiesResource::new(self)
    }

    pub fn custom_fields(&self) -> CustomFieldsResource<'_, T> {
        CustomFieldsResource::new(self)
    }

    pub fn events(&self) -> EventsResource<'_, T> {
        EventsResource::new(self)
    }

    pub fn mailing_lists(&self) -> MailingListsResource<'_, T> {
        MailingListsResource::new(self)
    }

    pub fn transactional(&self) -> TransactionalResource<'_, T> {
        TransactionalResource::new(self)
    }
}

impl<T: Transport> fmt::Debug for LoopsClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopsClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
