//! API key resource.

use serde_json::Value;

use crate::client::LoopsClient;
use crate::error::Result;
use crate::request::RequestSpec;
use crate::transport::Transport;

pub struct ApiKeyResource<'c, T: Transport> {
    client: &'c LoopsClient<T>,
}

impl<'c, T: Transport> ApiKeyResource<'c, T> {
    pub(crate) fn new(client: &'c LoopsClient<T>) -> Self {
        Self { client }
    }

    /// Check that the configured key is accepted.
    pub fn test(&self) -> Result<Value> {
        self.client.request(RequestSpec::get("v1/api-key"))
    }
}
