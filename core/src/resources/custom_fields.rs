//! Custom field resource.

use serde_json::Value;

use crate::client::LoopsClient;
use crate::error::Result;
use crate::request::RequestSpec;
use crate::transport::Transport;

pub struct CustomFieldsResource<'c, T: Transport> {
    client: &'c LoopsClient<T>,
}

impl<'c, T: Transport> CustomFieldsResource<'c, T> {
    pub(crate) fn new(client: &'c LoopsClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Value> {
        self.client.request(RequestSpec::get("v1/customFields"))
    }
}
