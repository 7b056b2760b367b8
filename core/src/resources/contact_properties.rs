//! Contact property resource.

use serde::Serialize;
use serde_json::Value;

use crate::client::LoopsClient;
use crate::error::Result;
use crate::request::RequestSpec;
use crate::transport::Transport;
use crate::types::{PropertyListFilter, PropertyType};

#[derive(Serialize)]
struct NewProperty<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: PropertyType,
}

pub struct ContactPropertiesResource<'c, T: Transport> {
    client: &'c LoopsClient<T>,
}

impl<'c, T: Transport> ContactPropertiesResource<'c, T> {
    pub(crate) fn new(client: &'c LoopsClient<T>) -> Self {
        Self { client }
    }

    pub fn create(&self, name: &str, kind: PropertyType) -> Result<Value> {
        let spec = RequestSpec::post("v1/contacts/properties").body(&NewProperty { name, kind })?;
        self.client.request(spec)
    }

    /// List properties. `filter` must be `None`, `"all"` or `"custom"`;
    /// `None` means `"all"`.
    pub fn list(&self, filter: Option<&str>) -> Result<Value> {
        let filter = match filter {
            Some(value) => value.parse()?,
            None => PropertyListFilter::All,
        };
        self.list_filtered(filter)
    }

    pub fn list_filtered(&self, filter: PropertyListFilter) -> Result<Value> {
        self.client.request(
            RequestSpec::get("v1/contacts/properties").query("list", Some(filter.as_str())),
        )
    }
}
