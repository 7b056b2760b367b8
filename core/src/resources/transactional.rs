//! Transactional email resource.

use serde_json::Value;
use uuid::Uuid;

use crate::client::LoopsClient;
use crate::error::Result;
use crate::request::RequestSpec;
use crate::transport::Transport;
use crate::types::TransactionalEmail;

pub const DEFAULT_PER_PAGE: u32 = 20;

/// A fresh `Idempotency-Key` header for `send_with_headers`.
pub fn idempotency_key() -> (String, String) {
    ("Idempotency-Key".to_string(), Uuid::new_v4().to_string())
}

pub struct TransactionalResource<'c, T: Transport> {
    client: &'c LoopsClient<T>,
}

impl<'c, T: Transport> TransactionalResource<'c, T> {
    pub(crate) fn new(client: &'c LoopsClient<T>) -> Self {
        Self { client }
    }

    /// List published transactional emails, one page at a time.
    ///
    /// `cursor` is always sent, empty when `None`.
    pub fn list(&self, per_page: Option<u32>, cursor: Option<&str>) -> Result<Value> {
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).to_string();
        self.client.request(
            RequestSpec::get("v1/transactional")
                .query("perPage", Some(per_page))
                .query("cursor", cursor),
        )
    }

    pub fn send(&self, email: &TransactionalEmail) -> Result<Value> {
        self.send_with_headers(email, &[])
    }

    pub fn send_with_headers(
        &self,
        email: &TransactionalEmail,
        headers: &[(String, String)],
    ) -> Result<Value> {
        let spec = RequestSpec::post("v1/transactional")
            .headers(headers)
            .body(email)?;
        self.client.request(spec)
    }
}
