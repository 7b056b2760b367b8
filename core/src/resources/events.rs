//! Event resource.

use serde_json::Value;

use crate::client::LoopsClient;
use crate::error::{LoopsError, Result};
use crate::request::RequestSpec;
use crate::transport::Transport;
use crate::types::Event;

pub struct EventsResource<'c, T: Transport> {
    client: &'c LoopsClient<T>,
}

impl<'c, T: Transport> EventsResource<'c, T> {
    pub(crate) fn new(client: &'c LoopsClient<T>) -> Self {
        Self { client }
    }

    pub fn send(&self, event: &Event) -> Result<Value> {
        self.send_with_headers(event, &[])
    }

    /// Send an event with extra headers, e.g. an `Idempotency-Key`.
    pub fn send_with_headers(&self, event: &Event, headers: &[(String, String)]) -> Result<Value> {
        if event.email.is_none() && event.user_id.is_none() {
            return Err(LoopsError::invalid_argument(
                "You must provide an email or user_id value.",
            ));
        }
        self.client.request(
            RequestSpec::post("v1/events/send")
                .headers(headers)
                .json(event.to_body()),
        )
    }
}
