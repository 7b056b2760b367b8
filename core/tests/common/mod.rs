#![allow(dead_code)]

//! Shared helpers for tests that drive `LoopsClient` without a network.

use std::collections::VecDeque;
use std::sync::Mutex;

use loops_core::{ClientConfig, HttpRequest, HttpResponse, LoopsClient, Transport, TransportError};

/// Records every request and answers from a queue of canned responses.
/// Once the queue is empty it answers `200 {"success":true}`.
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(response: HttpResponse) -> Self {
        let transport = Self::default();
        transport.responses.lock().unwrap().push_back(response);
        transport
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> HttpRequest {
        self.sent().pop().expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request.clone());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| HttpResponse::new(200, r#"{"success":true}"#)))
    }
}

pub fn client(transport: &RecordingTransport) -> LoopsClient<&RecordingTransport> {
    LoopsClient::with_transport(ClientConfig::new("test-key"), transport)
}

/// The request body parsed back into JSON.
pub fn body(request: &HttpRequest) -> serde_json::Value {
    serde_json::from_str(request.body.as_deref().expect("request has no body")).unwrap()
}
