//! Blocking client for the Loops email API.
//!
//! # Overview
//! `LoopsClient` sends one HTTP request per call and turns the response into
//! either the parsed JSON body or a typed `LoopsError`. Resource views
//! (`contacts()`, `events()`, `transactional()`, ...) shape parameters for
//! each endpoint and delegate to `LoopsClient::request`.
//!
//! ```no_run
//! use loops_core::{Event, LoopsClient};
//!
//! # fn main() -> loops_core::Result<()> {
//! let client = LoopsClient::from_env()?;
//! client.events().send(&Event::new("signup").email("a@b.com"))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - The client is immutable after construction. A new API key means a new
//!   client.
//! - I/O sits behind the `Transport` trait. `UreqTransport` is the default;
//!   `build_request` / `parse_response` are public for hosts that do their
//!   own I/O.
//! - Nothing is retried. Rate limits surface as `LoopsError::RateLimited`
//!   with the server's counters.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod resources;
pub mod transport;
pub mod types;

pub use client::LoopsClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, LoopsError, RateLimitError, Result, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use request::RequestSpec;
pub use resources::transactional::idempotency_key;
pub use transport::{Transport, UreqTransport};
pub use types::{
    Attachment, ContactData, Event, PropertyListFilter, PropertyType, TransactionalEmail,
};
