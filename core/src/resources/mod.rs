//! Resource namespaces for the Loops API.
//!
//! Each resource borrows the client and issues exactly one request per
//! public operation, after any local argument checks.

mod api_key;
mod contact_properties;
mod contacts;
mod custom_fields;
mod events;
mod mailing_lists;
pub mod transactional;

pub use api_key::ApiKeyResource;
pub use contact_properties::ContactPropertiesResource;
pub use contacts::ContactsResource;
pub use custom_fields::CustomFieldsResource;
pub use events::EventsResource;
pub use mailing_lists::MailingListsResource;
pub use transactional::TransactionalResource;
