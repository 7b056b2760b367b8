//! Request payloads for the resource modules.
//!
//! # Design
//! Each operation that sends a body has its own struct with explicit
//! optionality. Contacts and events also accept a map of free-form contact
//! properties, which is merged into the top level of the JSON body after the
//! named fields, so a property with the same key as a named field replaces it.
//! Responses are returned as `serde_json::Value` and are not modelled here.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LoopsError;

/// Contact fields sent by `contacts().create` and `contacts().update`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactData {
    pub email: String,
    /// Mailing list id to subscribed flag.
    pub mailing_lists: BTreeMap<String, bool>,
    /// Any other contact field, e.g. `firstName` or a custom property.
    pub properties: Map<String, Value>,
}

impl ContactData {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn mailing_list(mut self, list_id: impl Into<String>, subscribed: bool) -> Self {
        self.mailing_lists.insert(list_id.into(), subscribed);
        self
    }

    pub(crate) fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("email".to_string(), Value::String(self.email.clone()));
        body.insert("mailingLists".to_string(), mailing_lists_value(&self.mailing_lists));
        for (key, value) in &self.properties {
            body.insert(key.clone(), value.clone());
        }
        Value::Object(body)
    }
}

/// An event sent by `events().send`.
///
/// At least one of `email` and `user_id` must be set. Whichever is unset is
/// left out of the body. `null` values in the property maps are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    pub event_name: String,
    pub email: Option<String>,
    pub user_id: Option<String>,
    pub event_properties: Map<String, Value>,
    pub mailing_lists: BTreeMap<String, bool>,
    pub contact_properties: Map<String, Value>,
}

impl Event {
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            ..Self::default()
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn event_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.event_properties.insert(key.into(), value.into());
        self
    }

    pub fn contact_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.contact_properties.insert(key.into(), value.into());
        self
    }

    pub fn mailing_list(mut self, list_id: impl Into<String>, subscribed: bool) -> Self {
        self.mailing_lists.insert(list_id.into(), subscribed);
        self
    }

    pub(crate) fn to_body(&self) -> Value {
        let mut body = Map::new();
        if let Some(email) = &self.email {
            body.insert("email".to_string(), Value::String(email.clone()));
        }
        if let Some(user_id) = &self.user_id {
            body.insert("userId".to_string(), Value::String(user_id.clone()));
        }
        body.insert("eventName".to_string(), Value::String(self.event_name.clone()));
        body.insert(
            "eventProperties".to_string(),
            Value::Object(compact(&self.event_properties)),
        );
        body.insert("mailingLists".to_string(), mailing_lists_value(&self.mailing_lists));
        body.extend(compact(&self.contact_properties));
        Value::Object(body)
    }
}

/// A transactional email sent by `transactional().send`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionalEmail {
    pub transactional_id: String,
    pub email: String,
    pub add_to_audience: bool,
    pub data_variables: Map<String, Value>,
    pub attachments: Vec<Attachment>,
}

impl TransactionalEmail {
    pub fn new(transactional_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            transactional_id: transactional_id.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn add_to_audience(mut self, add: bool) -> Self {
        self.add_to_audience = add;
        self
    }

    pub fn data_variable(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data_variables.insert(key.into(), value.into());
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// A file attached to a transactional email.
///
/// Accepts `content_type` or `contentType` when deserialized and always
/// sends `contentType`. Fields left unset are not sent; unknown fields are
/// kept in `extra` and sent as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(
        rename = "contentType",
        alias = "content_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<String>,
    /// Base64-encoded file content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attachment {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            filename: Some(filename.into()),
            content_type: Some(content_type.into()),
            data: Some(data.into()),
            extra: Map::new(),
        }
    }

    /// Add a field sent alongside the known ones.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Value type of a contact property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
    Date,
}

/// Which contact properties `contact_properties().list` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PropertyListFilter {
    #[default]
    All,
    Custom,
}

impl PropertyListFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyListFilter::All => "all",
            PropertyListFilter::Custom => "custom",
        }
    }
}

impl FromStr for PropertyListFilter {
    type Err = LoopsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(PropertyListFilter::All),
            "custom" => Ok(PropertyListFilter::Custom),
            _ => Err(LoopsError::invalid_argument(
                "List value must be None, 'custom' or 'all'.",
            )),
        }
    }
}

fn mailing_lists_value(lists: &BTreeMap<String, bool>) -> Value {
    Value::Object(
        lists
            .iter()
            .map(|(id, subscribed)| (id.clone(), Value::Bool(*subscribed)))
            .collect(),
    )
}

fn compact(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn contact_body_merges_properties_at_top_level() {
        let contact = ContactData::new("a@b.com")
            .property("firstName", "Dan")
            .mailing_list("list_1", true);
        assert_eq!(
            contact.to_body(),
            json!({
                "email": "a@b.com",
                "mailingLists": {"list_1": true},
                "firstName": "Dan"
            })
        );
    }

    #[test]
    fn contact_property_wins_over_named_field() {
        let contact = ContactData::new("a@b.com").property("email", "override@b.com");
        assert_eq!(contact.to_body()["email"], "override@b.com");
    }

    #[test]
    fn event_body_omits_missing_identifier_and_nulls() {
        let event = Event::new("signup")
            .email("a@b.com")
            .event_property("plan", "pro")
            .event_property("coupon", Value::Null)
            .contact_property("firstName", "Dan")
            .contact_property("lastName", Value::Null);
        assert_eq!(
            event.to_body(),
            json!({
                "email": "a@b.com",
                "eventName": "signup",
                "eventProperties": {"plan": "pro"},
                "mailingLists": {},
                "firstName": "Dan"
            })
        );
    }

    #[test]
    fn transactional_minimal_body() {
        let body = serde_json::to_value(TransactionalEmail::new("tid_123", "a@b.com")).unwrap();
        assert_eq!(
            body,
            json!({
                "transactionalId": "tid_123",
                "email": "a@b.com",
                "addToAudience": false,
                "dataVariables": {},
                "attachments": []
            })
        );
    }

    #[test]
    fn attachment_sends_content_type_in_camel_case() {
        let body =
            serde_json::to_value(Attachment::new("file.txt", "text/plain", "YWJj")).unwrap();
        assert_eq!(
            body,
            json!({"filename": "file.txt", "contentType": "text/plain", "data": "YWJj"})
        );
        assert!(body.get("content_type").is_none());
    }

    #[test]
    fn attachment_accepts_snake_case_input_and_keeps_other_fields() {
        let attachment: Attachment = serde_json::from_value(json!({
            "filename": "file.txt",
            "content_type": "text/plain",
            "data": "YWJj",
            "disposition": "inline"
        }))
        .unwrap();
        assert_eq!(attachment.content_type.as_deref(), Some("text/plain"));

        let body = serde_json::to_value(&attachment).unwrap();
        assert_eq!(
            body,
            json!({
                "filename": "file.txt",
                "contentType": "text/plain",
                "data": "YWJj",
                "disposition": "inline"
            })
        );
    }

    #[test]
    fn attachment_without_data_passes_through_unchanged() {
        let attachment: Attachment = serde_json::from_value(json!({
            "filename": "file.txt",
            "content": "abc",
            "content_type": "text/plain"
        }))
        .unwrap();
        assert!(attachment.data.is_none());

        let body = serde_json::to_value(&attachment).unwrap();
        assert_eq!(
            body,
            json!({"filename": "file.txt", "content": "abc", "contentType": "text/plain"})
        );
    }

    #[test]
    fn attachment_field_adds_without_inventing_others() {
        let attachment = Attachment::default().field("content", "abc");
        assert_eq!(serde_json::to_value(&attachment).unwrap(), json!({"content": "abc"}));
    }

    #[test]
    fn property_type_serializes_lowercase() {
        assert_eq!(serde_json::to_value(PropertyType::Boolean).unwrap(), json!("boolean"));
    }

    #[test]
    fn property_list_filter_parses_known_values() {
        assert_eq!("all".parse::<PropertyListFilter>().unwrap(), PropertyListFilter::All);
        assert_eq!(
            "custom".parse::<PropertyListFilter>().unwrap(),
            PropertyListFilter::Custom
        );
        assert!(matches!(
            "ALL".parse::<PropertyListFilter>(),
            Err(LoopsError::InvalidArgument(_))
        ));
    }
}
