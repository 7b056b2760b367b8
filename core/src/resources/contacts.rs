//! Contact resource.

use serde_json::{json, Value};

use crate::client::LoopsClient;
use crate::error::{LoopsError, Result};
use crate::request::RequestSpec;
use crate::transport::Transport;
use crate::types::ContactData;

pub struct ContactsResource<'c, T: Transport> {
    client: &'c LoopsClient<T>,
}

impl<'c, T: Transport> ContactsResource<'c, T> {
    pub(crate) fn new(client: &'c LoopsClient<T>) -> Self {
        Self { client }
    }

    pub fn create(&self, contact: &ContactData) -> Result<Value> {
        self.client
            .request(RequestSpec::post("v1/contacts/create").json(contact.to_body()))
    }

    pub fn update(&self, contact: &ContactData) -> Result<Value> {
        self.client
            .request(RequestSpec::put("v1/contacts/update").json(contact.to_body()))
    }

    /// Look a contact up by exactly one of `email` or `user_id`.
    pub fn find(&self, email: Option<&str>, user_id: Option<&str>) -> Result<Value> {
        let (key, value) = identifier(email, user_id)?;
        self.client
            .request(RequestSpec::get("v1/contacts/find").query(key, Some(value)))
    }

    /// Delete a contact by exactly one of `email` or `user_id`.
    pub fn delete(&self, email: Option<&str>, user_id: Option<&str>) -> Result<Value> {
        let (key, value) = identifier(email, user_id)?;
        self.client
            .request(RequestSpec::post("v1/contacts/delete").json(json!({ key: value })))
    }
}

fn identifier<'a>(
    email: Option<&'a str>,
    user_id: Option<&'a str>,
) -> Result<(&'static str, &'a str)> {
    match (email, user_id) {
        (Some(_), Some(_)) => Err(LoopsError::invalid_argument(
            "Only one parameter is permitted.",
        )),
        (Some(email), None) => Ok(("email", email)),
        (None, Some(user_id)) => Ok(("userId", user_id)),
        (None, None) => Err(LoopsError::invalid_argument(
            "You must provide an email or user_id value.",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_prefers_the_one_given() {
        assert_eq!(identifier(Some("a@b.com"), None).unwrap(), ("email", "a@b.com"));
        assert_eq!(identifier(None, Some("u_1")).unwrap(), ("userId", "u_1"));
    }

    #[test]
    fn identifier_rejects_both_and_neither() {
        let both = identifier(Some("a@b.com"), Some("u_1")).unwrap_err();
        assert_eq!(both.to_string(), "Only one parameter is permitted.");
        let neither = identifier(None, None).unwrap_err();
        assert_eq!(neither.to_string(), "You must provide an email or user_id value.");
    }
}
