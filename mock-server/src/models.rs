use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub email: String,
    pub user_id: Option<String>,
    pub subscribed: bool,
    pub source: String,
    pub mailing_lists: Map<String, Value>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Contact {
    pub fn new(id: String, email: String) -> Self {
        Self {
            id,
            email,
            user_id: None,
            subscribed: true,
            source: "API".to_string(),
            mailing_lists: Map::new(),
            properties: Map::new(),
        }
    }

    /// Apply a create/update body. `null` clears a custom property.
    pub fn apply(&mut self, fields: Map<String, Value>) {
        for (key, value) in fields {
            match key.as_str() {
                "id" | "source" => {}
                "email" => {
                    if let Value::String(email) = value {
                        self.email = email;
                    }
                }
                "userId" => self.user_id = value.as_str().map(str::to_string),
                "subscribed" => {
                    if let Value::Bool(subscribed) = value {
                        self.subscribed = subscribed;
                    }
                }
                "mailingLists" => {
                    if let Value::Object(lists) = value {
                        self.mailing_lists.extend(lists);
                    }
                }
                _ if value.is_null() => {
                    self.properties.remove(&key);
                }
                _ => {
                    self.properties.insert(key, value);
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactProperty {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ContactProperty {
    pub fn new(key: &str, label: &str, kind: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: kind.to_string(),
        }
    }
}

pub const PROPERTY_TYPES: [&str; 4] = ["string", "number", "boolean", "date"];

/// Properties every Loops account has.
pub fn default_properties() -> Vec<ContactProperty> {
    vec![
        ContactProperty::new("email", "Email", "string"),
        ContactProperty::new("firstName", "First Name", "string"),
        ContactProperty::new("lastName", "Last Name", "string"),
        ContactProperty::new("notes", "Notes", "string"),
        ContactProperty::new("source", "Source", "string"),
        ContactProperty::new("subscribed", "Subscribed", "boolean"),
        ContactProperty::new("userGroup", "User Group", "string"),
        ContactProperty::new("userId", "User Id", "string"),
    ]
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailingList {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionalTemplate {
    pub id: String,
    pub name: String,
    pub last_updated: String,
    pub data_variables: Vec<String>,
}

#[derive(Deserialize)]
pub struct NewProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindParams {
    pub email: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Deserialize)]
pub struct PropertyListParams {
    pub list: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub per_page: Option<String>,
    pub cursor: Option<String>,
}
