use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::models::{
    default_properties, Contact, ContactProperty, FindParams, NewProperty, PageParams,
    PropertyListParams, PROPERTY_TYPES,
};
use crate::AppState;

const MIN_PER_PAGE: usize = 10;
const MAX_PER_PAGE: usize = 50;

/// An error answered as `{"success": false, "message": ...}`.
pub struct Failure {
    status: StatusCode,
    message: String,
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({"success": false, "message": self.message})),
        )
            .into_response()
    }
}

fn fail(status: StatusCode, message: impl Into<String>) -> Failure {
    Failure {
        status,
        message: message.into(),
    }
}

type Reply = Result<Json<Value>, Failure>;

fn object(body: Value) -> Result<Map<String, Value>, Failure> {
    match body {
        Value::Object(fields) => Ok(fields),
        _ => Err(fail(StatusCode::BAD_REQUEST, "Request body must be a JSON object.")),
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub async fn test_api_key(State(state): State<AppState>) -> Json<Value> {
    Json(json!({"success": true, "teamName": state.config.team_name}))
}

pub async fn create_contact(State(state): State<AppState>, Json(body): Json<Value>) -> Reply {
    let fields = object(body)?;
    let email = string_field(&fields, "email")
        .ok_or_else(|| fail(StatusCode::BAD_REQUEST, "An email is required."))?;

    let mut db = state.db.write().await;
    if db.contacts.values().any(|contact| contact.email == email) {
        return Err(fail(StatusCode::CONFLICT, "Email already on list."));
    }
    let mut contact = Contact::new(Uuid::new_v4().to_string(), email);
    contact.apply(fields);
    let id = contact.id.clone();
    db.contacts.insert(id.clone(), contact);
    Ok(Json(json!({"success": true, "id": id})))
}

pub async fn update_contact(State(state): State<AppState>, Json(body): Json<Value>) -> Reply {
    let fields = object(body)?;
    let email = string_field(&fields, "email")
        .ok_or_else(|| fail(StatusCode::BAD_REQUEST, "An email is required."))?;

    let mut db = state.db.write().await;
    let existing = db
        .contacts
        .values()
        .find(|contact| contact.email == email)
        .map(|contact| contact.id.clone());
    let id = existing.unwrap_or_else(|| Uuid::new_v4().to_string());
    db.contacts
        .entry(id.clone())
        .or_insert_with(|| Contact::new(id.clone(), email))
        .apply(fields);
    Ok(Json(json!({"success": true, "id": id})))
}

pub async fn find_contact(
    State(state): State<AppState>,
    Query(params): Query<FindParams>,
) -> Reply {
    let db = state.db.read().await;
    let matches: Vec<&Contact> = match (params.email, params.user_id) {
        (Some(_), Some(_)) => {
            return Err(fail(StatusCode::BAD_REQUEST, "Only one parameter is permitted."))
        }
        (Some(email), None) => db.contacts.values().filter(|c| c.email == email).collect(),
        (None, Some(user_id)) => db
            .contacts
            .values()
            .filter(|c| c.user_id.as_deref() == Some(user_id.as_str()))
            .collect(),
        (None, None) => {
            return Err(fail(StatusCode::BAD_REQUEST, "Provide an email or userId."))
        }
    };
    Ok(Json(json!(matches)))
}

pub async fn delete_contact(State(state): State<AppState>, Json(body): Json<Value>) -> Reply {
    let fields = object(body)?;
    let email = string_field(&fields, "email");
    let user_id = string_field(&fields, "userId");

    let mut db = state.db.write().await;
    let id = match (email, user_id) {
        (Some(_), Some(_)) => {
            return Err(fail(StatusCode::BAD_REQUEST, "Only one parameter is permitted."))
        }
        (None, None) => return Err(fail(StatusCode::BAD_REQUEST, "Provide an email or userId.")),
        (Some(email), None) => db
            .contacts
            .values()
            .find(|c| c.email == email)
            .map(|c| c.id.clone()),
        (None, Some(user_id)) => db
            .contacts
            .values()
            .find(|c| c.user_id.as_deref() == Some(user_id.as_str()))
            .map(|c| c.id.clone()),
    };
    let id = id.ok_or_else(|| fail(StatusCode::NOT_FOUND, "Contact not found."))?;
    db.contacts.remove(&id);
    Ok(Json(json!({"success": true, "message": "Contact deleted."})))
}

pub async fn list_properties(
    State(state): State<AppState>,
    Query(params): Query<PropertyListParams>,
) -> Reply {
    let db = state.db.read().await;
    let properties: Vec<ContactProperty> = match params.list.as_deref() {
        None | Some("all") => default_properties()
            .into_iter()
            .chain(db.custom_properties.iter().cloned())
            .collect(),
        Some("custom") => db.custom_properties.clone(),
        Some(_) => return Err(fail(StatusCode::BAD_REQUEST, "Invalid list value.")),
    };
    Ok(Json(json!(properties)))
}

pub async fn create_property(
    State(state): State<AppState>,
    Json(property): Json<NewProperty>,
) -> Reply {
    if !PROPERTY_TYPES.contains(&property.kind.as_str()) {
        return Err(fail(StatusCode::BAD_REQUEST, "Invalid property type."));
    }
    let mut db = state.db.write().await;
    let taken = default_properties()
        .iter()
        .chain(db.custom_properties.iter())
        .any(|existing| existing.key == property.name);
    if taken {
        return Err(fail(StatusCode::CONFLICT, "Property already exists."));
    }
    db.custom_properties.push(ContactProperty {
        key: property.name.clone(),
        label: property.name,
        kind: property.kind,
    });
    Ok(Json(json!({"success": true})))
}

pub async fn list_custom_fields(State(state): State<AppState>) -> Json<Value> {
    let db = state.db.read().await;
    Json(json!(db.custom_properties))
}

pub async fn send_event(State(state): State<AppState>, Json(body): Json<Value>) -> Reply {
    let fields = object(body)?;
    if string_field(&fields, "eventName").is_none() {
        return Err(fail(StatusCode::BAD_REQUEST, "An eventName is required."));
    }
    if string_field(&fields, "email").is_none() && string_field(&fields, "userId").is_none() {
        return Err(fail(StatusCode::BAD_REQUEST, "Provide an email or userId."));
    }
    state.db.write().await.events.push(Value::Object(fields));
    Ok(Json(json!({"success": true})))
}

pub async fn list_mailing_lists(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.config.mailing_lists))
}

pub async fn list_transactional(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Reply {
    let per_page = match params.per_page.as_deref() {
        None | Some("") => 20,
        Some(raw) => raw
            .parse::<usize>()
            .ok()
            .filter(|n| (MIN_PER_PAGE..=MAX_PER_PAGE).contains(n))
            .ok_or_else(|| {
                fail(
                    StatusCode::BAD_REQUEST,
                    format!("perPage must be between {MIN_PER_PAGE} and {MAX_PER_PAGE}."),
                )
            })?,
    };
    let start = match params.cursor.as_deref() {
        None | Some("") => 0,
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| fail(StatusCode::BAD_REQUEST, "Invalid cursor."))?,
    };

    let templates = &state.config.templates;
    let page: Vec<_> = templates.iter().skip(start).take(per_page).collect();
    let end = start + page.len();
    let next_cursor = (end < templates.len()).then(|| end.to_string());

    Ok(Json(json!({
        "pagination": {
            "totalResults": templates.len(),
            "returnedResults": page.len(),
            "perPage": per_page,
            "totalPages": templates.len().div_ceil(per_page),
            "nextCursor": next_cursor,
        },
        "data": page,
    })))
}

pub async fn send_transactional(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let fields = object(body)?;
    let transactional_id = string_field(&fields, "transactionalId")
        .ok_or_else(|| fail(StatusCode::BAD_REQUEST, "A transactionalId is required."))?;
    if string_field(&fields, "email").is_none() {
        return Err(fail(StatusCode::BAD_REQUEST, "An email is required."));
    }
    if !state
        .config
        .templates
        .iter()
        .any(|template| template.id == transactional_id)
    {
        return Err(fail(StatusCode::NOT_FOUND, "Transactional email not found."));
    }

    let mut db = state.db.write().await;
    if let Some(key) = headers
        .get("idempotency-key")
        .and_then(|value| value.to_str().ok())
    {
        if !db.idempotency_keys.insert(key.to_string()) {
            return Err(fail(StatusCode::CONFLICT, "Idempotency key already used."));
        }
    }
    db.sent_emails.push(Value::Object(fields));
    Ok(Json(json!({"success": true})))
}
