//! Signed key/value payloads and their data-check strings.

use std::collections::BTreeMap;

/// Name of the field carrying the signature
pub const HASH_FIELD: &str = "hash";

/// Fields always present in a Login widget callback, in check-string order
const LOGIN_REQUIRED_FIELDS: &[&str] = &["auth_date", "first_name", "id"];

/// Fields included in the Login widget check string only when non-empty
const LOGIN_OPTIONAL_FIELDS: &[&str] = &["last_name", "photo_url", "username"];

/// Field name to value mapping, iterated in ascending byte order of keys
pub type AuthPayload = BTreeMap<String, String>;

/// Decode an `application/x-www-form-urlencoded` string into a payload.
///
/// When a key repeats, the first value is kept.
pub fn parse_query(query: &str) -> AuthPayload {
    let mut payload = AuthPayload::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        payload
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    payload
}

/// The `hash` field of the payload, if any
pub fn hash(payload: &AuthPayload) -> Option<&str> {
    payload.get(HASH_FIELD).map(String::as_str)
}

/// Data-check string used by Web Apps: all fields but `hash`, sorted by key.
pub fn sorted_check_string(payload: &AuthPayload) -> String {
    payload
        .iter()
        .filter(|(key, _)| key.as_str() != HASH_FIELD)
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Data-check string used by the Login widget.
///
/// Uses the fixed field order of the widget rather than sorting arbitrary
/// keys; unknown fields are ignored and empty optional fields are dropped.
/// Returns `None` when a required field is missing.
pub fn login_check_string(payload: &AuthPayload) -> Option<String> {
    let mut lines =
        Vec::with_capacity(LOGIN_REQUIRED_FIELDS.len() + LOGIN_OPTIONAL_FIELDS.len());

    for field in LOGIN_REQUIRED_FIELDS {
        let value = payload.get(*field)?;
        lines.push(format!("{}={}", field, value));
    }

    for field in LOGIN_OPTIONAL_FIELDS {
        if let Some(value) = payload.get(*field).filter(|v| !v.is_empty()) {
            lines.push(format!("{}={}", field, value));
        }
    }

    Some(lines.join("\n"))
}
