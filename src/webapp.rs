//! Telegram Web App init data.
//!
//! See <https://core.telegram.org/bots/webapps#validating-data-received-via-the-mini-app>

use log::trace;
use serde::{Deserialize, Serialize};

use crate::payload::{self, AuthPayload};
use crate::signature;

/// User or chat partner described in init data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAppUser {
    pub id: i64,
    #[serde(default)]
    pub is_bot: Option<bool>,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub is_premium: Option<bool>,
    #[serde(default)]
    pub allows_write_to_pm: Option<bool>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Init data Telegram passes to a Web App
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitData {
    /// Identifier of the Web App session, used with `answerWebAppQuery`
    #[serde(default)]
    pub query_id: String,

    /// The user who opened the Web App
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<WebAppUser>,

    /// Chat partner in a private chat, for apps opened from the attachment menu
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<WebAppUser>,

    /// "sender", "private", "group", "supergroup" or "channel"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chat_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chat_instance: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub start_param: String,

    /// Seconds after which a message can be sent via `answerWebAppQuery`
    #[serde(default)]
    pub can_send_after: i64,

    /// Unix time when the form was opened
    pub auth_date: i64,

    pub hash: String,
}

impl InitData {
    /// Build init data from decoded form fields.
    ///
    /// Numbers that do not parse become 0 and unparsable user objects are
    /// left out; the signature check is what decides trust, not this.
    pub fn from_payload(payload: &AuthPayload) -> Self {
        let text = |key: &str| payload.get(key).cloned().unwrap_or_default();
        let number = |key: &str| {
            payload
                .get(key)
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or_default()
        };
        let user = |key: &str| {
            payload
                .get(key)
                .and_then(|v| serde_json::from_str::<WebAppUser>(v).ok())
        };

        InitData {
            query_id: text("query_id"),
            user: user("user"),
            receiver: user("receiver"),
            chat_type: text("chat_type"),
            chat_instance: text("chat_instance"),
            start_param: text("start_param"),
            can_send_after: number("can_send_after"),
            auth_date: number("auth_date"),
            hash: text(payload::HASH_FIELD),
        }
    }
}

/// Expected `hash` for a Web App payload
pub fn web_app_hash(payload: &AuthPayload, bot_token: &str) -> String {
    let check_string = payload::sorted_check_string(payload);
    let secret_key = signature::web_app_secret_key(bot_token);
    signature::hmac_sha256_hex(&secret_key, check_string.as_bytes())
}

/// Verify decoded Web App init data against the bot token.
///
/// A missing `hash` fails the same way a wrong one does.
pub fn verify_web_app_init_data(payload: &AuthPayload, bot_token: &str) -> bool {
    let Some(provided) = payload::hash(payload) else {
        trace!("init data has no hash");
        return false;
    };
    signature::hashes_match(&web_app_hash(payload, bot_token), provided)
}

/// Decode a raw init data query string and verify it.
pub fn verify_web_app_query(init_data: &str, bot_token: &str) -> bool {
    verify_web_app_init_data(&payload::parse_query(init_data), bot_token)
}
