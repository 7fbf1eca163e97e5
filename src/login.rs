//! Telegram Login widget verification.
//!
//! See <https://core.telegram.org/widgets/login#checking-authorization>

use log::trace;
use serde::{Deserialize, Serialize};

use crate::payload::{self, AuthPayload};
use crate::signature;

/// User data received from the Telegram Login widget callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: i64,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub auth_date: i64,
    pub hash: String,
}

impl LoginUser {
    /// Render the user as the string payload the widget signs
    pub fn to_payload(&self) -> AuthPayload {
        let mut payload = AuthPayload::new();
        payload.insert("id".to_string(), self.id.to_string());
        payload.insert("first_name".to_string(), self.first_name.clone());
        payload.insert("auth_date".to_string(), self.auth_date.to_string());
        payload.insert(payload::HASH_FIELD.to_string(), self.hash.clone());

        let optional = [
            ("last_name", &self.last_name),
            ("username", &self.username),
            ("photo_url", &self.photo_url),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                payload.insert(key.to_string(), value.clone());
            }
        }
        payload
    }

    /// Check that the user data are signed with the given bot token
    pub fn is_from_telegram(&self, bot_token: &str) -> bool {
        verify_login_widget(&self.to_payload(), bot_token)
    }
}

/// Expected `hash` for a Login widget payload, or `None` when a required
/// field is missing.
pub fn login_hash(payload: &AuthPayload, bot_token: &str) -> Option<String> {
    let check_string = payload::login_check_string(payload)?;
    let secret_key = signature::login_secret_key(bot_token);
    Some(signature::hmac_sha256_hex(&secret_key, check_string.as_bytes()))
}

/// Verify a Login widget payload against the bot token.
///
/// Returns `false` for a wrong signature, a missing `hash` and a missing
/// required field alike.
pub fn verify_login_widget(payload: &AuthPayload, bot_token: &str) -> bool {
    let Some(provided) = payload::hash(payload) else {
        trace!("login payload has no hash");
        return false;
    };
    let Some(expected) = login_hash(payload, bot_token) else {
        trace!("login payload is missing a required field");
        return false;
    };
    signature::hashes_match(&expected, provided)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11";

    fn signed_user() -> LoginUser {
        let mut user = LoginUser {
            id: 42,
            first_name: "Pavel".to_string(),
            last_name: None,
            username: Some("durov".to_string()),
            photo_url: None,
            auth_date: 1_700_000_000,
            hash: String::new(),
        };
        user.hash = login_hash(&user.to_payload(), TOKEN).unwrap();
        user
    }

    #[test]
    fn test_signed_user_verifies() {
        let user = signed_user();
        assert!(user.is_from_telegram(TOKEN));
        assert!(verify_login_widget(&user.to_payload(), TOKEN));
    }

    #[test]
    fn test_expected_hash_matches_manual_computation() {
        let user = signed_user();
        let secret = signature::login_secret_key(TOKEN);
        let expected = signature::hmac_sha256_hex(
            &secret,
            b"auth_date=1700000000\nfirst_name=Pavel\nid=42\nusername=durov",
        );
        assert_eq!(user.hash, expected);
    }

    #[test]
    fn test_known_answer() {
        let user = LoginUser {
            id: 42,
            first_name: "Pavel".to_string(),
            last_name: None,
            username: Some("durov".to_string()),
            photo_url: None,
            auth_date: 1_700_000_000,
            hash: "e5b01c5fe749adb9ae3976007048fd3f6e1685cf41b21e12a860a3a51a621169".to_string(),
        };
        assert_eq!(login_hash(&user.to_payload(), "123:ABC").unwrap(), user.hash);
        assert!(user.is_from_telegram("123:ABC"));
        assert!(!user.is_from_telegram(TOKEN));
    }

    #[test]
    fn test_wrong_token_fails() {
        assert!(!signed_user().is_from_telegram("123456:other"));
    }

    #[test]
    fn test_missing_hash_fails() {
        let mut payload = signed_user().to_payload();
        payload.remove("hash");
        assert!(!verify_login_widget(&payload, TOKEN));
    }

    #[test]
    fn test_empty_optional_field_is_omitted() {
        let mut user = signed_user();
        user.last_name = Some(String::new());
        assert!(user.is_from_telegram(TOKEN));
    }

    #[test]
    fn test_deserialize_from_callback_json() {
        let json = r#"{"id":42,"first_name":"Pavel","username":"durov","auth_date":1700000000,"hash":"abc"}"#;
        let user: LoginUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 42);
        assert_eq!(user.username.as_deref(), Some("durov"));
        assert!(user.last_name.is_none());
        assert!(!user.is_from_telegram(TOKEN));
    }
}
