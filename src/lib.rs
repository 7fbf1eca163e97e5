/*!
 * Tgsign-rs - Verification of data signed by Telegram for a bot
 *
 * Checks the HMAC-SHA256 signatures Telegram attaches to Login widget
 * callbacks and to Web App init data, so a server can trust the user
 * identity they carry.
 *
 * ```
 * use tgsign_rs::{payload, webapp};
 *
 * let mut values = payload::parse_query("auth_date=1700000000&query_id=AAA");
 * let hash = webapp::web_app_hash(&values, "123:ABC");
 * values.insert("hash".to_string(), hash);
 *
 * assert!(webapp::verify_web_app_init_data(&values, "123:ABC"));
 * assert!(!webapp::verify_web_app_init_data(&values, "123:XYZ"));
 * ```
 */

pub mod authenticator;
pub mod configuration;
pub mod error;
pub mod login;
pub mod payload;
pub mod signature;
pub mod webapp;

// Re-export main components for easy access
pub use authenticator::{AuthRequest, WebAppAuthenticator};
pub use configuration::{Configuration, TokenSource};
pub use error::Error;
pub use login::{verify_login_widget, LoginUser};
pub use payload::AuthPayload;
pub use webapp::{verify_web_app_init_data, verify_web_app_query, InitData, WebAppUser};
