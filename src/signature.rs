//! HMAC-SHA256 primitives shared by the Login widget and Web App checks.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Key used to derive the Web App secret from the bot token
pub const WEB_APP_KEY: &[u8] = b"WebAppData";

/// Compute raw HMAC-SHA256 of `message` under `key`.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(message);
    mac.finalize().into_bytes().into()
}

/// Compute HMAC-SHA256 of `message` under `key`, rendered as lowercase hex.
pub fn hmac_sha256_hex(key: &[u8], message: &[u8]) -> String {
    hex::encode(hmac_sha256(key, message))
}

/// Secret key for the Login widget: `SHA256(token)`.
pub fn login_secret_key(bot_token: &str) -> [u8; 32] {
    Sha256::digest(bot_token.as_bytes()).into()
}

/// Secret key for Web App init data: `HMAC-SHA256(key = "WebAppData", message = token)`.
pub fn web_app_secret_key(bot_token: &str) -> [u8; 32] {
    hmac_sha256(WEB_APP_KEY, bot_token.as_bytes())
}

/// Compare a computed hex hash with the one supplied by the client.
///
/// Runs in time independent of where the strings differ. Strings of
/// different length never match.
pub fn hashes_match(computed: &str, provided: &str) -> bool {
    computed.as_bytes().ct_eq(provided.as_bytes()).into()
}
