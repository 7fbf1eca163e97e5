use log::{debug, warn};

use crate::configuration::TokenSource;
use crate::error::Error;
use crate::payload;
use crate::webapp::{self, InitData};

/// Query parameter naming the bot whose token signs the init data
pub const BOT_PARAM: &str = "bot";

/// The parts of an incoming HTTP request the authenticator looks at
#[derive(Debug, Clone, Copy)]
pub struct AuthRequest<'a> {
    /// HTTP method, e.g. "POST"
    pub method: &'a str,
    /// Raw URL query string, without the leading '?'
    pub query: &'a str,
    /// Raw request body: URL-encoded init data
    pub body: &'a str,
}

impl<'a> AuthRequest<'a> {
    /// Build a POST request with the given query string and body
    pub fn post(query: &'a str, body: &'a str) -> Self {
        AuthRequest {
            method: "POST",
            query,
            body,
        }
    }
}

/// Authenticates Web App init data posted by a Web App front end
///
/// Map the returned error to a response with [`Error::status_code`].
pub struct WebAppAuthenticator<S> {
    tokens: S,
}

impl<S: TokenSource> WebAppAuthenticator<S> {
    /// Create an authenticator looking bot tokens up in `tokens`
    pub fn new(tokens: S) -> Self {
        WebAppAuthenticator { tokens }
    }

    /// Access the token source
    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    /// Authenticate a request and return the verified init data
    pub fn authenticate(&self, request: &AuthRequest<'_>) -> Result<InitData, Error> {
        if !request.method.eq_ignore_ascii_case("POST") {
            debug!("Rejecting init data sent with method {}", request.method);
            return Err(Error::MethodNotAllowed(request.method.to_string()));
        }

        if request.body.trim().is_empty() {
            return Err(Error::bad_request("Empty init data"));
        }

        let values = payload::parse_query(request.body);
        let bot = payload::parse_query(request.query)
            .remove(BOT_PARAM)
            .unwrap_or_default();

        let token = self.tokens.bot_token(&bot).map_err(|e| {
            warn!("Cannot authenticate init data: {}", e);
            e
        })?;

        if !webapp::verify_web_app_init_data(&values, &token) {
            debug!("Init data for bot '{}' failed verification", bot);
            return Err(Error::Unauthorized);
        }

        debug!("Init data for bot '{}' verified", bot);
        Ok(InitData::from_payload(&values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Configuration;
    use crate::payload::AuthPayload;

    const TOKEN: &str = "123:ABC";

    fn signed_body(token: &str) -> String {
        let mut p = AuthPayload::new();
        p.insert("auth_date".into(), "1700000000".into());
        p.insert("query_id".into(), "AAA".into());
        let hash = webapp::web_app_hash(&p, token);
        format!("auth_date=1700000000&query_id=AAA&hash={}", hash)
    }

    fn authenticator() -> WebAppAuthenticator<Configuration> {
        let mut config = Configuration::new();
        config.set_bot_token("alpha_bot", TOKEN);
        WebAppAuthenticator::new(config)
    }

    #[test]
    fn test_accepts_signed_init_data() {
        let body = signed_body(TOKEN);
        let data = authenticator()
            .authenticate(&AuthRequest::post("bot=alpha_bot", &body))
            .unwrap();
        assert_eq!(data.query_id, "AAA");
        assert_eq!(data.auth_date, 1_700_000_000);
    }

    #[test]
    fn test_rejects_get() {
        let body = signed_body(TOKEN);
        let request = AuthRequest {
            method: "GET",
            query: "bot=alpha_bot",
            body: &body,
        };
        let err = authenticator().authenticate(&request).unwrap_err();
        assert_eq!(err.status_code(), 405);
    }

    #[test]
    fn test_unknown_bot_is_configuration_error() {
        let body = signed_body(TOKEN);
        let err = authenticator()
            .authenticate(&AuthRequest::post("bot=beta_bot", &body))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_wrong_signature_is_unauthorized() {
        let body = signed_body("999:XYZ");
        let err = authenticator()
            .authenticate(&AuthRequest::post("bot=alpha_bot", &body))
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized));
    }

    #[test]
    fn test_empty_body_is_bad_request() {
        let err = authenticator()
            .authenticate(&AuthRequest::post("bot=alpha_bot", ""))
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_closure_token_source() {
        let auth = WebAppAuthenticator::new(|bot: &str| {
            (bot.is_empty()).then(|| TOKEN.to_string())
        });
        let body = signed_body(TOKEN);
        assert!(auth.authenticate(&AuthRequest::post("", &body)).is_ok());
    }
}
