use crate::error::Error;
use std::collections::HashMap;

/// Lookup of a bot token by bot identifier
///
/// An empty identifier asks for the default bot.
pub trait TokenSource {
    fn bot_token(&self, bot: &str) -> Result<String, Error>;
}

impl<F> TokenSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn bot_token(&self, bot: &str) -> Result<String, Error> {
        self(bot).ok_or_else(|| {
            Error::configuration(format!("Bot token not configured for bot '{}'", bot))
        })
    }
}

/// Bot tokens known to the application
#[derive(Clone, Default)]
pub struct Configuration {
    /// Token used when the request names no bot
    default_bot_token: Option<String>,
    /// Tokens keyed by bot identifier
    bot_tokens: HashMap<String, String>,
}

impl std::fmt::Debug for Configuration {
    // Tokens are secrets; only the bot identifiers are shown
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut bots: Vec<&str> = self.bot_tokens.keys().map(String::as_str).collect();
        bots.sort_unstable();
        f.debug_struct("Configuration")
            .field("default_bot_token", &self.default_bot_token.is_some())
            .field("bots", &bots)
            .finish()
    }
}

impl Configuration {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token for a bot identifier
    pub fn set_bot_token<B: AsRef<str>, S: AsRef<str>>(&mut self, bot: B, token: S) {
        self.bot_tokens
            .insert(bot.as_ref().to_string(), token.as_ref().to_string());
    }

    /// Set the token used when no bot identifier is given
    pub fn set_default_bot_token<S: AsRef<str>>(&mut self, token: S) {
        let token = token.as_ref().to_string();
        self.default_bot_token = if token.is_empty() { None } else { Some(token) };
    }

    /// Get the default token
    pub fn default_bot_token(&self) -> Result<&str, Error> {
        self.default_bot_token
            .as_deref()
            .ok_or_else(|| Error::configuration("Default bot token not configured"))
    }

    /// Get the token for a bot identifier, falling back to the default
    /// token when the identifier is empty
    pub fn bot_token(&self, bot: &str) -> Result<&str, Error> {
        if bot.is_empty() {
            return self.default_bot_token();
        }
        self.bot_tokens
            .get(bot)
            .map(String::as_str)
            .ok_or_else(|| {
                Error::configuration(format!("Bot token not configured for bot '{}'", bot))
            })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Error> {
        if self.default_bot_token.is_none() && self.bot_tokens.is_empty() {
            return Err(Error::configuration("No bot tokens configured"));
        }

        if let Some((bot, _)) = self.bot_tokens.iter().find(|(_, token)| token.is_empty()) {
            return Err(Error::configuration(format!(
                "Empty bot token for bot '{}'",
                bot
            )));
        }

        Ok(())
    }
}

impl TokenSource for Configuration {
    fn bot_token(&self, bot: &str) -> Result<String, Error> {
        Configuration::bot_token(self, bot).map(str::to_string)
    }
}
