//! SMS delivery through the Twilio Messages API (form POST over libcurl).

use std::time::Duration;

use super::{ConfigError, NotifyError, Notifier};

pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

const ENV_SID: &str = "TWILIO_SID";
const ENV_AUTH: &str = "TWILIO_AUTH";
const ENV_FROM: &str = "TWILIO_FROM";
const ENV_TO: &str = "TWILIO_TO";

/// Credentials and addresses for the SMS gateway.
#[derive(Clone, PartialEq, Eq)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender number (E.164).
    pub from: String,
    /// Recipient number (E.164).
    pub to: String,
    /// Scheme and host of the API; overridable for local testing.
    pub api_base: String,
}

impl std::fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("api_base", &self.api_base)
            .finish()
    }
}

fn is_placeholder(value: &str) -> bool {
    value.starts_with("your_") && value.ends_with("_here")
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))?;
    if is_placeholder(&value) {
        return Err(ConfigError::Placeholder(name));
    }
    Ok(value)
}

impl TwilioConfig {
    /// Read `TWILIO_SID`, `TWILIO_AUTH`, `TWILIO_FROM` and `TWILIO_TO`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; every field is validated here, not on first send.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            account_sid: required(&lookup, ENV_SID)?,
            auth_token: required(&lookup, ENV_AUTH)?,
            from: required(&lookup, ENV_FROM)?,
            to: required(&lookup, ENV_TO)?,
            api_base: TWILIO_API_BASE.to_string(),
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base.trim_end_matches('/'),
            self.account_sid
        )
    }
}

/// Sends each alert as one SMS.
#[derive(Debug, Clone)]
pub struct TwilioNotifier {
    config: TwilioConfig,
    timeout: Duration,
}

impl TwilioNotifier {
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            config,
            timeout: Duration::from_secs(30),
        }
    }

    fn form_body(&self, message: &str) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("Body", message)
            .append_pair("From", &self.config.from)
            .append_pair("To", &self.config.to)
            .finish()
    }
}

impl Notifier for TwilioNotifier {
    fn send(&self, message: &str) -> Result<(), NotifyError> {
        let mut response = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&self.config.messages_url())?;
        easy.username(&self.config.account_sid)?;
        easy.password(&self.config.auth_token)?;
        easy.post(true)?;
        easy.post_fields_copy(self.form_body(message).as_bytes())?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                response.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        let body = String::from_utf8_lossy(&response).into_owned();
        if !(200..300).contains(&status) {
            return Err(NotifyError::Rejected { status, body });
        }

        let sid = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("sid").and_then(|s| s.as_str()).map(str::to_string));
        tracing::info!(sid = sid.as_deref().unwrap_or("?"), "SMS sent");
        Ok(())
    }
}
