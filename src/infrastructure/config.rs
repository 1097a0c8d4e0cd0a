//! Configuration infrastructure
//!
//! All settings are environment-sourced (with `.env` support) and collected
//! once at startup into an immutable [`AppConfig`] that is passed into the
//! components that need it. There is no global mutable configuration state.

use std::fmt;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Complete application configuration, validated at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listing page to watch.
    pub listing_url: String,

    /// Seconds between scheduled cycles.
    pub poll_interval_secs: u64,

    /// Per-request timeout for the listing fetch, in seconds.
    pub request_timeout_secs: u64,

    /// Address the trigger endpoint binds to.
    pub bind_addr: String,

    /// Snapshot of the ads seen as of the last successful cycle.
    pub previous_ads_file: PathBuf,

    /// Snapshot of the most recent extraction, written right after parsing.
    pub current_ads_file: PathBuf,

    /// SMTP relay settings for notification email.
    pub smtp: SmtpConfig,
}

/// SMTP relay settings. The password is redacted from `Debug` output so the
/// config can be logged safely.
#[derive(Clone)]
pub struct SmtpConfig {
    /// Relay hostname; STARTTLS on port 587.
    pub relay: String,
    pub auth_email: String,
    pub auth_password: String,
    pub sender: String,
    pub recipients: Vec<String>,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("relay", &self.relay)
            .field("auth_email", &self.auth_email)
            .field("auth_password", &"<redacted>")
            .field("sender", &self.sender)
            .field("recipients", &self.recipients)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the environment, reading `.env` first if one
    /// is present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let listing_url = required("NJUSKALO_URL")?;
        url::Url::parse(&listing_url)
            .with_context(|| format!("NJUSKALO_URL is not a valid URL: {listing_url}"))?;

        let recipients: Vec<String> = optional("RECEIVER_EMAILS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if recipients.is_empty() {
            bail!("RECEIVER_EMAILS must list at least one address");
        }

        Ok(Self {
            listing_url,
            poll_interval_secs: parsed("SLEEP_INTERVAL", 900)?,
            request_timeout_secs: parsed("REQUEST_TIMEOUT_SECS", 30)?,
            bind_addr: optional("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8686".to_string()),
            previous_ads_file: optional("PREVIOUS_ADS_FILE")
                .unwrap_or_else(|| "previous_ads.json".to_string())
                .into(),
            current_ads_file: optional("CURRENT_ADS_FILE")
                .unwrap_or_else(|| "current_ads.json".to_string())
                .into(),
            smtp: SmtpConfig {
                relay: optional("SMTP_RELAY")
                    .unwrap_or_else(|| "smtp-relay.brevo.com".to_string()),
                auth_email: required("SMTP_SERVER_AUTH_EMAIL")?,
                auth_password: required("SMTP_SERVER_AUTH_PASSWORD")?,
                sender: required("SENDER_EMAIL")?,
                recipients,
            },
        })
    }
}

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("missing required environment variable {key}"))
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parsed(key: &str, default: u64) -> Result<u64> {
    match optional(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{key} must be an integer, got {raw:?}")),
        None => Ok(default),
    }
}
