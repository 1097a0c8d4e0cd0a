//! Infrastructure layer
//!
//! Everything that touches the outside world: configuration, logging, the
//! HTTP fetcher, HTML parsing, snapshot storage and email delivery.

pub mod config;
pub mod http_client;
pub mod logging;
pub mod notifier;
pub mod parsing;
pub mod storage;

pub use config::{AppConfig, SmtpConfig};
pub use http_client::{FetchError, HttpClient};
pub use notifier::{NotifyError, Notifier};
pub use parsing::{AdListParser, ParseError};
pub use storage::StoreError;
