//! Email notifications
//!
//! Renders the new ads into one HTML document and sends it through the
//! configured SMTP relay (STARTTLS, port 587). An empty input is a no-op
//! apart from an informational log line. Delivery is best effort: the
//! caller treats a send failure as non-fatal for the cycle.

use std::fmt::Write as _;

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::info;

use crate::domain::ad::AdRecord;
use crate::infrastructure::config::SmtpConfig;

const SUBJECT: &str = "New Ads Found from Njuskalo";

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build email: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP send failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// SMTP notifier bound to one relay and recipient list.
pub struct Notifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    config: SmtpConfig,
}

impl Notifier {
    /// Build the transport; no connection is made until the first send.
    pub fn new(config: SmtpConfig) -> Result<Self, NotifyError> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.relay)?
            .credentials(Credentials::new(
                config.auth_email.clone(),
                config.auth_password.clone(),
            ))
            .build();

        Ok(Self { mailer, config })
    }

    /// Email the new ads, or log and return when there are none.
    pub async fn notify(&self, new_ads: &[AdRecord]) -> Result<(), NotifyError> {
        if new_ads.is_empty() {
            info!("no new ads at this time, will check again next cycle");
            return Ok(());
        }

        let mut builder = Message::builder()
            .from(self.config.sender.parse()?)
            .subject(SUBJECT);
        for recipient in &self.config.recipients {
            builder = builder.to(recipient.parse()?);
        }

        let message = builder
            .header(ContentType::TEXT_HTML)
            .body(render_email_body(new_ads))?;

        self.mailer.send(message).await?;
        info!(
            "📧 notification email sent to {} recipient(s)",
            self.config.recipients.len()
        );
        Ok(())
    }
}

/// One HTML document: per ad a heading (title or empty) followed by a
/// key/value table of the present fields in display order.
pub fn render_email_body(new_ads: &[AdRecord]) -> String {
    let mut body = String::from("<html><body><h2>New Ads Found:</h2>");
    for ad in new_ads {
        body.push_str(
            "<article style='margin-bottom: 20px; padding: 10px; border: 1px solid #ccc;'>",
        );
        let _ = write!(body, "<h3>{}</h3><table>", ad.title.as_deref().unwrap_or(""));
        for (label, value) in ad.fields() {
            let _ = write!(
                body,
                "<tr><td><strong>{label}</strong></td><td>{value}</td></tr>"
            );
        }
        body.push_str("</table></article>");
    }
    body.push_str("</body></html>");
    body
}
