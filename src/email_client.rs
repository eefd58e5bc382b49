use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use secrecy::ExposeSecret;
use tracing::debug;

use crate::{config::EmailConfig, web::data::Signup};

const NOTIFICATION_SUBJECT: &str = "New pilot program registration";

/// Sends a plain-text notification to a fixed list of recipients whenever a
/// new signup lands. One SMTP round-trip per signup, nothing is queued.
#[derive(Debug)]
pub struct EmailClient {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipients: Vec<Mailbox>,
}

impl EmailClient {
    pub fn from_config(config: &EmailConfig) -> Result<Self> {
        let sender: Mailbox = config.sender_addr.parse()?;
        let recipients = config
            .recipients
            .iter()
            .map(|recipient| recipient.parse::<Mailbox>())
            .collect::<core::result::Result<Vec<_>, _>>()?;

        let credentials = Credentials::new(
            config.sender_addr.clone(),
            config.password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .timeout(Some(config.timeout()))
            .build();

        Ok(EmailClient {
            mailer,
            sender,
            recipients,
        })
    }

    /// Attempts a single send; the caller decides what a failure means.
    pub async fn send_signup_notification(&self, signup: &Signup) -> Result<()> {
        if self.recipients.is_empty() {
            debug!("{:<20} - No notification recipients configured", "notify");
            return Ok(());
        }

        let message = self.build_notification(signup)?;
        self.mailer.send(message).await?;

        Ok(())
    }

    fn build_notification(&self, signup: &Signup) -> Result<Message> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .subject(NOTIFICATION_SUBJECT)
            .header(ContentType::TEXT_PLAIN);
        for recipient in &self.recipients {
            builder = builder.to(recipient.clone());
        }

        let body = format!(
            "A new user has registered on the landing page.\n\n\
             Name: {}\n\
             Email: {}\n",
            signup.name, signup.email
        );

        Ok(builder.body(body)?)
    }
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build email message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}
