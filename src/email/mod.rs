//! Outbound email via lettre SMTP.
//!
//! All moderation and account mail is plain text. `SMTP_MOCK=true` keeps
//! messages in the log instead of handing them to a relay, which is what
//! development and the test suite run with.

pub mod smtp;
pub mod templates;

use std::env;

pub type EmailResult<T> = Result<T, EmailError>;

#[derive(Debug)]
pub enum EmailError {
    /// Bad address or SMTP settings.
    Config(String),
    /// lettre could not assemble the message.
    Build(lettre::error::Error),
    /// The relay refused or dropped the message.
    Send(lettre::transport::smtp::Error),
}

impl std::fmt::Display for EmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailError::Config(msg) => write!(f, "email config error: {}", msg),
            EmailError::Build(e) => write!(f, "email build error: {}", e),
            EmailError::Send(e) => write!(f, "email send error: {}", e),
        }
    }
}

impl std::error::Error for EmailError {}

impl From<lettre::error::Error> for EmailError {
    fn from(e: lettre::error::Error) -> Self {
        EmailError::Build(e)
    }
}

impl From<lettre::transport::smtp::Error> for EmailError {
    fn from(e: lettre::transport::smtp::Error) -> Self {
        EmailError::Send(e)
    }
}

/// SMTP settings, read from the environment per send.
#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
    pub use_tls: bool,
    pub mock: bool,
}

impl EmailConfig {
    pub fn from_env() -> EmailResult<Self> {
        Ok(EmailConfig {
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .map_err(|_| EmailError::Config("invalid SMTP_PORT".to_string()))?,
            smtp_username: env::var("SMTP_USERNAME")
                .unwrap_or_else(|_| "noreply@localhost".to_string()),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_email: env::var("SMTP_FROM_EMAIL")
                .unwrap_or_else(|_| "noreply@localhost".to_string()),
            from_name: env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "Game Abyss".to_string()),
            use_tls: env::var("SMTP_USE_TLS")
                .map(|v| v.parse().unwrap_or(true))
                .unwrap_or(true),
            mock: env::var("SMTP_MOCK")
                .map(|v| v.parse().unwrap_or(false))
                .unwrap_or(false),
        })
    }
}

/// Send a plain-text email to a single recipient.
pub async fn send_email(to: &str, subject: &str, body: &str) -> EmailResult<()> {
    let config = EmailConfig::from_env()?;

    if config.mock {
        log::info!("MOCK EMAIL to={} subject={:?}", to, subject);
        log::debug!("MOCK EMAIL body:\n{}", body);
        return Ok(());
    }

    smtp::send_email(&config, to, subject, body).await
}
