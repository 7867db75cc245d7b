//! SMTP transport for outbound mail.

use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use super::{EmailConfig, EmailError, EmailResult};

pub async fn send_email(
    config: &EmailConfig,
    to: &str,
    subject: &str,
    body: &str,
) -> EmailResult<()> {
    let from: Mailbox = format!("{} <{}>", config.from_name, config.from_email)
        .parse()
        .map_err(|e| EmailError::Config(format!("invalid from address: {}", e)))?;
    let recipient: Mailbox = to
        .parse()
        .map_err(|e| EmailError::Config(format!("invalid to address: {}", e)))?;

    let email = Message::builder()
        .from(from)
        .to(recipient)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())?;

    let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
    let mailer = if config.use_tls {
        SmtpTransport::relay(&config.smtp_host)?
            .credentials(creds)
            .port(config.smtp_port)
            .build()
    } else {
        SmtpTransport::builder_dangerous(&config.smtp_host)
            .credentials(creds)
            .port(config.smtp_port)
            .build()
    };

    mailer.send(&email)?;
    log::info!("email sent to {}", to);
    Ok(())
}
