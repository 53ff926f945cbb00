//! Mail transports: SMTP relay, or the service log when SMTP is unconfigured.

use anyhow::Context as _;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use secrecy::ExposeSecret;

use crate::config::SmtpSettings;
use crate::domain::repository::Mailer;
use crate::domain::types::{Delivery, EmailMessage};
use crate::error::AuthServiceError;

/// Port that switches the relay from STARTTLS to implicit TLS.
const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings<'_>, from: &str) -> anyhow::Result<Self> {
        let credentials = Credentials::new(
            settings.user.to_owned(),
            settings.pass.expose_secret().to_owned(),
        );
        let builder = if settings.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(settings.host)
        }
        .with_context(|| format!("configure SMTP relay {}", settings.host))?;
        let transport = builder
            .port(settings.port)
            .credentials(credentials)
            .build();
        let from = from
            .parse()
            .with_context(|| format!("invalid SMTP_FROM address: {from}"))?;
        Ok(Self { transport, from })
    }
}

fn build_message(from: Mailbox, message: &EmailMessage) -> anyhow::Result<Message> {
    let to: Mailbox = message
        .to
        .as_str()
        .parse()
        .context("invalid recipient address")?;
    Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.clone())
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(message.text.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(message.html.clone()),
                ),
        )
        .context("build email message")
}

impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<Delivery, AuthServiceError> {
        let email = build_message(self.from.clone(), message)?;
        self.transport
            .send(email)
            .await
            .context("send email over SMTP")?;
        tracing::info!(subject = %message.subject, "email sent");
        Ok(Delivery::Sent)
    }
}

/// Development fallback: writes the whole message to the log.
#[derive(Clone)]
pub struct LogMailer {
    pub from: String,
}

impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<Delivery, AuthServiceError> {
        tracing::info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            text = %message.text,
            html = %message.html,
            "[DEV EMAIL]"
        );
        Ok(Delivery::Logged)
    }
}

/// The transport chosen at startup.
#[derive(Clone)]
pub enum MailTransport {
    Smtp(SmtpMailer),
    Log(LogMailer),
}

impl MailTransport {
    /// SMTP when fully configured, the log otherwise.
    pub fn from_settings(smtp: Option<SmtpSettings<'_>>, from: &str) -> anyhow::Result<Self> {
        match smtp {
            Some(settings) => Ok(Self::Smtp(SmtpMailer::new(&settings, from)?)),
            None => {
                tracing::warn!("SMTP not configured; emails will be written to the log");
                Ok(Self::Log(LogMailer {
                    from: from.to_owned(),
                }))
            }
        }
    }
}

impl Mailer for MailTransport {
    async fn send(&self, message: &EmailMessage) -> Result<Delivery, AuthServiceError> {
        match self {
            Self::Smtp(m) => m.send(message).await,
            Self::Log(m) => m.send(message).await,
        }
    }
}
