use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Mutex;
use tracing::warn;

/// Outbound email transport. Every call succeeds or fails on its own, the
/// caller decides whether a failure matters.
#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, text: &str, html: &str) -> anyhow::Result<()>;
}

/// Mailer backed by an async SMTP transport
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(smtp_uri: &str, from: &str) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(smtp_uri)?.build();
        let from = from.parse::<Mailbox>()?;
        Ok(Self { transport, from })
    }
}

#[async_trait::async_trait]
impl IMailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, text: &str, html: &str) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse::<Mailbox>()?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html.to_string()),
                    ),
            )?;
        self.transport.send(message).await?;
        Ok(())
    }
}

/// Mailer that silently drops all mail. Used when no SMTP uri is configured.
pub struct DiscardingMailer;

#[async_trait::async_trait]
impl IMailer for DiscardingMailer {
    async fn send(&self, to: &str, subject: &str, _text: &str, _html: &str) -> anyhow::Result<()> {
        warn!(
            "Outgoing email is disabled, dropping mail to: {} with subject: {}",
            to, subject
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Mailer that records every mail instead of sending it, for tests
pub struct InMemoryMailer {
    outbox: Mutex<Vec<RecordedMail>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self {
            outbox: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<RecordedMail> {
        self.outbox.lock().unwrap().clone()
    }
}

impl Default for InMemoryMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMailer for InMemoryMailer {
    async fn send(&self, to: &str, subject: &str, text: &str, html: &str) -> anyhow::Result<()> {
        let mut outbox = self.outbox.lock().unwrap();
        outbox.push(RecordedMail {
            to: to.to_string(),
            subject: subject.to_string(),
            text: text.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}
