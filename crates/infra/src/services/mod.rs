pub mod mailer;
pub mod notifier;

pub use mailer::{DiscardingMailer, IMailer, InMemoryMailer, RecordedMail, SmtpMailer};
pub use notifier::Notifier;
