pub mod mailer;

pub use mailer::MailApiNotifier;
