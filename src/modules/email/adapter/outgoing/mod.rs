pub mod disabled_sender;
pub mod smtp_sender;

pub use disabled_sender::DisabledEmailSender;
pub use smtp_sender::SmtpEmailSender;
