//! Delivery of password reset tokens

mod logging_reset_sender;

pub use logging_reset_sender::LoggingResetLinkSender;
