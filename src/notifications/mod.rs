//! Post-commit notification pipeline.
//!
//! Blog and account operations return [`Notification`] intents rather than
//! sending email inline. Callers dispatch the batch only after the database
//! work has committed.

pub mod dispatcher;
pub mod types;

pub use dispatcher::dispatch;
pub use types::Notification;
