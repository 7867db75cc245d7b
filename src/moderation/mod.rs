//! Moderation core: the pure rules behind the publication workflow.
//!
//! These modules hold no database state. The repository layer in
//! [`crate::blog`] feeds them current row data and persists whatever they
//! decide.

pub mod publication;
pub mod reading_time;
pub mod slug;
pub mod visibility;
