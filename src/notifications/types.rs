//! Notification intent definitions.
//!
//! Database operations return these instead of sending mail themselves, so
//! nothing leaves the process until the surrounding transaction has
//! committed. The dispatcher resolves recipients and renders each intent
//! into an email.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// A post was submitted, in whatever status it landed in.
    PostSubmitted {
        author_id: i32,
        author_name: String,
        title: String,
        status_label: String,
        url: String,
    },
    /// A post crossed into Approved.
    PostApproved {
        author_id: i32,
        title: String,
        url: String,
    },
    /// A post crossed into Rejected.
    PostRejected { author_id: i32, title: String },
    /// A post was newly marked as featured.
    PostFeatured {
        author_id: i32,
        title: String,
        url: String,
    },
    /// A comment was submitted and is awaiting moderation.
    CommentSubmitted {
        author_id: i32,
        author_name: String,
        post_title: String,
        excerpt: String,
        url: String,
    },
    /// A reader reported a comment.
    CommentReported {
        reporter_name: String,
        post_title: String,
        reason_label: String,
        comment_id: i32,
    },
    /// A new account was registered.
    AccountCreated {
        user_id: i32,
        username: String,
        email: Option<String>,
    },
    /// An account was deleted.
    AccountDeleted {
        username: String,
        email: Option<String>,
    },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PostSubmitted { .. } => "post_submitted",
            Self::PostApproved { .. } => "post_approved",
            Self::PostRejected { .. } => "post_rejected",
            Self::PostFeatured { .. } => "post_featured",
            Self::CommentSubmitted { .. } => "comment_submitted",
            Self::CommentReported { .. } => "comment_reported",
            Self::AccountCreated { .. } => "account_created",
            Self::AccountDeleted { .. } => "account_deleted",
        }
    }
}
