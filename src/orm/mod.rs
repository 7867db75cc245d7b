//! SeaORM entities for the blog schema.

pub mod blog_posts;
pub mod comment_reactions;
pub mod comment_reports;
pub mod comments;
pub mod post_reactions;
pub mod users;

use sea_orm::entity::prelude::*;

/// Workflow status shared by posts and comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[derive(Default)]
pub enum ModerationStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl ModerationStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ModerationStatus::Pending),
            "approved" => Some(ModerationStatus::Approved),
            "rejected" => Some(ModerationStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "Pending",
            ModerationStatus::Approved => "Approved",
            ModerationStatus::Rejected => "Rejected",
        }
    }
}

/// Reaction kinds available on posts and comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
pub enum ReactionKind {
    #[sea_orm(string_value = "like")]
    Like,
    #[sea_orm(string_value = "love")]
    Love,
    #[sea_orm(string_value = "dislike")]
    Dislike,
}

impl ReactionKind {
    /// All kinds, in display order.
    pub fn all() -> [ReactionKind; 3] {
        [ReactionKind::Like, ReactionKind::Love, ReactionKind::Dislike]
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "like" => Some(ReactionKind::Like),
            "love" => Some(ReactionKind::Love),
            "dislike" => Some(ReactionKind::Dislike),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Love => "love",
            ReactionKind::Dislike => "dislike",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReactionKind::Like => "Like",
            ReactionKind::Love => "Love",
            ReactionKind::Dislike => "Dislike",
        }
    }
}

/// Why a comment was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
pub enum ReportReason {
    #[sea_orm(string_value = "inappropriate")]
    Inappropriate,
    #[sea_orm(string_value = "spam")]
    Spam,
}

impl ReportReason {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "inappropriate" => Some(ReportReason::Inappropriate),
            "spam" => Some(ReportReason::Spam),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportReason::Inappropriate => "Inappropriate content",
            ReportReason::Spam => "Spam",
        }
    }
}
