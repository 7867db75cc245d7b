//! Comment reports and the re-moderation feedback loop.

use chrono::Utc;
use sea_orm::{
    entity::*, query::*, ColumnTrait, DatabaseConnection, QueryFilter, TransactionTrait,
};

use super::{is_unique_violation, BlogError};
use crate::moderation::visibility;
use crate::notifications::types::Notification;
use crate::orm::{blog_posts, comment_reports, comments, ModerationStatus, ReportReason};
use crate::user::Profile;

/// Result of filing a report. A duplicate is an idempotent outcome, not an
/// error: nothing is written and nothing is notified.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Created(comment_reports::Model),
    AlreadyExists,
}

/// File a report against a comment.
///
/// Staff cannot report (they moderate directly), authors cannot report
/// themselves, and only approved comments are reportable. A new report
/// unconditionally sends the comment back to Pending, whatever its prior
/// status, inside the same transaction.
pub async fn file_report(
    db: &DatabaseConnection,
    comment_id: i32,
    reporter: &Profile,
    reason: ReportReason,
    notes: &str,
) -> Result<(ReportOutcome, Vec<Notification>), BlogError> {
    if reporter.is_elevated() {
        return Err(BlogError::Forbidden("Staff members cannot report comments"));
    }

    let comment = comments::Entity::find_by_id(comment_id)
        .one(db)
        .await?
        .ok_or(BlogError::NotFoundOrInvisible)?;

    if comment.author_id == reporter.id {
        return Err(BlogError::Forbidden("You cannot report your own comment"));
    }

    // Only approved comments can be reported. An unapproved comment reads
    // as absent so the response never confirms it exists.
    if !visibility::can_report_comment(&comment, reporter) {
        return Err(BlogError::NotFoundOrInvisible);
    }

    let post = blog_posts::Entity::find_by_id(comment.post_id)
        .one(db)
        .await?
        .ok_or(BlogError::NotFoundOrInvisible)?;

    let txn = db.begin().await?;

    let existing = comment_reports::Entity::find()
        .filter(comment_reports::Column::CommentId.eq(comment.id))
        .filter(comment_reports::Column::ReportedBy.eq(reporter.id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        txn.rollback().await?;
        return Ok((ReportOutcome::AlreadyExists, Vec::new()));
    }

    let now = Utc::now().naive_utc();
    let insert = comment_reports::ActiveModel {
        comment_id: Set(comment.id),
        reported_by: Set(reporter.id),
        reason: Set(reason),
        notes: Set(notes.trim().to_string()),
        resolved: Set(false),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await;

    let report = match insert {
        Ok(report) => report,
        // A concurrent request won the (comment, reporter) slot.
        Err(e) if is_unique_violation(&e) => {
            txn.rollback().await?;
            return Ok((ReportOutcome::AlreadyExists, Vec::new()));
        }
        Err(e) => {
            txn.rollback().await?;
            return Err(e.into());
        }
    };

    // Back into the moderation queue, whatever the prior status was.
    let mut active: comments::ActiveModel = comment.into();
    active.status = Set(ModerationStatus::Pending);
    active.updated_at = Set(now);
    active.update(&txn).await?;

    txn.commit().await?;

    let intents = vec![Notification::CommentReported {
        reporter_name: reporter.username.clone(),
        post_title: post.title,
        reason_label: reason.label().to_string(),
        comment_id,
    }];

    Ok((ReportOutcome::Created(report), intents))
}
