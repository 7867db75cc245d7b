//! Reaction ledger: one reaction slot per (target, user) with toggle
//! semantics.
//!
//! Submitting a kind where none exists records it; submitting the same kind
//! again removes it; submitting a different kind replaces it in place. No
//! history is kept. The (target, user) unique constraint is the source of
//! truth under concurrency: a losing duplicate insert is absorbed as the
//! existing-row path.

use chrono::Utc;
use sea_orm::{entity::*, query::*, ColumnTrait, DatabaseConnection, DbErr, QueryFilter};
use std::collections::HashMap;

use super::{is_unique_violation, BlogError};
use crate::moderation::visibility;
use crate::orm::{blog_posts, comment_reactions, comments, post_reactions, ReactionKind};
use crate::user::Profile;

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// The reaction now stands (created or replaced).
    Applied(ReactionKind),
    /// The same kind was submitted again and the row was removed.
    Removed,
}

/// Per-kind aggregate for one target, with the viewer's active kind marked.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReactionCount {
    pub kind: &'static str,
    pub label: &'static str,
    pub count: i64,
    pub active: bool,
}

/// Toggle the actor's reaction on a post.
pub async fn toggle_post_reaction(
    db: &DatabaseConnection,
    post_id: i32,
    actor: &Profile,
    kind: ReactionKind,
) -> Result<ReactionOutcome, BlogError> {
    let post = blog_posts::Entity::find_by_id(post_id)
        .one(db)
        .await?
        .ok_or(BlogError::NotFoundOrInvisible)?;
    if !visibility::post_is_visible(&post, Some(actor)) {
        return Err(BlogError::NotFoundOrInvisible);
    }

    let existing = post_reactions::Entity::find()
        .filter(post_reactions::Column::PostId.eq(post.id))
        .filter(post_reactions::Column::UserId.eq(actor.id))
        .one(db)
        .await?;

    match existing {
        None => {
            let now = Utc::now().naive_utc();
            let insert = post_reactions::ActiveModel {
                post_id: Set(post.id),
                user_id: Set(actor.id),
                reaction: Set(kind),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await;
            match insert {
                Ok(_) => Ok(ReactionOutcome::Applied(kind)),
                // Lost a race against our own duplicate request; the row
                // exists now, reconcile against it.
                Err(e) if is_unique_violation(&e) => {
                    let row = post_reactions::Entity::find()
                        .filter(post_reactions::Column::PostId.eq(post.id))
                        .filter(post_reactions::Column::UserId.eq(actor.id))
                        .one(db)
                        .await?
                        .ok_or(BlogError::Database(e))?;
                    reconcile_post_row(db, row, kind).await
                }
                Err(e) => Err(e.into()),
            }
        }
        Some(row) => reconcile_post_row(db, row, kind).await,
    }
}

async fn reconcile_post_row(
    db: &DatabaseConnection,
    row: post_reactions::Model,
    kind: ReactionKind,
) -> Result<ReactionOutcome, BlogError> {
    if row.reaction == kind {
        post_reactions::Entity::delete_by_id(row.id).exec(db).await?;
        Ok(ReactionOutcome::Removed)
    } else {
        let mut active: post_reactions::ActiveModel = row.into();
        active.reaction = Set(kind);
        active.updated_at = Set(Utc::now().naive_utc());
        active.update(db).await?;
        Ok(ReactionOutcome::Applied(kind))
    }
}

/// Toggle the actor's reaction on a comment. Only staff may react to
/// comments that are not approved.
pub async fn toggle_comment_reaction(
    db: &DatabaseConnection,
    comment_id: i32,
    actor: &Profile,
    kind: ReactionKind,
) -> Result<ReactionOutcome, BlogError> {
    let comment = comments::Entity::find_by_id(comment_id)
        .one(db)
        .await?
        .ok_or(BlogError::NotFoundOrInvisible)?;
    if !visibility::can_react_to_comment(&comment, actor) {
        return Err(BlogError::Forbidden(
            "You cannot react to a non-approved comment",
        ));
    }

    let existing = comment_reactions::Entity::find()
        .filter(comment_reactions::Column::CommentId.eq(comment.id))
        .filter(comment_reactions::Column::UserId.eq(actor.id))
        .one(db)
        .await?;

    match existing {
        None => {
            let now = Utc::now().naive_utc();
            let insert = comment_reactions::ActiveModel {
                comment_id: Set(comment.id),
                user_id: Set(actor.id),
                reaction: Set(kind),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await;
            match insert {
                Ok(_) => Ok(ReactionOutcome::Applied(kind)),
                Err(e) if is_unique_violation(&e) => {
                    let row = comment_reactions::Entity::find()
                        .filter(comment_reactions::Column::CommentId.eq(comment.id))
                        .filter(comment_reactions::Column::UserId.eq(actor.id))
                        .one(db)
                        .await?
                        .ok_or(BlogError::Database(e))?;
                    reconcile_comment_row(db, row, kind).await
                }
                Err(e) => Err(e.into()),
            }
        }
        Some(row) => reconcile_comment_row(db, row, kind).await,
    }
}

async fn reconcile_comment_row(
    db: &DatabaseConnection,
    row: comment_reactions::Model,
    kind: ReactionKind,
) -> Result<ReactionOutcome, BlogError> {
    if row.reaction == kind {
        comment_reactions::Entity::delete_by_id(row.id)
            .exec(db)
            .await?;
        Ok(ReactionOutcome::Removed)
    } else {
        let mut active: comment_reactions::ActiveModel = row.into();
        active.reaction = Set(kind);
        active.updated_at = Set(Utc::now().naive_utc());
        active.update(db).await?;
        Ok(ReactionOutcome::Applied(kind))
    }
}

/// Aggregate counts per kind for a post, read-side only.
pub async fn post_reaction_summary(
    db: &DatabaseConnection,
    post_id: i32,
    viewer_id: Option<i32>,
) -> Result<Vec<ReactionCount>, DbErr> {
    let rows = post_reactions::Entity::find()
        .filter(post_reactions::Column::PostId.eq(post_id))
        .all(db)
        .await?;
    Ok(summarize(
        rows.iter().map(|r| (r.user_id, r.reaction)),
        viewer_id,
    ))
}

/// Aggregate counts per kind for a comment, read-side only.
pub async fn comment_reaction_summary(
    db: &DatabaseConnection,
    comment_id: i32,
    viewer_id: Option<i32>,
) -> Result<Vec<ReactionCount>, DbErr> {
    let rows = comment_reactions::Entity::find()
        .filter(comment_reactions::Column::CommentId.eq(comment_id))
        .all(db)
        .await?;
    Ok(summarize(
        rows.iter().map(|r| (r.user_id, r.reaction)),
        viewer_id,
    ))
}

fn summarize(
    rows: impl Iterator<Item = (i32, ReactionKind)>,
    viewer_id: Option<i32>,
) -> Vec<ReactionCount> {
    let mut totals: HashMap<ReactionKind, i64> = HashMap::new();
    let mut viewer_kind = None;
    for (user_id, kind) in rows {
        *totals.entry(kind).or_insert(0) += 1;
        if Some(user_id) == viewer_id {
            viewer_kind = Some(kind);
        }
    }

    ReactionKind::all()
        .iter()
        .map(|kind| ReactionCount {
            kind: kind.as_str(),
            label: kind.label(),
            count: totals.get(kind).copied().unwrap_or(0),
            active: viewer_kind == Some(*kind),
        })
        .collect()
}
