//! Comment operations and the moderation gate around them.

use chrono::Utc;
use sea_orm::{entity::*, query::*, ColumnTrait, DatabaseConnection, DbErr, QueryFilter};

use super::BlogError;
use crate::app_config;
use crate::moderation::visibility;
use crate::notifications::types::Notification;
use crate::orm::{blog_posts, comments, ModerationStatus};
use crate::user::Profile;

/// Create a comment on a post the actor can see. Elevated actors go live
/// immediately; everyone else lands in the moderation queue.
pub async fn create_comment(
    db: &DatabaseConnection,
    post_id: i32,
    actor: &Profile,
    body: &str,
) -> Result<(comments::Model, Vec<Notification>), BlogError> {
    let post = blog_posts::Entity::find_by_id(post_id)
        .one(db)
        .await?
        .ok_or(BlogError::NotFoundOrInvisible)?;

    if !visibility::post_is_visible(&post, Some(actor)) {
        return Err(BlogError::NotFoundOrInvisible);
    }

    let trimmed = body.trim();
    let min_length = app_config::moderation().comment_min_length;
    if trimmed.chars().count() < min_length {
        return Err(BlogError::ValidationFailed(format!(
            "Comments must be at least {} characters",
            min_length
        )));
    }

    let now = Utc::now().naive_utc();
    let comment = comments::ActiveModel {
        post_id: Set(post.id),
        author_id: Set(actor.id),
        body: Set(trimmed.to_string()),
        status: Set(visibility::default_status_for(actor)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let intents = vec![Notification::CommentSubmitted {
        author_id: actor.id,
        author_name: actor.username.clone(),
        post_title: post.title.clone(),
        excerpt: comment.body.chars().take(200).collect(),
        url: post.absolute_url(),
    }];

    Ok((comment, intents))
}

/// Delete a comment. Allowed for the comment's author and for staff.
pub async fn delete_comment(
    db: &DatabaseConnection,
    comment_id: i32,
    actor: &Profile,
) -> Result<(), BlogError> {
    let comment = comments::Entity::find_by_id(comment_id)
        .one(db)
        .await?
        .ok_or(BlogError::NotFoundOrInvisible)?;

    if comment.author_id != actor.id && !actor.is_staff {
        return Err(BlogError::Forbidden("You cannot delete this comment"));
    }

    comments::Entity::delete_by_id(comment.id).exec(db).await?;
    Ok(())
}

/// Approved comments on a post, oldest first, for the detail view.
pub async fn approved_comments(
    db: &DatabaseConnection,
    post_id: i32,
) -> Result<Vec<comments::Model>, DbErr> {
    comments::Entity::find()
        .filter(comments::Column::PostId.eq(post_id))
        .filter(comments::Column::Status.eq(ModerationStatus::Approved))
        .order_by_asc(comments::Column::CreatedAt)
        .all(db)
        .await
}
