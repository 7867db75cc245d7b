//! Blog post operations: creation, edits, status changes, deletion.

use chrono::{Duration, NaiveDateTime, NaiveTime, Utc};
use sea_orm::{entity::*, query::*, ColumnTrait, DatabaseConnection, DbErr, QueryFilter};
use std::collections::HashSet;

use super::BlogError;
use crate::app_config;
use crate::moderation::publication::{apply_status, Transition};
use crate::moderation::{reading_time, slug, visibility};
use crate::notifications::types::Notification;
use crate::orm::{blog_posts, ModerationStatus};
use crate::user::Profile;

/// Inbound fields for a new or edited post.
#[derive(Debug, Clone)]
pub struct PostContent {
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub tags: String,
}

impl PostContent {
    fn validate(&self) -> Result<(), BlogError> {
        let limits = app_config::moderation();
        if self.title.trim().is_empty() {
            return Err(BlogError::ValidationFailed("Title is required".to_string()));
        }
        if self.title.chars().count() > limits.title_max_length {
            return Err(BlogError::ValidationFailed(format!(
                "Title must be at most {} characters",
                limits.title_max_length
            )));
        }
        if self.body.trim().is_empty() {
            return Err(BlogError::ValidationFailed("Body is required".to_string()));
        }
        Ok(())
    }
}

/// Pick a slug for a post whose slug field is empty.
///
/// Uniqueness is checked against the post's date bucket: rows published on
/// the same calendar day, or rows with no published date when the post has
/// none. The post's own row is excluded on update paths.
async fn assign_slug(
    db: &DatabaseConnection,
    own_id: Option<i32>,
    title: &str,
    published_at: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> Result<String, DbErr> {
    let reference = published_at.unwrap_or(now);
    let date = reference.date();

    let mut query = blog_posts::Entity::find();
    if let Some(id) = own_id {
        query = query.filter(blog_posts::Column::Id.ne(id));
    }
    query = match published_at {
        Some(_) => {
            let day_start = date.and_time(NaiveTime::MIN);
            let day_end = (date + Duration::days(1)).and_time(NaiveTime::MIN);
            query
                .filter(blog_posts::Column::PublishedAt.gte(day_start))
                .filter(blog_posts::Column::PublishedAt.lt(day_end))
        }
        None => query.filter(blog_posts::Column::PublishedAt.is_null()),
    };

    let taken: HashSet<String> = query.all(db).await?.into_iter().map(|p| p.slug).collect();
    Ok(slug::unique_slug(title, date, |s| taken.contains(s)))
}

/// Create a post. The requested initial status comes from the caller
/// (normally `visibility::default_status_for`); this function enforces the
/// derived-field consequences.
pub async fn create_post(
    db: &DatabaseConnection,
    author: &Profile,
    content: PostContent,
    status: ModerationStatus,
) -> Result<(blog_posts::Model, Vec<Notification>), BlogError> {
    content.validate()?;

    let now = Utc::now().naive_utc();
    let change = apply_status(None, status, None, now);
    let slug = assign_slug(db, None, &content.title, change.published_at, now).await?;
    let minutes = reading_time::estimate_minutes(&content.body);

    let post = blog_posts::ActiveModel {
        title: Set(content.title),
        slug: Set(slug),
        author_id: Set(author.id),
        excerpt: Set(content.excerpt),
        body: Set(content.body),
        tags: Set(content.tags),
        status: Set(change.status),
        featured: Set(false),
        created_at: Set(now),
        published_at: Set(change.published_at),
        updated_at: Set(now),
        reading_time: Set(minutes),
        likes: Set(0),
        rating: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let mut intents = vec![Notification::PostSubmitted {
        author_id: author.id,
        author_name: author.username.clone(),
        title: post.title.clone(),
        status_label: post.status.label().to_string(),
        url: post.absolute_url(),
    }];
    if change.transition == Transition::Approved {
        intents.push(Notification::PostApproved {
            author_id: author.id,
            title: post.title.clone(),
            url: post.absolute_url(),
        });
    }

    Ok((post, intents))
}

/// Edit post content. Authors and staff only. The slug is never recomputed;
/// reading time always is.
pub async fn update_post(
    db: &DatabaseConnection,
    post_id: i32,
    actor: &Profile,
    content: PostContent,
) -> Result<blog_posts::Model, BlogError> {
    content.validate()?;

    let post = blog_posts::Entity::find_by_id(post_id)
        .one(db)
        .await?
        .ok_or(BlogError::NotFoundOrInvisible)?;

    if post.author_id != actor.id && !actor.is_elevated() {
        if !visibility::post_is_visible(&post, Some(actor)) {
            return Err(BlogError::NotFoundOrInvisible);
        }
        return Err(BlogError::Forbidden("You cannot edit this post"));
    }

    let minutes = reading_time::estimate_minutes(&content.body);
    let mut active: blog_posts::ActiveModel = post.into();
    active.title = Set(content.title);
    active.excerpt = Set(content.excerpt);
    active.body = Set(content.body);
    active.tags = Set(content.tags);
    active.reading_time = Set(minutes);
    active.updated_at = Set(Utc::now().naive_utc());

    Ok(active.update(db).await?)
}

/// Move a post through the editorial workflow. Staff only.
pub async fn set_post_status(
    db: &DatabaseConnection,
    post_id: i32,
    actor: &Profile,
    new_status: ModerationStatus,
) -> Result<(blog_posts::Model, Vec<Notification>), BlogError> {
    if !actor.is_elevated() {
        return Err(BlogError::Forbidden("Only staff can moderate posts"));
    }

    let post = blog_posts::Entity::find_by_id(post_id)
        .one(db)
        .await?
        .ok_or(BlogError::NotFoundOrInvisible)?;

    let now = Utc::now().naive_utc();
    let change = apply_status(Some(post.status), new_status, post.published_at, now);

    let author_id = post.author_id;
    let title = post.title.clone();
    let mut active: blog_posts::ActiveModel = post.into();
    active.status = Set(change.status);
    active.published_at = Set(change.published_at);
    active.updated_at = Set(now);
    let post = active.update(db).await?;

    let intents = match change.transition {
        Transition::Approved => vec![Notification::PostApproved {
            author_id,
            title,
            url: post.absolute_url(),
        }],
        Transition::Rejected => vec![Notification::PostRejected { author_id, title }],
        Transition::None => Vec::new(),
    };

    Ok((post, intents))
}

/// Flip the featured flag. Staff only; the notification is edge-triggered on
/// the false-to-true flip.
pub async fn set_featured(
    db: &DatabaseConnection,
    post_id: i32,
    actor: &Profile,
    featured: bool,
) -> Result<(blog_posts::Model, Vec<Notification>), BlogError> {
    if !actor.is_elevated() {
        return Err(BlogError::Forbidden("Only staff can feature posts"));
    }

    let post = blog_posts::Entity::find_by_id(post_id)
        .one(db)
        .await?
        .ok_or(BlogError::NotFoundOrInvisible)?;

    let newly_featured = featured && !post.featured;
    let author_id = post.author_id;
    let title = post.title.clone();

    let mut active: blog_posts::ActiveModel = post.into();
    active.featured = Set(featured);
    active.updated_at = Set(Utc::now().naive_utc());
    let post = active.update(db).await?;

    let intents = if newly_featured {
        vec![Notification::PostFeatured {
            author_id,
            title,
            url: post.absolute_url(),
        }]
    } else {
        Vec::new()
    };

    Ok((post, intents))
}

/// Delete a post. Authors and staff only; comments, reactions and reports
/// go with it (cascade).
pub async fn delete_post(
    db: &DatabaseConnection,
    post_id: i32,
    actor: &Profile,
) -> Result<(), BlogError> {
    let post = blog_posts::Entity::find_by_id(post_id)
        .one(db)
        .await?
        .ok_or(BlogError::NotFoundOrInvisible)?;

    if post.author_id != actor.id && !actor.is_elevated() {
        if !visibility::post_is_visible(&post, Some(actor)) {
            return Err(BlogError::NotFoundOrInvisible);
        }
        return Err(BlogError::Forbidden("You cannot delete this post"));
    }

    blog_posts::Entity::delete_by_id(post.id).exec(db).await?;
    Ok(())
}

/// List posts, optionally restricted to one workflow status, newest first.
pub async fn posts_with_status(
    db: &DatabaseConnection,
    status: Option<ModerationStatus>,
) -> Result<Vec<blog_posts::Model>, DbErr> {
    let mut query = blog_posts::Entity::find()
        .order_by_desc(blog_posts::Column::PublishedAt)
        .order_by_desc(blog_posts::Column::UpdatedAt);
    if let Some(status) = status {
        query = query.filter(blog_posts::Column::Status.eq(status));
    }
    query.all(db).await
}

/// Look up a post by its canonical date-scoped URL parts.
pub async fn find_by_date_and_slug(
    db: &DatabaseConnection,
    year: i32,
    month: u32,
    day: u32,
    slug: &str,
) -> Result<Option<blog_posts::Model>, BlogError> {
    let date = match chrono::NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => d,
        None => return Ok(None),
    };
    let day_start = date.and_time(NaiveTime::MIN);
    let day_end = (date + Duration::days(1)).and_time(NaiveTime::MIN);

    Ok(blog_posts::Entity::find()
        .filter(blog_posts::Column::Slug.eq(slug))
        .filter(blog_posts::Column::PublishedAt.gte(day_start))
        .filter(blog_posts::Column::PublishedAt.lt(day_end))
        .one(db)
        .await?)
}
