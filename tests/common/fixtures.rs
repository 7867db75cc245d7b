//! Test fixtures for creating test data
#![allow(dead_code)]

use chrono::Utc;
use sea_orm::{entity::*, ActiveValue::Set, DatabaseConnection, DbErr};

use gameabyss::orm::{blog_posts, comments, ModerationStatus};
use gameabyss::user::Profile;

/// Create a user row and return the profile the operations layer works with.
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
    is_staff: bool,
    is_superuser: bool,
) -> Result<Profile, DbErr> {
    create_test_user_with_email(
        db,
        username,
        Some(&format!("{}@test.com", username)),
        is_staff,
        is_superuser,
    )
    .await
}

pub async fn create_test_user_with_email(
    db: &DatabaseConnection,
    username: &str,
    email: Option<&str>,
    is_staff: bool,
    is_superuser: bool,
) -> Result<Profile, DbErr> {
    use gameabyss::orm::users;

    let password = gameabyss::session::hash_password("password123")
        .map_err(|e| DbErr::Custom(format!("Password hashing failed: {}", e)))?;

    let user = users::ActiveModel {
        username: Set(username.to_string()),
        email: Set(email.map(str::to_string)),
        password: Set(password),
        is_staff: Set(is_staff),
        is_superuser: Set(is_superuser),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(Profile::from(user))
}

/// Insert a post row directly, bypassing the operations layer, for tests
/// that need precise control over slug, status and timestamps.
pub async fn create_test_post(
    db: &DatabaseConnection,
    author: &Profile,
    title: &str,
    slug: &str,
    status: ModerationStatus,
    published_at: Option<chrono::NaiveDateTime>,
) -> Result<blog_posts::Model, DbErr> {
    let now = Utc::now().naive_utc();
    blog_posts::ActiveModel {
        title: Set(title.to_string()),
        slug: Set(slug.to_string()),
        author_id: Set(author.id),
        excerpt: Set(String::new()),
        body: Set("Test post body content.".to_string()),
        tags: Set(String::new()),
        status: Set(status),
        featured: Set(false),
        created_at: Set(now),
        published_at: Set(published_at),
        updated_at: Set(now),
        reading_time: Set(1),
        likes: Set(0),
        rating: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn create_test_comment(
    db: &DatabaseConnection,
    post: &blog_posts::Model,
    author: &Profile,
    body: &str,
    status: ModerationStatus,
) -> Result<comments::Model, DbErr> {
    let now = Utc::now().naive_utc();
    comments::ActiveModel {
        post_id: Set(post.id),
        author_id: Set(author.id),
        body: Set(body.to_string()),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}
