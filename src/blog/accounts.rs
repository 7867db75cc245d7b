//! Account lifecycle operations.
//!
//! Authentication itself lives in [`crate::session`]; these operations only
//! create and remove rows and produce the staff notifications for both
//! events.

use chrono::Utc;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};

use super::{is_unique_violation, BlogError};
use crate::notifications::types::Notification;
use crate::orm::users;
use crate::session::hash_password;
use crate::user::Profile;

const PASSWORD_MIN_LENGTH: usize = 8;

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
}

/// Register a new account and notify staff.
pub async fn register_user(
    db: &DatabaseConnection,
    account: NewAccount,
) -> Result<(users::Model, Vec<Notification>), BlogError> {
    let username = account.username.trim().to_string();
    if username.is_empty() {
        return Err(BlogError::ValidationFailed(
            "Username is required".to_string(),
        ));
    }
    if account.password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(BlogError::ValidationFailed(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_LENGTH
        )));
    }
    let email = account
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());

    let password = hash_password(&account.password)
        .map_err(|e| BlogError::Database(DbErr::Custom(format!("password hash: {}", e))))?;

    let insert = users::ActiveModel {
        username: Set(username.clone()),
        email: Set(email.clone()),
        password: Set(password),
        is_staff: Set(false),
        is_superuser: Set(false),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await;

    let user = match insert {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => {
            return Err(BlogError::ValidationFailed(
                "That username is already taken".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let intents = vec![Notification::AccountCreated {
        user_id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
    }];

    Ok((user, intents))
}

/// Delete an account. Users may delete themselves; staff may delete anyone.
/// Posts, comments, reactions and reports cascade with the row.
pub async fn delete_user(
    db: &DatabaseConnection,
    user_id: i32,
    actor: &Profile,
) -> Result<Vec<Notification>, BlogError> {
    if actor.id != user_id && !actor.is_elevated() {
        return Err(BlogError::Forbidden("You cannot delete this account"));
    }

    let user = users::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(BlogError::NotFoundOrInvisible)?;

    let username = user.username.clone();
    let email = user.email.clone();
    users::Entity::delete_by_id(user.id).exec(db).await?;

    Ok(vec![Notification::AccountDeleted { username, email }])
}
