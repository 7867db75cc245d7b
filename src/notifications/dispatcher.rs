//! Resolves recipients for notification intents and hands the rendered
//! messages to the email layer.
//!
//! Delivery is best-effort. A failed send is logged and swallowed so a
//! flaky mail relay can never fail the request that produced the intent.

use sea_orm::{entity::*, query::*, ColumnTrait, Condition, DatabaseConnection, DbErr, QueryFilter};

use crate::email;
use crate::email::templates;
use crate::notifications::Notification;
use crate::orm::users;

/// Deliver a batch of intents produced by a committed operation.
pub async fn dispatch(db: &DatabaseConnection, intents: Vec<Notification>) {
    for intent in &intents {
        if let Err(e) = deliver(db, intent).await {
            log::warn!("notification '{}' not delivered: {}", intent.kind(), e);
        }
    }
}

async fn deliver(
    db: &DatabaseConnection,
    intent: &Notification,
) -> Result<(), Box<dyn std::error::Error>> {
    let recipients = recipients_for(db, intent).await?;

    let (subject, body) = templates::render(intent);
    if recipients.is_empty() {
        log::info!("skipping email '{}' - no recipients", subject);
        return Ok(());
    }

    for to in &recipients {
        email::send_email(to, &subject, &body).await?;
    }
    Ok(())
}

/// Recipient policy per intent. New posts and comments alert every staff
/// member and superuser except the person who wrote them; reports go to
/// staff only; author-targeted mail resolves to nothing when the author
/// has no address on file.
pub async fn recipients_for(
    db: &DatabaseConnection,
    intent: &Notification,
) -> Result<Vec<String>, DbErr> {
    match intent {
        Notification::PostSubmitted { author_id, .. }
        | Notification::CommentSubmitted { author_id, .. } => {
            staff_and_superuser_recipients(db, &[*author_id]).await
        }
        Notification::PostApproved { author_id, .. }
        | Notification::PostRejected { author_id, .. }
        | Notification::PostFeatured { author_id, .. } => {
            Ok(author_email(db, *author_id).await?.into_iter().collect())
        }
        Notification::CommentReported { .. } => staff_recipients(db).await,
        Notification::AccountCreated { user_id, .. } => {
            staff_and_superuser_recipients(db, &[*user_id]).await
        }
        Notification::AccountDeleted { .. } => staff_and_superuser_recipients(db, &[]).await,
    }
}

/// Staff emails for moderation alerts.
pub async fn staff_recipients(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
    let rows = users::Entity::find()
        .filter(users::Column::IsStaff.eq(true))
        .all(db)
        .await?;
    Ok(dedup_emails(rows, &[]))
}

/// Unique emails of all staff and superusers, minus the excluded user ids.
pub async fn staff_and_superuser_recipients(
    db: &DatabaseConnection,
    exclude_user_ids: &[i32],
) -> Result<Vec<String>, DbErr> {
    let rows = users::Entity::find()
        .filter(
            Condition::any()
                .add(users::Column::IsStaff.eq(true))
                .add(users::Column::IsSuperuser.eq(true)),
        )
        .all(db)
        .await?;
    Ok(dedup_emails(rows, exclude_user_ids))
}

async fn author_email(db: &DatabaseConnection, author_id: i32) -> Result<Option<String>, DbErr> {
    let user = users::Entity::find_by_id(author_id).one(db).await?;
    Ok(user
        .and_then(|u| u.email)
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty()))
}

fn dedup_emails(rows: Vec<users::Model>, exclude_user_ids: &[i32]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for user in rows {
        if exclude_user_ids.contains(&user.id) {
            continue;
        }
        let email = match user.email {
            Some(e) => e.trim().to_string(),
            None => continue,
        };
        if !email.is_empty() && !unique.contains(&email) {
            unique.push(email);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::dedup_emails;
    use crate::orm::users;

    fn user(id: i32, email: Option<&str>) -> users::Model {
        users::Model {
            id,
            username: format!("user{}", id),
            email: email.map(str::to_string),
            password: String::new(),
            is_staff: false,
            is_superuser: false,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn dedup_drops_blanks_and_duplicates() {
        let rows = vec![
            user(1, Some("mod@example.com")),
            user(2, None),
            user(3, Some("  ")),
            user(4, Some("mod@example.com")),
            user(5, Some("lead@example.com")),
        ];
        assert_eq!(
            dedup_emails(rows, &[]),
            vec!["mod@example.com".to_string(), "lead@example.com".to_string()]
        );
    }

    #[test]
    fn dedup_honors_exclusions() {
        let rows = vec![
            user(1, Some("self@example.com")),
            user(2, Some("other@example.com")),
        ];
        assert_eq!(dedup_emails(rows, &[1]), vec!["other@example.com".to_string()]);
    }
}
