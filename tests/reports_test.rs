//! Integration tests for comment reports: idempotence, the demotion back to
//! the moderation queue, and who may file at all.

mod common;

use common::{database::*, fixtures::*};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use gameabyss::blog::reports::{self, ReportOutcome};
use gameabyss::blog::BlogError;
use gameabyss::notifications::Notification;
use gameabyss::orm::{comment_reports, comments, ModerationStatus, ReportReason};

async fn seed(
    db: &sea_orm::DatabaseConnection,
) -> (
    gameabyss::user::Profile,
    gameabyss::user::Profile,
    comments::Model,
) {
    let author = create_test_user(db, "writer", false, false)
        .await
        .expect("user");
    let reporter = create_test_user(db, "reader", false, false)
        .await
        .expect("user");
    let post = create_test_post(
        db,
        &author,
        "Launch Day",
        "launch-day-2026-08-29",
        ModerationStatus::Approved,
        Some(chrono::Utc::now().naive_utc()),
    )
    .await
    .expect("post");
    let comment = create_test_comment(db, &post, &author, "Buy my mixtape", ModerationStatus::Approved)
        .await
        .expect("comment");
    (author, reporter, comment)
}

#[actix_rt::test]
async fn report_demotes_comment_and_alerts_staff() {
    let db = setup_test_database().await.expect("db");
    let (_, reporter, comment) = seed(&db).await;

    let (outcome, intents) =
        reports::file_report(&db, comment.id, &reporter, ReportReason::Spam, "obvious ad")
            .await
            .expect("report");

    assert!(matches!(outcome, ReportOutcome::Created(_)));
    assert_eq!(intents.len(), 1);
    assert!(matches!(
        &intents[0],
        Notification::CommentReported { reason_label, .. } if reason_label == "Spam"
    ));

    // The comment went back into the queue.
    let reloaded = comments::Entity::find_by_id(comment.id)
        .one(&db)
        .await
        .expect("query")
        .expect("row");
    assert_eq!(reloaded.status, ModerationStatus::Pending);
}

#[actix_rt::test]
async fn duplicate_report_is_idempotent() {
    let db = setup_test_database().await.expect("db");
    let (_, reporter, comment) = seed(&db).await;

    let (first, first_intents) =
        reports::file_report(&db, comment.id, &reporter, ReportReason::Spam, "")
            .await
            .expect("first");
    assert!(matches!(first, ReportOutcome::Created(_)));
    assert_eq!(first_intents.len(), 1);

    // Second attempt, different reason: nothing is written, nothing fires.
    let (second, second_intents) =
        reports::file_report(&db, comment.id, &reporter, ReportReason::Inappropriate, "")
            .await
            .expect("second");
    assert!(matches!(second, ReportOutcome::AlreadyExists));
    assert!(second_intents.is_empty());

    let rows = comment_reports::Entity::find()
        .filter(comment_reports::Column::CommentId.eq(comment.id))
        .count(&db)
        .await
        .expect("count");
    assert_eq!(rows, 1);
}

#[actix_rt::test]
async fn distinct_reporters_file_distinct_reports() {
    let db = setup_test_database().await.expect("db");
    let (_, reporter, comment) = seed(&db).await;
    let second_reporter = create_test_user(&db, "lurker", false, false)
        .await
        .expect("user");

    reports::file_report(&db, comment.id, &reporter, ReportReason::Spam, "")
        .await
        .expect("first");
    reports::file_report(
        &db,
        comment.id,
        &second_reporter,
        ReportReason::Inappropriate,
        "",
    )
    .await
    .expect("second");

    let rows = comment_reports::Entity::find()
        .filter(comment_reports::Column::CommentId.eq(comment.id))
        .count(&db)
        .await
        .expect("count");
    assert_eq!(rows, 2);
}

#[actix_rt::test]
async fn unapproved_comments_cannot_be_reported() {
    let db = setup_test_database().await.expect("db");
    let (author, reporter, _) = seed(&db).await;
    let post = create_test_post(
        &db,
        &author,
        "Second Wind",
        "second-wind-2026-08-29",
        ModerationStatus::Approved,
        Some(chrono::Utc::now().naive_utc()),
    )
    .await
    .expect("post");
    let pending = create_test_comment(&db, &post, &author, "Still in the queue", ModerationStatus::Pending)
        .await
        .expect("comment");

    // A comment that is not approved reads as absent, so the reporter
    // learns nothing and no report row or intent is produced.
    let result = reports::file_report(&db, pending.id, &reporter, ReportReason::Spam, "").await;
    assert!(matches!(result, Err(BlogError::NotFoundOrInvisible)));

    let rows = comment_reports::Entity::find()
        .filter(comment_reports::Column::CommentId.eq(pending.id))
        .count(&db)
        .await
        .expect("count");
    assert_eq!(rows, 0);
}

#[actix_rt::test]
async fn staff_and_authors_cannot_report() {
    let db = setup_test_database().await.expect("db");
    let (author, _, comment) = seed(&db).await;
    let staff = create_test_user(&db, "council", true, false)
        .await
        .expect("user");

    let result = reports::file_report(&db, comment.id, &staff, ReportReason::Spam, "").await;
    assert!(matches!(result, Err(BlogError::Forbidden(_))));

    let result = reports::file_report(&db, comment.id, &author, ReportReason::Spam, "").await;
    assert!(matches!(result, Err(BlogError::Forbidden(_))));
}
