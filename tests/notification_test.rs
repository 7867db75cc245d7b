//! Integration tests for notification recipient resolution and dispatch.

mod common;

use common::{database::*, fixtures::*};
use serial_test::serial;

use gameabyss::notifications::{dispatcher, Notification};

#[actix_rt::test]
async fn staff_and_superusers_resolve_deduped() {
    let db = setup_test_database().await.expect("db");

    create_test_user(&db, "mod_a", true, false).await.expect("user");
    create_test_user(&db, "admin", false, true).await.expect("user");
    // Shares an address with mod_a.
    create_test_user_with_email(&db, "mod_b", Some("mod_a@test.com"), true, false)
        .await
        .expect("user");
    // No email, never a recipient.
    create_test_user_with_email(&db, "mod_c", None, true, false)
        .await
        .expect("user");
    // Plain member, not a recipient.
    create_test_user(&db, "reader", false, false).await.expect("user");

    let recipients = dispatcher::staff_and_superuser_recipients(&db, &[])
        .await
        .expect("resolve");

    assert_eq!(recipients.len(), 2);
    assert!(recipients.contains(&"mod_a@test.com".to_string()));
    assert!(recipients.contains(&"admin@test.com".to_string()));
}

#[actix_rt::test]
async fn new_account_excludes_itself_from_recipients() {
    let db = setup_test_database().await.expect("db");

    let staff = create_test_user(&db, "mod_a", true, false).await.expect("user");
    let newcomer = create_test_user(&db, "newcomer", true, false)
        .await
        .expect("user");

    let recipients = dispatcher::staff_and_superuser_recipients(&db, &[newcomer.id])
        .await
        .expect("resolve");

    assert_eq!(recipients, vec![staff.email.expect("email")]);
}

#[actix_rt::test]
async fn report_alerts_go_to_staff_only() {
    let db = setup_test_database().await.expect("db");

    create_test_user(&db, "mod_a", true, false).await.expect("user");
    create_test_user(&db, "root", false, true).await.expect("user");

    let recipients = dispatcher::staff_recipients(&db).await.expect("resolve");
    assert_eq!(recipients, vec!["mod_a@test.com".to_string()]);
}

#[actix_rt::test]
async fn new_post_alerts_reach_staff_and_superusers_except_author() {
    let db = setup_test_database().await.expect("db");

    let staff = create_test_user(&db, "mod_a", true, false).await.expect("user");
    let root = create_test_user(&db, "root", false, true).await.expect("user");
    // Staff authors still publish; they just don't get mailed about it.
    let author = create_test_user(&db, "writer", true, false).await.expect("user");

    let intent = Notification::PostSubmitted {
        author_id: author.id,
        author_name: author.username.clone(),
        title: "Launch Day".to_string(),
        status_label: "Approved".to_string(),
        url: "/blog/2026/08/29/launch-day-2026-08-29".to_string(),
    };

    let recipients = dispatcher::recipients_for(&db, &intent).await.expect("resolve");
    assert_eq!(recipients.len(), 2);
    assert!(recipients.contains(&staff.email.expect("email")));
    assert!(recipients.contains(&root.email.expect("email")));
    assert!(!recipients.contains(&"writer@test.com".to_string()));
}

#[actix_rt::test]
#[serial]
async fn dispatch_is_fail_soft_in_mock_mode() {
    std::env::set_var("SMTP_MOCK", "true");

    let db = setup_test_database().await.expect("db");
    create_test_user(&db, "mod_a", true, false).await.expect("user");
    let author = create_test_user(&db, "writer", false, false)
        .await
        .expect("user");

    // One intent with recipients, one whose author has no email. Neither
    // may panic or error out of dispatch.
    let no_email_author = create_test_user_with_email(&db, "ghost", None, false, false)
        .await
        .expect("user");

    dispatcher::dispatch(
        &db,
        vec![
            Notification::CommentReported {
                reporter_name: author.username.clone(),
                post_title: "Launch Day".to_string(),
                reason_label: "Spam".to_string(),
                comment_id: 1,
            },
            Notification::PostApproved {
                author_id: no_email_author.id,
                title: "Silent".to_string(),
                url: "/blog/2026/08/29/silent-2026-08-29".to_string(),
            },
        ],
    )
    .await;

    std::env::remove_var("SMTP_MOCK");
}
