//! Message bodies for each notification intent.
//!
//! Pure text rendering so the copy can be unit tested without a relay.

use crate::notifications::Notification;

/// Render an intent into a `(subject, body)` pair.
pub fn render(intent: &Notification) -> (String, String) {
    match intent {
        Notification::PostSubmitted {
            author_name,
            title,
            status_label,
            url,
            ..
        } => (
            "[Game Abyss] New post submitted".to_string(),
            format!(
                "Hello Council,\n\n\
                 {} just submitted a new post titled \"{}\".\n\
                 Current status: {}.\n\
                 Preview: {}\n",
                author_name, title, status_label, url
            ),
        ),
        Notification::PostApproved { title, url, .. } => (
            "[Game Abyss] Your post was approved".to_string(),
            format!(
                "Explorer,\n\n\
                 The Council has approved your post \"{}\". It now echoes across \
                 the Abyss, visible on the front page.\n\
                 Read it here: {}\n\n\
                 Keep the signals coming.",
                title, url
            ),
        ),
        Notification::PostRejected { title, .. } => (
            "[Game Abyss] Your post was rejected".to_string(),
            format!(
                "Explorer,\n\n\
                 Your post \"{}\" was not approved this round, so it will not be \
                 visible on the blog.\n\
                 Refine the piece and resubmit when ready.\n\n\
                 The Game Abyss Council",
                title
            ),
        ),
        Notification::PostFeatured { title, url, .. } => (
            "[Game Abyss] Your post is Featured".to_string(),
            format!(
                "Explorer,\n\n\
                 Your post \"{}\" has been marked as Featured by the Council.\n\
                 See it in the spotlight: {}\n\n\
                 Thanks for powering the community.",
                title, url
            ),
        ),
        Notification::CommentSubmitted {
            author_name,
            post_title,
            excerpt,
            url,
            ..
        } => (
            "[Game Abyss] New comment submitted".to_string(),
            format!(
                "Hello Council,\n\n\
                 {} left a new comment on \"{}\".\n\
                 Excerpt: {}\n\
                 Moderate on: {}\n",
                author_name, post_title, excerpt, url
            ),
        ),
        Notification::CommentReported {
            reporter_name,
            post_title,
            reason_label,
            comment_id,
        } => (
            "[Game Abyss] Comment reported".to_string(),
            format!(
                "Heads up, team,\n\n\
                 {} reported a comment on \"{}\".\n\
                 Reason: {}.\n\
                 Open moderation: /admin/comments/{}\n",
                reporter_name, post_title, reason_label, comment_id
            ),
        ),
        Notification::AccountCreated {
            username, email, ..
        } => {
            let mut lines = vec![
                "A new user has registered on Game Abyss.".to_string(),
                format!("Username: {}", username),
            ];
            if let Some(email) = email {
                lines.push(format!("Email: {}", email));
            }
            (
                format!("New user registered: {}", username),
                lines.join("\n"),
            )
        }
        Notification::AccountDeleted { username, email } => {
            let mut lines = vec![
                "A user account has been deleted from Game Abyss.".to_string(),
                format!("Username: {}", username),
            ];
            if let Some(email) = email {
                lines.push(format!("Email: {}", email));
            }
            (
                format!("User account deleted: {}", username),
                lines.join("\n"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::notifications::Notification;

    #[test]
    fn post_submitted_carries_status_and_url() {
        let (subject, body) = render(&Notification::PostSubmitted {
            author_id: 7,
            author_name: "mags".to_string(),
            title: "Launch Day".to_string(),
            status_label: "Pending".to_string(),
            url: "/blog/2026/08/29/launch-day-2026-08-29".to_string(),
        });
        assert_eq!(subject, "[Game Abyss] New post submitted");
        assert!(body.contains("mags just submitted a new post titled \"Launch Day\""));
        assert!(body.contains("Current status: Pending."));
        assert!(body.contains("/blog/2026/08/29/launch-day-2026-08-29"));
    }

    #[test]
    fn report_alert_names_reason_and_moderation_url() {
        let (subject, body) = render(&Notification::CommentReported {
            reporter_name: "alix".to_string(),
            post_title: "Launch Day".to_string(),
            reason_label: "Spam".to_string(),
            comment_id: 42,
        });
        assert_eq!(subject, "[Game Abyss] Comment reported");
        assert!(body.contains("Reason: Spam."));
        assert!(body.contains("/admin/comments/42"));
    }

    #[test]
    fn account_created_omits_missing_email() {
        let (_, body) = render(&Notification::AccountCreated {
            user_id: 3,
            username: "newbie".to_string(),
            email: None,
        });
        assert!(!body.contains("Email:"));
    }
}
