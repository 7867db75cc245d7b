//! Comment moderation gate and visibility predicates.
//!
//! Elevated actors (staff or superuser) bypass the moderation queue; their
//! submissions go live immediately. Everyone else waits in Pending.

use crate::orm::{blog_posts, comments, ModerationStatus};
use crate::user::Profile;

/// Initial status for content created by `actor`.
pub fn default_status_for(actor: &Profile) -> ModerationStatus {
    if actor.is_elevated() {
        ModerationStatus::Approved
    } else {
        ModerationStatus::Pending
    }
}

/// Whether `viewer` may see this post at all. Non-approved posts are only
/// visible to their author (self-preview); to everyone else they do not
/// exist.
pub fn post_is_visible(post: &blog_posts::Model, viewer: Option<&Profile>) -> bool {
    post.status == ModerationStatus::Approved
        || viewer.map(|v| v.id == post.author_id).unwrap_or(false)
}

/// Whether `actor` may react to this comment. Staff may react to anything;
/// others only to approved comments.
pub fn can_react_to_comment(comment: &comments::Model, actor: &Profile) -> bool {
    comment.status == ModerationStatus::Approved || actor.is_staff
}

/// Whether `actor` may report this comment: non-elevated, not the author,
/// and the comment is publicly visible.
pub fn can_report_comment(comment: &comments::Model, actor: &Profile) -> bool {
    !actor.is_elevated()
        && actor.id != comment.author_id
        && comment.status == ModerationStatus::Approved
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(id: i32, is_staff: bool, is_superuser: bool) -> Profile {
        Profile {
            id,
            username: format!("user{}", id),
            email: None,
            is_staff,
            is_superuser,
        }
    }

    fn post(author_id: i32, status: ModerationStatus) -> blog_posts::Model {
        let now = Utc::now().naive_utc();
        blog_posts::Model {
            id: 1,
            title: "t".to_string(),
            slug: "t-2024-01-01".to_string(),
            author_id,
            excerpt: String::new(),
            body: String::new(),
            tags: String::new(),
            status,
            featured: false,
            created_at: now,
            published_at: None,
            updated_at: now,
            reading_time: 1,
            likes: 0,
            rating: 0,
        }
    }

    fn comment(author_id: i32, status: ModerationStatus) -> comments::Model {
        let now = Utc::now().naive_utc();
        comments::Model {
            id: 1,
            post_id: 1,
            author_id,
            body: "hello there".to_string(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_default_status() {
        assert_eq!(
            default_status_for(&profile(1, false, false)),
            ModerationStatus::Pending
        );
        assert_eq!(
            default_status_for(&profile(1, true, false)),
            ModerationStatus::Approved
        );
        assert_eq!(
            default_status_for(&profile(1, false, true)),
            ModerationStatus::Approved
        );
    }

    #[test]
    fn test_pending_post_visible_only_to_author() {
        let p = post(7, ModerationStatus::Pending);
        assert!(post_is_visible(&p, Some(&profile(7, false, false))));
        assert!(!post_is_visible(&p, Some(&profile(8, false, false))));
        assert!(!post_is_visible(&p, None));
    }

    #[test]
    fn test_approved_post_visible_to_all() {
        let p = post(7, ModerationStatus::Approved);
        assert!(post_is_visible(&p, None));
        assert!(post_is_visible(&p, Some(&profile(8, false, false))));
    }

    #[test]
    fn test_react_gate() {
        let c = comment(7, ModerationStatus::Pending);
        assert!(!can_react_to_comment(&c, &profile(8, false, false)));
        assert!(can_react_to_comment(&c, &profile(8, true, false)));
        let c = comment(7, ModerationStatus::Approved);
        assert!(can_react_to_comment(&c, &profile(8, false, false)));
    }

    #[test]
    fn test_report_gate() {
        let c = comment(7, ModerationStatus::Approved);
        assert!(can_report_comment(&c, &profile(8, false, false)));
        // Authors and elevated users cannot report.
        assert!(!can_report_comment(&c, &profile(7, false, false)));
        assert!(!can_report_comment(&c, &profile(8, true, false)));
        assert!(!can_report_comment(&c, &profile(8, false, true)));
        // Non-approved comments cannot be reported by regular users.
        let c = comment(7, ModerationStatus::Pending);
        assert!(!can_report_comment(&c, &profile(8, false, false)));
    }
}
