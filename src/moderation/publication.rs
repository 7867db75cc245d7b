//! Publication state machine for blog posts.
//!
//! Any move between Pending, Approved and Rejected is legal; no state is
//! terminal. The machine owns the derived `published_at` field and reports
//! which notification-worthy transition fired, exactly once per status
//! change. Callers decide the requested status; this module only enforces
//! its consequences.

use chrono::NaiveDateTime;

use crate::orm::ModerationStatus;

/// Named transition fired by a status change. Moves into Pending are not
/// notification-worthy and report [`Transition::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Approved,
    Rejected,
}

/// Outcome of applying a requested status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub status: ModerationStatus,
    pub published_at: Option<NaiveDateTime>,
    pub transition: Transition,
}

/// Apply a requested status on top of the stored one.
///
/// `previous` is `None` for a row being created. Entering Approved stamps
/// `published_at` only when it is currently unset; re-approving a post whose
/// timestamp survived does not move it, which keeps the slug date bucket
/// stable. Entering Pending or Rejected always clears the timestamp.
pub fn apply_status(
    previous: Option<ModerationStatus>,
    next: ModerationStatus,
    published_at: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> StatusChange {
    let changed = previous != Some(next);
    match next {
        ModerationStatus::Approved => StatusChange {
            status: next,
            published_at: published_at.or(Some(now)),
            transition: if changed {
                Transition::Approved
            } else {
                Transition::None
            },
        },
        ModerationStatus::Pending => StatusChange {
            status: next,
            published_at: None,
            transition: Transition::None,
        },
        ModerationStatus::Rejected => StatusChange {
            status: next,
            published_at: None,
            transition: if changed {
                Transition::Rejected
            } else {
                Transition::None
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ModerationStatus::*;

    fn now() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new_pending_post_has_no_timestamp() {
        let change = apply_status(None, Pending, None, now());
        assert_eq!(change.published_at, None);
        assert_eq!(change.transition, Transition::None);
    }

    #[test]
    fn test_approval_stamps_published_at() {
        let change = apply_status(Some(Pending), Approved, None, now());
        assert_eq!(change.published_at, Some(now()));
        assert_eq!(change.transition, Transition::Approved);
    }

    #[test]
    fn test_resave_while_approved_keeps_timestamp_and_fires_nothing() {
        let first = now();
        let later = first + chrono::Duration::hours(3);
        let change = apply_status(Some(Approved), Approved, Some(first), later);
        assert_eq!(change.published_at, Some(first));
        assert_eq!(change.transition, Transition::None);
    }

    #[test]
    fn test_demotion_clears_timestamp() {
        let change = apply_status(Some(Approved), Pending, Some(now()), now());
        assert_eq!(change.published_at, None);
        assert_eq!(change.transition, Transition::None);

        let change = apply_status(Some(Approved), Rejected, Some(now()), now());
        assert_eq!(change.published_at, None);
        assert_eq!(change.transition, Transition::Rejected);
    }

    #[test]
    fn test_reapproval_after_demotion_stamps_fresh() {
        // Demotion cleared published_at, so re-approval stamps again.
        let later = now() + chrono::Duration::days(2);
        let change = apply_status(Some(Rejected), Approved, None, later);
        assert_eq!(change.published_at, Some(later));
        assert_eq!(change.transition, Transition::Approved);
    }

    #[test]
    fn test_rejection_is_edge_triggered() {
        let change = apply_status(Some(Rejected), Rejected, None, now());
        assert_eq!(change.transition, Transition::None);
    }
}
