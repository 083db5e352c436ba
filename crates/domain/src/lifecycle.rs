//! Record lifecycle: the Active/SoftDeleted state machine and audit stamps.
//!
//! Every stored record goes through the same two states:
//!
//! ```text
//!            set_status(true)
//!   Active ───────────────────▶ SoftDeleted ──── delete ───▶ (removed)
//!          ◀───────────────────
//!            set_status(false)
//! ```
//!
//! Hard removal is only legal from [`Status::SoftDeleted`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// UTC timestamp used for audit fields.
pub type Timestamp = DateTime<Utc>;

/// Lifecycle state of a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Active,
    SoftDeleted,
}

impl Status {
    /// Map the stored `is_deleted` flag to a state.
    #[must_use]
    pub const fn from_deleted(deleted: bool) -> Self {
        if deleted {
            Self::SoftDeleted
        } else {
            Self::Active
        }
    }

    #[must_use]
    pub const fn is_deleted(self) -> bool {
        matches!(self, Self::SoftDeleted)
    }
}

/// Soft-delete flag plus creator/updater stamps carried by every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifecycle {
    pub is_deleted: bool,
    pub created: Timestamp,
    pub created_by: UserId,
    pub last_updated: Timestamp,
    pub last_updated_by: UserId,
}

impl Lifecycle {
    /// Stamps for a record created by `user` at `at`. New records are active.
    #[must_use]
    pub fn created(user: UserId, at: Timestamp) -> Self {
        Self {
            is_deleted: false,
            created: at,
            created_by: user,
            last_updated: at,
            last_updated_by: user,
        }
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        Status::from_deleted(self.is_deleted)
    }

    /// Record that `user` modified the record at `at`.
    pub fn touch(&mut self, user: UserId, at: Timestamp) {
        self.last_updated = at;
        self.last_updated_by = user;
    }

    /// Move to `status`, stamping the updater only when the state changes.
    ///
    /// Returns `true` when a transition happened.
    pub fn transition(&mut self, status: Status, user: UserId, at: Timestamp) -> bool {
        if self.status() == status {
            return false;
        }
        self.is_deleted = status.is_deleted();
        self.touch(user, at);
        true
    }

    /// Whether the record may be removed permanently.
    #[must_use]
    pub const fn is_removable(&self) -> bool {
        self.status().is_deleted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn stamps() -> Lifecycle {
        Lifecycle::created(UserId::new(1), Utc::now())
    }

    #[test]
    fn should_start_active_with_creator_as_updater() {
        let lifecycle = stamps();
        assert_eq!(lifecycle.status(), Status::Active);
        assert_eq!(lifecycle.created_by, lifecycle.last_updated_by);
        assert_eq!(lifecycle.created, lifecycle.last_updated);
        assert!(!lifecycle.is_removable());
    }

    #[test]
    fn should_stamp_updater_when_status_changes() {
        let mut lifecycle = stamps();
        let later = lifecycle.last_updated + Duration::seconds(5);

        let changed = lifecycle.transition(Status::SoftDeleted, UserId::new(9), later);

        assert!(changed);
        assert!(lifecycle.is_deleted);
        assert!(lifecycle.is_removable());
        assert_eq!(lifecycle.last_updated, later);
        assert_eq!(lifecycle.last_updated_by, UserId::new(9));
    }

    #[test]
    fn should_leave_stamps_untouched_when_status_already_matches() {
        let mut lifecycle = stamps();
        let before = lifecycle.clone();

        let changed = lifecycle.transition(
            Status::Active,
            UserId::new(2),
            before.last_updated + Duration::seconds(1),
        );

        assert!(!changed);
        assert_eq!(lifecycle, before);
    }

    #[test]
    fn should_restore_soft_deleted_record() {
        let mut lifecycle = stamps();
        let now = lifecycle.created;
        lifecycle.transition(Status::SoftDeleted, UserId::new(1), now);
        lifecycle.transition(Status::Active, UserId::new(1), now);
        assert_eq!(lifecycle.status(), Status::Active);
    }

    #[test]
    fn should_serialize_flag_as_is_deleted() {
        let json = serde_json::to_value(stamps()).unwrap();
        assert_eq!(json["isDeleted"], false);
        assert_eq!(json["createdBy"], 1);
    }
}
