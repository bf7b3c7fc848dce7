//! User permissions.

use crate::domain::users::records::{UserId, UserRecord};

/// Staff may delete anyone; everyone else may only delete themselves.
#[must_use]
pub fn can_delete(caller: &UserRecord, target: UserId) -> bool {
    caller.is_staff || caller.id == target
}
