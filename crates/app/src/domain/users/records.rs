//! User Records

use jiff::Timestamp;

use crate::ids::TypedId;

/// User ID
pub type UserId = TypedId<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,

    /// Unique login name. Never changed through the profile endpoints.
    pub username: String,

    /// Contact address, may be blank.
    pub email: String,

    pub first_name: String,
    pub last_name: String,

    /// Staff accounts may delete any user.
    pub is_staff: bool,

    /// Inactive accounts cannot obtain or use tokens.
    pub is_active: bool,

    pub date_joined: Timestamp,
}
