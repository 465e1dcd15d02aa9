//! Well-known role name constants.
//!
//! Account roles are stored on the `users` row; membership roles on the
//! `group_memberships` row.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

pub const MEMBER_ROLE_OWNER: &str = "owner";
pub const MEMBER_ROLE_MEMBER: &str = "member";
