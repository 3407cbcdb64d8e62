//! Profile Records

use paddock::subscriptions::Subscription;

use crate::uuids::TypedUuid;

/// Storefront customer.
#[derive(Debug, Clone, Copy)]
pub struct User;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// Subscription columns of a profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileRecord {
    pub user: UserUuid,
    pub subscription: Subscription,
}
