//! Address domain types.
//!
//! An "address" is an x/y coordinate pin owned by exactly one user.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pinpoint_core::{AddressId, UserId};

/// A coordinate address (domain type).
#[derive(Debug, Clone)]
pub struct Address {
    /// Unique address ID.
    pub id: AddressId,
    /// Owning user. Required and immutable after creation; deleting an
    /// address never touches the user.
    pub user_id: UserId,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// When the address was created.
    pub created_at: DateTime<Utc>,
}

/// Public view of an address, safe to serialize in responses.
#[derive(Debug, Clone, Serialize)]
pub struct AddressView {
    pub id: AddressId,
    pub user_id: UserId,
    pub x: f64,
    pub y: f64,
    pub created_at: DateTime<Utc>,
}

impl From<Address> for AddressView {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            user_id: address.user_id,
            x: address.x,
            y: address.y,
            created_at: address.created_at,
        }
    }
}
