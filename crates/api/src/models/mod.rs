//! Domain models for the Pinpoint API.
//!
//! These types represent validated domain objects separate from database
//! row types and from the JSON request/response shapes defined next to the
//! route handlers.

pub mod address;
pub mod user;

pub use address::{Address, AddressView};
pub use user::{NewUser, User, UserView};
