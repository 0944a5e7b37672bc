//! Business logic services for the Pinpoint API.
//!
//! # Services
//!
//! - `auth` - Registration, login, and bearer-token resolution
//! - `token` - Stateless HS256 token codec

pub mod auth;
pub mod token;

pub use auth::{AuthError, AuthService, hash_password, verify_password};
pub use token::{Claims, TokenCodec, TokenError};
