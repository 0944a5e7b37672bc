//! Pinpoint Core - Shared types library.
//!
//! This crate provides common types used across all Pinpoint components:
//! - `api` - The public REST service
//! - `integration-tests` - End-to-end tests against the API router
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
