//! HTTP middleware and extractors for the API.
//!
//! # Layer Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request tracing)
//! 3. `CorsLayer` (unrestricted, matching the public API contract)
//!
//! Authentication is not a layer: routes that need the acting user take
//! the [`RequireAuth`] extractor.

pub mod auth;

pub use auth::RequireAuth;
