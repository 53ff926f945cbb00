//! Test utilities for storefront services.
//!
//! Import from `[dev-dependencies]` only.

pub mod auth;
