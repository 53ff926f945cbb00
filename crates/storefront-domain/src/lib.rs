//! Domain types shared across storefront services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Request bodies are parsed into these types once, at the HTTP boundary;
//! use cases never see unvalidated strings for emails, passwords or codes.

pub mod code;
pub mod email;
pub mod error;
pub mod id;
pub mod password;
