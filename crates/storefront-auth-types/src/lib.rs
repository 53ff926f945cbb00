//! Customer session types shared between the auth service and its tests.
//!
//! Provides JWT minting/validation, the session cookie builders, and the
//! `CustomerSession` extractor.

pub mod cookie;
pub mod session;
pub mod token;
