//! sea-orm entities for the customer verification tables.

pub mod email_verifications;
pub mod password_reset_tokens;
