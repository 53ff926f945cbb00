pub mod otp;
pub mod repository;
pub mod reset_token;
pub mod templates;
pub mod types;
