pub mod change_password;
pub mod password_reset;
pub mod session;
pub mod verification;
