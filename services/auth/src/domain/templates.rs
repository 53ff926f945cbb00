//! Transactional email bodies.

use storefront_domain::email::Email;

use crate::domain::types::{EmailMessage, OTP_TTL_MINUTES};

pub fn otp_email(to: Email, code: &str) -> EmailMessage {
    EmailMessage {
        to,
        subject: "Your verification code".to_owned(),
        text: format!("Your OTP code is {code}. It expires in {OTP_TTL_MINUTES} minutes."),
        html: format!(
            r#"<p>Your OTP code is <b>{code}</b>.</p><p>It expires in {OTP_TTL_MINUTES} minutes.</p>"#
        ),
    }
}

pub fn reset_password_email(to: Email, link: &str) -> EmailMessage {
    EmailMessage {
        to,
        subject: "Reset your password".to_owned(),
        text: format!(
            "We received a request to reset your password. Click the link to proceed: {link}. \
             If you didn't request this, you can ignore this email."
        ),
        html: format!(
            r#"<p>We received a request to reset your password.</p>
<p><a href="{link}">Click here to reset your password</a></p>
<p>If you didn't request this, you can ignore this email.</p>"#
        ),
    }
}
