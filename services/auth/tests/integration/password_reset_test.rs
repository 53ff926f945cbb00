use chrono::{Duration, Utc};
use url::Url;

use storefront_auth::domain::reset_token::hash_token;
use storefront_auth::error::AuthServiceError;
use storefront_auth::usecase::password_reset::{
    ForgotPasswordInput, ForgotPasswordUseCase, ResetPasswordInput, ResetPasswordUseCase,
    ResetRequestAccepted,
};

use crate::helpers::{
    MockCustomerDirectory, MockIdentityProvider, MockMailer, MockResetTokenRepo, TEST_EMAIL,
    TEST_PASSWORD, email, password, reset_token_row, test_customer, token_from,
};

fn base() -> Url {
    Url::parse("http://localhost:3000").unwrap()
}

fn forgot(
    customers: MockCustomerDirectory,
    reset_tokens: MockResetTokenRepo,
    mailer: MockMailer,
) -> ForgotPasswordUseCase<MockCustomerDirectory, MockResetTokenRepo, MockMailer> {
    ForgotPasswordUseCase {
        customers,
        reset_tokens,
        mailer,
        reset_link_base: base(),
    }
}

fn forgot_input() -> ForgotPasswordInput {
    ForgotPasswordInput {
        email: email(TEST_EMAIL),
    }
}

fn reset_input(token: &str, new_password: &str) -> ResetPasswordInput {
    ResetPasswordInput {
        provider: "emailpass".to_owned(),
        token: token.to_owned(),
        password: password(new_password),
    }
}

// ── ForgotPasswordUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_only_hash_and_email_raw_token() {
    let tokens = MockResetTokenRepo::empty();
    let stored = tokens.tokens_handle();
    let mailer = MockMailer::new();
    let sent = mailer.sent_handle();

    let accepted = forgot(MockCustomerDirectory::new(vec![test_customer()]), tokens, mailer)
        .execute(forgot_input())
        .await;
    assert_eq!(accepted, ResetRequestAccepted);

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Reset your password");
    assert!(
        sent[0]
            .text
            .contains("http://localhost:3000/auth/reset-password?token=")
    );
    let raw = token_from(&sent[0]);
    assert_eq!(raw.len(), 64);

    let stored = stored.lock().unwrap();
    assert_eq!(stored.len(), 1);
    let row = &stored[0];
    assert_eq!(row.token_hash, hash_token(&raw));
    assert_ne!(row.token_hash, raw);
    assert_eq!(row.email, TEST_EMAIL);
    assert!(row.used_at.is_none());
    let ttl = row.expires_at - row.created_at;
    assert!(ttl > Duration::minutes(29) && ttl <= Duration::minutes(30));
}

#[tokio::test]
async fn should_do_nothing_for_unknown_email() {
    let tokens = MockResetTokenRepo::empty();
    let stored = tokens.tokens_handle();
    let mailer = MockMailer::new();
    let sent = mailer.sent_handle();

    let accepted = forgot(MockCustomerDirectory::empty(), tokens, mailer)
        .execute(forgot_input())
        .await;

    assert_eq!(accepted, ResetRequestAccepted);
    assert!(stored.lock().unwrap().is_empty());
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_accept_even_when_collaborators_fail() {
    let accepted = forgot(
        MockCustomerDirectory::unavailable(),
        MockResetTokenRepo::empty(),
        MockMailer::new(),
    )
    .execute(forgot_input())
    .await;
    assert_eq!(accepted, ResetRequestAccepted);

    let accepted = forgot(
        MockCustomerDirectory::new(vec![test_customer()]),
        MockResetTokenRepo::empty(),
        MockMailer::failing(),
    )
    .execute(forgot_input())
    .await;
    assert_eq!(accepted, ResetRequestAccepted);
}

#[tokio::test]
async fn should_invalidate_previous_token_when_issuing_new_one() {
    let tokens = MockResetTokenRepo::empty();
    let mailer = MockMailer::new();
    let sent = mailer.sent_handle();
    let uc = forgot(
        MockCustomerDirectory::new(vec![test_customer()]),
        tokens.share(),
        mailer,
    );

    uc.execute(forgot_input()).await;
    uc.execute(forgot_input()).await;

    let (t1, t2) = {
        let sent = sent.lock().unwrap();
        (token_from(&sent[0]), token_from(&sent[1]))
    };
    assert_ne!(t1, t2);

    let identities = MockIdentityProvider::new(&[(TEST_EMAIL, TEST_PASSWORD)]);
    let passwords = identities.passwords_handle();
    let reset = ResetPasswordUseCase {
        identities,
        reset_tokens: tokens.share(),
    };

    let result = reset.execute(reset_input(&t1, "newpass1")).await;
    assert!(
        matches!(result, Err(AuthServiceError::TokenAlreadyUsed)),
        "superseded token must not reset, got {result:?}"
    );
    assert_eq!(passwords.lock().unwrap()[TEST_EMAIL], TEST_PASSWORD);

    reset.execute(reset_input(&t2, "newpass2")).await.unwrap();
    assert_eq!(passwords.lock().unwrap()[TEST_EMAIL], "newpass2");
}

// ── ResetPasswordUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_reset_password_once() {
    let raw = "a".repeat(64);
    let tokens = MockResetTokenRepo::new(vec![reset_token_row(
        &hash_token(&raw),
        Utc::now() + Duration::minutes(30),
    )]);
    let stored = tokens.tokens_handle();
    let identities = MockIdentityProvider::new(&[(TEST_EMAIL, TEST_PASSWORD)]);
    let updates = identities.updates_handle();

    let uc = ResetPasswordUseCase {
        identities,
        reset_tokens: tokens,
    };

    uc.execute(reset_input(&raw, "newpass1")).await.unwrap();
    assert!(stored.lock().unwrap()[0].used_at.is_some());
    assert_eq!(
        updates.lock().unwrap().as_slice(),
        &[(TEST_EMAIL.to_owned(), "newpass1".to_owned())]
    );

    let result = uc.execute(reset_input(&raw, "newpass2")).await;
    assert!(
        matches!(result, Err(AuthServiceError::TokenAlreadyUsed)),
        "expected TokenAlreadyUsed, got {result:?}"
    );
    assert_eq!(updates.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_keep_first_consumption_when_token_used_concurrently() {
    let raw = "b".repeat(64);
    let tokens = MockResetTokenRepo::new(vec![reset_token_row(
        &hash_token(&raw),
        Utc::now() + Duration::minutes(30),
    )])
    .raced();
    let stored = tokens.tokens_handle();

    let uc = ResetPasswordUseCase {
        identities: MockIdentityProvider::new(&[(TEST_EMAIL, TEST_PASSWORD)]),
        reset_tokens: tokens,
    };

    let before = Utc::now();
    uc.execute(reset_input(&raw, "newpass1")).await.unwrap();
    let used_at = stored.lock().unwrap()[0].used_at.unwrap();
    assert!(used_at < before, "conditional update must not restamp a used token");
}

#[tokio::test]
async fn should_reject_unknown_token() {
    let uc = ResetPasswordUseCase {
        identities: MockIdentityProvider::empty(),
        reset_tokens: MockResetTokenRepo::empty(),
    };

    let result = uc.execute(reset_input("0123456789abcdef", "newpass1")).await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_consume_expired_token() {
    let raw = "b".repeat(64);
    let tokens = MockResetTokenRepo::new(vec![reset_token_row(
        &hash_token(&raw),
        Utc::now() - Duration::seconds(1),
    )]);
    let stored = tokens.tokens_handle();
    let identities = MockIdentityProvider::new(&[(TEST_EMAIL, TEST_PASSWORD)]);
    let updates = identities.updates_handle();

    let uc = ResetPasswordUseCase {
        identities,
        reset_tokens: tokens,
    };

    let result = uc.execute(reset_input(&raw, "newpass1")).await;
    assert!(
        matches!(result, Err(AuthServiceError::TokenExpired)),
        "expected TokenExpired, got {result:?}"
    );
    assert!(stored.lock().unwrap()[0].used_at.is_some());
    assert!(updates.lock().unwrap().is_empty());

    let result = uc.execute(reset_input(&raw, "newpass1")).await;
    assert!(matches!(result, Err(AuthServiceError::TokenAlreadyUsed)));
}

#[tokio::test]
async fn should_keep_token_valid_when_update_rejected() {
    let raw = "c".repeat(64);
    let tokens = MockResetTokenRepo::new(vec![reset_token_row(
        &hash_token(&raw),
        Utc::now() + Duration::minutes(30),
    )]);
    let stored = tokens.tokens_handle();
    let mut identities = MockIdentityProvider::new(&[(TEST_EMAIL, TEST_PASSWORD)]);
    identities.reject_update = Some(None);

    let uc = ResetPasswordUseCase {
        identities,
        reset_tokens: tokens,
    };

    let err = uc.execute(reset_input(&raw, "newpass1")).await.unwrap_err();
    assert!(matches!(err, AuthServiceError::UpdateFailed(_)));
    assert_eq!(err.to_string(), "Failed to reset password");
    assert!(stored.lock().unwrap()[0].used_at.is_none());
}

#[tokio::test]
async fn should_pass_update_rejection_message_through() {
    let raw = "d".repeat(64);
    let mut identities = MockIdentityProvider::new(&[(TEST_EMAIL, TEST_PASSWORD)]);
    identities.reject_update = Some(Some("Password too weak".to_owned()));

    let uc = ResetPasswordUseCase {
        identities,
        reset_tokens: MockResetTokenRepo::new(vec![reset_token_row(
            &hash_token(&raw),
            Utc::now() + Duration::minutes(30),
        )]),
    };

    let err = uc.execute(reset_input(&raw, "newpass1")).await.unwrap_err();
    assert_eq!(err.to_string(), "Password too weak");
}
