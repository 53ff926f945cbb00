use chrono::Utc;

use storefront_auth::error::AuthServiceError;
use storefront_auth::usecase::session::{LoginInput, LoginUseCase};
use storefront_auth_types::token::validate_access_token;

use crate::helpers::{
    MockCustomerDirectory, MockIdentityProvider, MockVerificationRepo, TEST_EMAIL, TEST_JWT_SECRET,
    TEST_PASSWORD, email, password, pending_verification, test_customer,
};

fn login_input(pw: &str) -> LoginInput {
    LoginInput {
        email: email(TEST_EMAIL),
        password: password(pw),
    }
}

fn verified_repo() -> MockVerificationRepo {
    let mut record = pending_verification("123456", Utc::now());
    record.verified = true;
    record.verified_at = Some(Utc::now());
    MockVerificationRepo::new(vec![record])
}

#[tokio::test]
async fn should_issue_session_for_verified_customer() {
    let uc = LoginUseCase {
        identities: MockIdentityProvider::new(&[(TEST_EMAIL, TEST_PASSWORD)]),
        customers: MockCustomerDirectory::new(vec![test_customer()]),
        verifications: verified_repo(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let out = uc.execute(login_input(TEST_PASSWORD)).await.unwrap();
    let info = validate_access_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.customer_id, "cus_1");
    assert_eq!(info.access_token_exp, out.access_token_exp);
}

#[tokio::test]
async fn should_block_login_until_email_verified() {
    let uc = LoginUseCase {
        identities: MockIdentityProvider::new(&[(TEST_EMAIL, TEST_PASSWORD)]),
        customers: MockCustomerDirectory::new(vec![test_customer()]),
        verifications: MockVerificationRepo::new(vec![pending_verification("123456", Utc::now())]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = uc.execute(login_input(TEST_PASSWORD)).await;
    assert!(
        matches!(result, Err(AuthServiceError::EmailNotVerified)),
        "expected EmailNotVerified"
    );
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let uc = LoginUseCase {
        identities: MockIdentityProvider::new(&[(TEST_EMAIL, TEST_PASSWORD)]),
        customers: MockCustomerDirectory::new(vec![test_customer()]),
        verifications: verified_repo(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = uc.execute(login_input("wrongpass")).await;
    assert!(matches!(result, Err(AuthServiceError::LoginFailed)));
}

#[tokio::test]
async fn should_return_not_found_without_customer_record() {
    let uc = LoginUseCase {
        identities: MockIdentityProvider::new(&[(TEST_EMAIL, TEST_PASSWORD)]),
        customers: MockCustomerDirectory::empty(),
        verifications: verified_repo(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = uc.execute(login_input(TEST_PASSWORD)).await;
    assert!(matches!(result, Err(AuthServiceError::CustomerNotFound)));
}
