use storefront_auth::error::AuthServiceError;
use storefront_auth::usecase::change_password::{ChangePasswordInput, ChangePasswordUseCase};
use storefront_domain::id::CustomerId;

use crate::helpers::{
    MockCustomerDirectory, MockIdentityProvider, TEST_EMAIL, TEST_PASSWORD, password,
    test_customer,
};

fn input(current: &str, new: &str) -> ChangePasswordInput {
    ChangePasswordInput {
        customer_id: CustomerId("cus_1".to_owned()),
        current_password: password(current),
        new_password: password(new),
    }
}

#[tokio::test]
async fn should_change_password_after_reauthentication() {
    let identities = MockIdentityProvider::new(&[(TEST_EMAIL, TEST_PASSWORD)]);
    let passwords = identities.passwords_handle();

    let uc = ChangePasswordUseCase {
        identities,
        customers: MockCustomerDirectory::new(vec![test_customer()]),
    };

    uc.execute(input(TEST_PASSWORD, "newpass1")).await.unwrap();
    assert_eq!(passwords.lock().unwrap()[TEST_EMAIL], "newpass1");
}

#[tokio::test]
async fn should_reject_incorrect_current_password() {
    let identities = MockIdentityProvider::new(&[(TEST_EMAIL, TEST_PASSWORD)]);
    let updates = identities.updates_handle();

    let uc = ChangePasswordUseCase {
        identities,
        customers: MockCustomerDirectory::new(vec![test_customer()]),
    };

    let err = uc.execute(input("wrongpass", "newpass1")).await.unwrap_err();
    assert!(matches!(err, AuthServiceError::InvalidCredentials));
    assert_eq!(err.to_string(), "Current password is incorrect");
    assert!(updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_require_customer_email() {
    let mut customer = test_customer();
    customer.email = None;

    let uc = ChangePasswordUseCase {
        identities: MockIdentityProvider::new(&[(TEST_EMAIL, TEST_PASSWORD)]),
        customers: MockCustomerDirectory::new(vec![customer]),
    };

    let result = uc.execute(input(TEST_PASSWORD, "newpass1")).await;
    assert!(
        matches!(result, Err(AuthServiceError::CustomerEmailNotFound)),
        "expected CustomerEmailNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_treat_missing_customer_as_missing_email() {
    let uc = ChangePasswordUseCase {
        identities: MockIdentityProvider::new(&[(TEST_EMAIL, TEST_PASSWORD)]),
        customers: MockCustomerDirectory::empty(),
    };

    let result = uc.execute(input(TEST_PASSWORD, "newpass1")).await;
    assert!(matches!(result, Err(AuthServiceError::CustomerEmailNotFound)));
}

#[tokio::test]
async fn should_default_update_rejection_message() {
    let mut identities = MockIdentityProvider::new(&[(TEST_EMAIL, TEST_PASSWORD)]);
    identities.reject_update = Some(None);

    let uc = ChangePasswordUseCase {
        identities,
        customers: MockCustomerDirectory::new(vec![test_customer()]),
    };

    let err = uc.execute(input(TEST_PASSWORD, "newpass1")).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to change password");
}
