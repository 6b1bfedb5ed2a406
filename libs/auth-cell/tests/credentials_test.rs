use assert_matches::assert_matches;

use auth_cell::{CredentialError, CredentialService};
use shared_models::auth::Role;
use shared_models::error::AppError;
use shared_utils::test_utils::test_state;

#[tokio::test]
async fn test_register_then_verify() {
    let state = test_state().await;
    let service = CredentialService::new(&state.db);

    let account = service
        .register("desk@clinic.test", "s3cret!", Role::Receptionist)
        .await
        .unwrap();

    assert_eq!(account.email, "desk@clinic.test");
    assert_eq!(account.role, Role::Receptionist);
    assert_ne!(account.hashed_password, "s3cret!");

    let verified = service.verify("desk@clinic.test", "s3cret!").await.unwrap();
    assert_matches!(verified, Some(found) if found.id == account.id);
}

#[tokio::test]
async fn test_verify_rejects_wrong_password_and_unknown_email() {
    let state = test_state().await;
    let service = CredentialService::new(&state.db);
    service
        .register("admin@clinic.test", "s3cret!", Role::Admin)
        .await
        .unwrap();

    assert!(service.verify("admin@clinic.test", "wrong").await.unwrap().is_none());
    assert!(service.verify("nobody@clinic.test", "s3cret!").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_refused() {
    let state = test_state().await;
    let service = CredentialService::new(&state.db);
    service
        .register("admin@clinic.test", "first", Role::Admin)
        .await
        .unwrap();

    let err = service
        .register("admin@clinic.test", "second", Role::Receptionist)
        .await
        .unwrap_err();

    assert_matches!(err, CredentialError::DuplicateEmail { ref email } if email == "admin@clinic.test");
    assert_matches!(AppError::from(err), AppError::DuplicateEmail(_));

    // the original account keeps its password
    assert!(service.verify("admin@clinic.test", "first").await.unwrap().is_some());
}

#[tokio::test]
async fn test_change_password_requires_current_password() {
    let state = test_state().await;
    let service = CredentialService::new(&state.db);
    let account = service
        .register("desk@clinic.test", "old-pass", Role::Receptionist)
        .await
        .unwrap();

    let err = service
        .change_password(account.id, "not-the-old-pass", "new-pass")
        .await
        .unwrap_err();
    assert_matches!(err, CredentialError::InvalidCredential);
    assert!(service.verify("desk@clinic.test", "old-pass").await.unwrap().is_some());

    service
        .change_password(account.id, "old-pass", "new-pass")
        .await
        .unwrap();
    assert!(service.verify("desk@clinic.test", "old-pass").await.unwrap().is_none());
    assert!(service.verify("desk@clinic.test", "new-pass").await.unwrap().is_some());
}

#[tokio::test]
async fn test_unknown_user_lookups() {
    let state = test_state().await;
    let service = CredentialService::new(&state.db);
    let missing = uuid::Uuid::new_v4();

    assert_matches!(service.find_by_id(missing).await, Err(CredentialError::NotFound));
    assert_matches!(
        service.change_password(missing, "a", "b").await,
        Err(CredentialError::NotFound)
    );
}
