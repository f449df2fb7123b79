mod common;

use std::sync::Arc;

use catalog_service::domain::auth::errors::AuthError;
use catalog_service::domain::auth::models::Role;
use catalog_service::domain::auth::ports::CredentialStore;
use chrono::Duration;
use chrono::Utc;
use common::auth_service;
use common::seed_user;
use common::test_authenticator;
use common::InMemoryCredentialStore;
use common::RecordingNotifier;

#[tokio::test]
async fn test_full_reset_lifecycle_single_use() {
    let authenticator = test_authenticator();
    let store = Arc::new(InMemoryCredentialStore::new());
    seed_user(
        &store,
        &authenticator,
        "alice",
        "alice@example.com",
        "secret",
        &[Role::Customer],
    );
    let notifier = Arc::new(RecordingNotifier::new());
    let service = auth_service(
        Arc::clone(&store),
        Arc::clone(&notifier),
        authenticator.clone(),
    );

    let now = Utc::now();
    service
        .request_reset("alice@example.com", now)
        .await
        .unwrap();

    assert_eq!(notifier.sent_count(), 1);
    let token = notifier.last_token().unwrap();
    assert_eq!(token.len(), 32);
    assert!(service.peek_valid(&token, now).await.unwrap());

    // Consume within the window
    service
        .reset_password(&token, "newpass", now + Duration::minutes(10))
        .await
        .unwrap();

    // The new password works, the old one does not
    let session = service
        .login("alice", "newpass", now + Duration::minutes(10))
        .await
        .unwrap();
    assert_eq!(session.username, "alice");
    assert!(matches!(
        service
            .login("alice", "secret", now + Duration::minutes(10))
            .await,
        Err(AuthError::BadCredentials)
    ));

    // Second consume of the same token fails and changes nothing
    let second = service
        .reset_password(&token, "again", now + Duration::minutes(11))
        .await;
    assert!(matches!(second, Err(AuthError::ResetTokenInvalid)));
    assert!(!service
        .peek_valid(&token, now + Duration::minutes(11))
        .await
        .unwrap());
    assert!(service
        .login("alice", "newpass", now + Duration::minutes(11))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_unknown_email_reports_success_without_trace() {
    let authenticator = test_authenticator();
    let store = Arc::new(InMemoryCredentialStore::new());
    seed_user(
        &store,
        &authenticator,
        "alice",
        "alice@example.com",
        "secret",
        &[Role::Customer],
    );
    let notifier = Arc::new(RecordingNotifier::new());
    let service = auth_service(Arc::clone(&store), Arc::clone(&notifier), authenticator);

    let result = service
        .request_reset("stranger@example.com", Utc::now())
        .await;

    assert!(result.is_ok());
    assert_eq!(notifier.sent_count(), 0);
    assert_eq!(store.token_count(), 0);
}

#[tokio::test]
async fn test_expired_token_does_not_change_password() {
    let authenticator = test_authenticator();
    let store = Arc::new(InMemoryCredentialStore::new());
    seed_user(
        &store,
        &authenticator,
        "alice",
        "alice@example.com",
        "secret",
        &[Role::Customer],
    );
    let notifier = Arc::new(RecordingNotifier::new());
    let service = auth_service(
        Arc::clone(&store),
        Arc::clone(&notifier),
        authenticator.clone(),
    );

    let now = Utc::now();
    service
        .request_reset("alice@example.com", now)
        .await
        .unwrap();
    let token = notifier.last_token().unwrap();

    // The 30-minute window has closed exactly
    let result = service
        .reset_password(&token, "newpass", now + Duration::minutes(30))
        .await;
    assert!(matches!(result, Err(AuthError::ResetTokenInvalid)));

    // Old password still in force
    assert!(service
        .login("alice", "secret", now + Duration::minutes(30))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_reissue_invalidates_prior_token() {
    let authenticator = test_authenticator();
    let store = Arc::new(InMemoryCredentialStore::new());
    let principal = seed_user(
        &store,
        &authenticator,
        "alice",
        "alice@example.com",
        "secret",
        &[Role::Customer],
    );
    let notifier = Arc::new(RecordingNotifier::new());
    let service = auth_service(Arc::clone(&store), Arc::clone(&notifier), authenticator);

    let now = Utc::now();
    service
        .request_reset("alice@example.com", now)
        .await
        .unwrap();
    let first = notifier.last_token().unwrap();

    service
        .request_reset("alice@example.com", now + Duration::minutes(1))
        .await
        .unwrap();
    let second = notifier.last_token().unwrap();

    assert_ne!(first, second);
    // Exactly one token on record, and it is the second one
    assert_eq!(store.token_count(), 1);
    let live = store
        .find_live_token_for_user(&principal.id, now + Duration::minutes(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(live.token, second);

    // The first token, unused and unexpired, no longer consumes
    let result = service
        .reset_password(&first, "newpass", now + Duration::minutes(2))
        .await;
    assert!(matches!(result, Err(AuthError::ResetTokenInvalid)));

    // The second one does
    service
        .reset_password(&second, "newpass", now + Duration::minutes(2))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_concurrent_consume_has_at_most_one_winner() {
    let authenticator = test_authenticator();
    let store = Arc::new(InMemoryCredentialStore::new());
    seed_user(
        &store,
        &authenticator,
        "alice",
        "alice@example.com",
        "secret",
        &[Role::Customer],
    );
    let notifier = Arc::new(RecordingNotifier::new());
    let service = Arc::new(auth_service(
        Arc::clone(&store),
        Arc::clone(&notifier),
        authenticator,
    ));

    let now = Utc::now();
    service
        .request_reset("alice@example.com", now)
        .await
        .unwrap();
    let token = notifier.last_token().unwrap();

    let mut handles = Vec::new();
    for i in 0..4 {
        let service = Arc::clone(&service);
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            service
                .reset_password(&token, &format!("newpass{i}"), now + Duration::minutes(5))
                .await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => successes += 1,
            Err(AuthError::ResetTokenInvalid) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(successes, 1);
}
