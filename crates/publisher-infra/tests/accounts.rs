mod common;

use publisher_core::DomainError;
use publisher_core::domain::UserFields;
use publisher_core::ports::{BaseRepository, UserRepository};
use publisher_core::services::VERIFICATION_SUBJECT;

use common::harness;

#[tokio::test]
async fn test_create_user_requires_email() {
    let h = harness();

    for email in [None, Some(""), Some("   ")] {
        let result = h
            .accounts
            .create_user(email, Some("secret"), UserFields::default())
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    assert!(h.store.users().find_by_email("").await.unwrap().is_none());
    assert_eq!(h.mailer.sent_count().await, 0);
}

#[tokio::test]
async fn test_create_user_requires_password() {
    let h = harness();

    for password in [None, Some("")] {
        let result = h
            .accounts
            .create_user(Some("ada@example.com"), password, UserFields::default())
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    let stored = h.store.users().find_by_email("ada@example.com").await.unwrap();
    assert!(stored.is_none());
    assert_eq!(h.mailer.sent_count().await, 0);
}

#[tokio::test]
async fn test_create_user_normalizes_and_hashes() {
    let h = harness();

    let user = h
        .accounts
        .create_user(
            Some(" Ada@Example.COM "),
            Some("secret"),
            UserFields {
                first_name: Some("Ada".to_string()),
                full_name: Some("Ada Lovelace".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(user.email, "Ada@example.com");
    assert_ne!(user.password_hash, "secret");
    assert!(user.password_hash.starts_with("$argon2"));
    assert_eq!(user.first_name, "Ada");
    assert_eq!(user.full_name.as_deref(), Some("Ada Lovelace"));
    assert!(user.is_active);
    assert!(!user.is_staff);
    assert!(!user.is_verified);
    assert!(!user.is_superuser);

    let stored = h.store.users().find_by_id(user.id).await.unwrap();
    assert_eq!(stored, Some(user));
}

#[tokio::test]
async fn test_create_user_sends_verification_mail() {
    let h = harness();

    let user = h
        .accounts
        .create_user(Some("ada@example.com"), Some("secret"), UserFields::default())
        .await
        .unwrap();

    let outbox = h.mailer.outbox().await;
    assert_eq!(outbox.len(), 1);

    let mail = &outbox[0];
    assert_eq!(mail.subject, VERIFICATION_SUBJECT);
    assert_eq!(mail.from, "from@quickpublisher.dev");
    assert_eq!(mail.recipients, vec!["ada@example.com".to_string()]);
    assert!(!mail.fail_silently);
    assert_eq!(
        mail.body,
        format!(
            "Follow this link to verify your account: http://localhost:8000/api/accounts/verify/{}",
            user.verification_uuid
        )
    );
}

#[tokio::test]
async fn test_verified_user_gets_no_mail() {
    let h = harness();

    h.accounts
        .create_user(
            Some("ada@example.com"),
            Some("secret"),
            UserFields {
                is_verified: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(h.mailer.sent_count().await, 0);
}

#[tokio::test]
async fn test_every_unverified_save_sends_again() {
    let h = harness();

    let user = h
        .accounts
        .create_user(Some("ada@example.com"), Some("secret"), UserFields::default())
        .await
        .unwrap();
    let token = user.verification_uuid;

    let user = h.accounts.save(user).await.unwrap();
    h.accounts.save(user.clone()).await.unwrap();

    let outbox = h.mailer.outbox().await;
    assert_eq!(outbox.len(), 3);
    assert!(outbox.iter().all(|m| m.body.ends_with(&token.to_string())));

    let stored = h.accounts.get(user.id).await.unwrap();
    assert_eq!(stored.verification_uuid, token);
    assert!(!stored.is_verified);
}

#[tokio::test]
async fn test_mail_failure_propagates_after_record_is_stored() {
    let h = harness();
    h.mailer.fail_with("relay down").await;

    let result = h
        .accounts
        .create_user(Some("ada@example.com"), Some("secret"), UserFields::default())
        .await;

    assert!(matches!(result, Err(DomainError::Mail(_))));
    let stored = h.store.users().find_by_email("ada@example.com").await.unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let h = harness();

    h.accounts
        .create_user(Some("ada@example.com"), Some("secret"), UserFields::default())
        .await
        .unwrap();
    let result = h
        .accounts
        .create_user(Some("ada@EXAMPLE.com"), Some("other"), UserFields::default())
        .await;

    assert!(matches!(result, Err(DomainError::Duplicate(_))));
}

#[tokio::test]
async fn test_create_superuser_forces_flags() {
    let h = harness();

    let admin = h
        .accounts
        .create_superuser(
            Some("root@example.com"),
            Some("secret"),
            UserFields {
                is_staff: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(admin.is_staff);
    assert!(admin.is_superuser);
    // Superusers start unverified like everyone else.
    assert_eq!(h.mailer.sent_count().await, 1);
}

#[tokio::test]
async fn test_create_superuser_rejects_explicit_false() {
    let h = harness();

    let result = h
        .accounts
        .create_superuser(
            Some("root@example.com"),
            Some("secret"),
            UserFields {
                is_superuser: Some(false),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    let stored = h.store.users().find_by_email("root@example.com").await.unwrap();
    assert!(stored.is_none());
}

#[tokio::test]
async fn test_verify_marks_user_and_stops_mail() {
    let h = harness();

    let user = h
        .accounts
        .create_user(Some("ada@example.com"), Some("secret"), UserFields::default())
        .await
        .unwrap();

    let verified = h.accounts.verify(user.verification_uuid).await.unwrap();
    assert!(verified.is_verified);

    h.accounts.save(verified).await.unwrap();
    assert_eq!(h.mailer.sent_count().await, 1);
}

#[tokio::test]
async fn test_verify_unknown_token_is_not_found() {
    let h = harness();
    let result = h.accounts.verify(uuid::Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_authenticate_by_email() {
    let h = harness();

    let user = h
        .accounts
        .create_user(Some("ada@example.com"), Some("secret"), UserFields::default())
        .await
        .unwrap();

    let found = h
        .accounts
        .authenticate("ada@EXAMPLE.com", "secret")
        .await
        .unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));

    assert!(
        h.accounts
            .authenticate("ada@example.com", "wrong")
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        h.accounts
            .authenticate("nobody@example.com", "secret")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_inactive_user_cannot_authenticate() {
    let h = harness();

    h.accounts
        .create_user(
            Some("ada@example.com"),
            Some("secret"),
            UserFields {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let found = h
        .accounts
        .authenticate("ada@example.com", "secret")
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_save_refreshes_updated_at_only() {
    let h = harness();

    let user = h
        .accounts
        .create_user(Some("ada@example.com"), Some("secret"), UserFields::default())
        .await
        .unwrap();
    let saved = h.accounts.save(user.clone()).await.unwrap();

    assert_eq!(saved.created_at, user.created_at);
    assert!(saved.updated_at > user.updated_at);
}
