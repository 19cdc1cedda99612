//! User account store: creation rules, persistence and the save hook.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{User, UserFields, mask_email, normalize_email};
use crate::error::{DomainError, RepoError};
use crate::ports::{Clock, IdGenerator, PasswordService, UserRepository};

use super::notifier::VerificationNotifier;

/// Account operations with explicitly injected collaborators.
pub struct UserAccounts {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    notifier: VerificationNotifier,
}

impl UserAccounts {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        notifier: VerificationNotifier,
    ) -> Self {
        Self {
            users,
            passwords,
            clock,
            ids,
            notifier,
        }
    }

    /// Create and save a user with the given email and password.
    ///
    /// The email is normalized and the password hashed before anything is
    /// stored. Saving fires the verification notifier like any other save.
    pub async fn create_user(
        &self,
        email: Option<&str>,
        password: Option<&str>,
        extra: UserFields,
    ) -> Result<User, DomainError> {
        let email = match email.map(str::trim) {
            Some(e) if !e.is_empty() => e,
            _ => return Err(DomainError::validation("Email address must be provided")),
        };
        let password = match password {
            Some(p) if !p.is_empty() => p,
            _ => return Err(DomainError::validation("Password must be provided")),
        };

        let email = normalize_email(email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Duplicate(format!(
                "A user with email {} already exists",
                mask_email(&email)
            )));
        }

        let password_hash = self.passwords.hash(password)?;
        let mut user = User::new(
            self.ids.generate(),
            email,
            password_hash,
            self.ids.generate(),
            self.clock.now(),
        );
        user.apply(extra);

        let user = self.save(user).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Create a user with staff and superuser rights.
    ///
    /// Passing `is_superuser = Some(false)` is rejected.
    pub async fn create_superuser(
        &self,
        email: Option<&str>,
        password: Option<&str>,
        mut extra: UserFields,
    ) -> Result<User, DomainError> {
        if extra.is_superuser == Some(false) {
            return Err(DomainError::validation(
                "Superuser must have is_superuser=true",
            ));
        }
        extra.is_staff = Some(true);
        extra.is_superuser = Some(true);

        self.create_user(email, password, extra).await
    }

    /// Persist a user, then run the verification hook on the stored record.
    ///
    /// A failed verification mail is returned as an error even though the
    /// record itself has been written.
    pub async fn save(&self, mut user: User) -> Result<User, DomainError> {
        user.updated_at = self.clock.now();
        let saved = self.users.save(user).await?;
        self.notifier.user_saved(&saved).await?;
        Ok(saved)
    }

    pub async fn get(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "User",
                id,
            })
    }

    /// Mark the account that owns `token` as verified.
    pub async fn verify(&self, token: Uuid) -> Result<User, DomainError> {
        let mut user = self
            .users
            .find_by_verification_uuid(token)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Verification",
                id: token,
            })?;

        if user.is_verified {
            return Ok(user);
        }

        user.is_verified = true;
        let user = self.save(user).await?;
        tracing::info!(user_id = %user.id, "User verified");
        Ok(user)
    }

    /// Check an email/password pair. Inactive accounts never authenticate.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let email = normalize_email(email);
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Ok(None);
        };

        if !user.is_active || !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(email = %mask_email(&email), "Authentication rejected");
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Delete a user together with their posts.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        match self.users.delete(id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(DomainError::NotFound {
                entity_type: "User",
                id,
            }),
            Err(e) => Err(e.into()),
        }
    }
}
