//! Application state - shared across all handlers.

use std::sync::Arc;

use publisher_core::DomainError;
use publisher_core::domain::UserFields;
use publisher_core::ports::{
    Clock, IdGenerator, Mailer, PasswordService, PostRepository, UserRepository,
};
use publisher_core::services::{
    PostCatalog, UserAccounts, VerificationConfig, VerificationNotifier,
};
use publisher_infra::{
    Argon2PasswordService, ConsoleMailer, DatabaseConnections, InMemoryMailer, InMemoryStore,
    RandomIdGenerator, SystemClock,
};

#[cfg(feature = "postgres")]
use publisher_infra::{PostgresPostRepository, PostgresUserRepository};

use crate::config::{AppConfig, MailBackend, SuperuserBootstrap};

/// Messages retained by `MAIL_BACKEND=memory`; older ones are discarded.
const MEMORY_OUTBOX_LIMIT: usize = 100;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<UserAccounts>,
    pub posts: Arc<PostCatalog>,
    pub db: Option<Arc<DatabaseConnections>>,
}

type Repositories = (
    Option<Arc<DatabaseConnections>>,
    Arc<dyn UserRepository>,
    Arc<dyn PostRepository>,
);

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (db, users, posts) = Self::repositories(config).await;
        let mailer = Self::mailer(&config.mail);

        let state = Self::from_parts(
            users,
            posts,
            mailer,
            Arc::new(Argon2PasswordService::new()),
            config.verification.clone(),
            db,
        );

        if let Some(bootstrap) = &config.superuser {
            if let Err(e) = state.ensure_superuser(bootstrap).await {
                tracing::error!("Failed to bootstrap superuser: {}", e);
            }
        }

        tracing::info!("Application state initialized");
        state
    }

    /// Wire services from already-built collaborators.
    pub fn from_parts(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        mailer: Arc<dyn Mailer>,
        passwords: Arc<dyn PasswordService>,
        verification: VerificationConfig,
        db: Option<Arc<DatabaseConnections>>,
    ) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let ids: Arc<dyn IdGenerator> = Arc::new(RandomIdGenerator);

        let notifier = VerificationNotifier::new(mailer, verification);
        let accounts = UserAccounts::new(
            users.clone(),
            passwords,
            clock.clone(),
            ids.clone(),
            notifier,
        );
        let catalog = PostCatalog::new(posts, users, clock, ids);

        Self {
            accounts: Arc::new(accounts),
            posts: Arc::new(catalog),
            db,
        }
    }

    /// State backed by the in-memory store, for tests and database-less runs.
    pub fn in_memory(store: &InMemoryStore, mailer: Arc<dyn Mailer>) -> Self {
        Self::from_parts(
            Arc::new(store.users()),
            Arc::new(store.posts()),
            mailer,
            Arc::new(Argon2PasswordService::new()),
            VerificationConfig::default(),
            None,
        )
    }

    #[cfg(feature = "postgres")]
    async fn repositories(config: &AppConfig) -> Repositories {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory_repositories();
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => {
                if config.run_migrations {
                    use migration::MigratorTrait;

                    tracing::info!("Running database migrations");
                    if let Err(e) = migration::Migrator::up(connections.main.as_ref(), None).await {
                        tracing::error!("Database migrations failed: {}", e);
                    }
                }

                let conn = Arc::new(connections);
                let users: Arc<dyn UserRepository> =
                    Arc::new(PostgresUserRepository::new(Arc::clone(&conn.main)));
                let posts: Arc<dyn PostRepository> =
                    Arc::new(PostgresPostRepository::new(Arc::clone(&conn.main)));
                (Some(conn), users, posts)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::in_memory_repositories()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(_config: &AppConfig) -> Repositories {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Self::in_memory_repositories()
    }

    fn in_memory_repositories() -> Repositories {
        let store = InMemoryStore::new();
        let users: Arc<dyn UserRepository> = Arc::new(store.users());
        let posts: Arc<dyn PostRepository> = Arc::new(store.posts());
        (None, users, posts)
    }

    fn mailer(backend: &MailBackend) -> Arc<dyn Mailer> {
        match backend {
            MailBackend::Console => Arc::new(ConsoleMailer),
            MailBackend::Memory => Arc::new(InMemoryMailer::bounded(MEMORY_OUTBOX_LIMIT)),
            #[cfg(feature = "smtp")]
            MailBackend::Smtp(settings) => {
                let mut smtp = publisher_infra::SmtpConfig::new(&settings.host, settings.port);
                smtp.username = settings.username.clone();
                smtp.password = settings.password.clone();
                smtp.starttls = settings.starttls;

                match publisher_infra::SmtpMailer::new(&smtp) {
                    Ok(mailer) => Arc::new(mailer),
                    Err(e) => {
                        tracing::error!("Failed to configure SMTP: {}. Using console mail.", e);
                        Arc::new(ConsoleMailer)
                    }
                }
            }
            #[cfg(not(feature = "smtp"))]
            MailBackend::Smtp(_) => {
                tracing::warn!("Built without smtp feature - using console mail");
                Arc::new(ConsoleMailer)
            }
        }
    }

    /// Create the configured superuser unless an account with that email exists.
    async fn ensure_superuser(&self, bootstrap: &SuperuserBootstrap) -> Result<(), DomainError> {
        match self
            .accounts
            .create_superuser(
                Some(bootstrap.email.as_str()),
                Some(bootstrap.password.as_str()),
                UserFields::default(),
            )
            .await
        {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Superuser created");
                Ok(())
            }
            Err(DomainError::Duplicate(_)) => {
                tracing::debug!("Superuser already exists");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
