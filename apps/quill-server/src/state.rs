//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{AccountRepository, PostRepository, TokenService};
use quill_core::{AccountService, PostService};
use quill_infra::{
    Argon2PasswordService, InMemoryAccountRepository, InMemoryPostRepository, JwtConfig,
    JwtTokenService,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub posts: PostService,
    pub tokens: Arc<dyn TokenService>,
    /// Present when running against PostgreSQL.
    #[cfg(feature = "postgres")]
    pub db: Option<sea_orm::DbConn>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// A configured database that cannot be reached is a startup error; only an
    /// absent `DATABASE_URL` selects the in-memory repositories.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            use quill_infra::{PostgresAccountRepository, PostgresPostRepository};
            use quill_migration::MigratorTrait;

            let db = quill_infra::database::connect(db_config).await?;
            if config.auto_migrate {
                quill_migration::Migrator::up(&db, None).await?;
                tracing::info!("Database migrations applied");
            }

            let mut state = Self::from_repositories(
                Arc::new(PostgresAccountRepository::new(db.clone())),
                Arc::new(PostgresPostRepository::new(db.clone())),
                config.jwt.clone(),
            )?;
            state.db = Some(db);

            tracing::info!("Application state initialized (postgres)");
            return Ok(state);
        }

        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        let state = Self::in_memory(config.jwt.clone())?;
        tracing::info!("Application state initialized (in-memory)");
        Ok(state)
    }

    /// State backed by fresh in-memory repositories.
    pub fn in_memory(jwt: JwtConfig) -> anyhow::Result<Self> {
        Self::from_repositories(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            jwt,
        )
    }

    fn from_repositories(
        accounts: Arc<dyn AccountRepository>,
        posts: Arc<dyn PostRepository>,
        jwt: JwtConfig,
    ) -> anyhow::Result<Self> {
        let passwords = Arc::new(Argon2PasswordService::new());

        Ok(Self {
            posts: PostService::new(posts, accounts.clone()),
            accounts: AccountService::new(accounts, passwords)?,
            tokens: Arc::new(JwtTokenService::new(jwt)),
            #[cfg(feature = "postgres")]
            db: None,
        })
    }
}
