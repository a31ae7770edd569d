//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostsService;
use blog_core::ports::PostRepository;
use blog_infra::{DatabaseConnections, InMemoryPostRepository};

use crate::config::AppConfig;

/// Which backend the posts repository talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Postgres,
    Memory,
}

impl Storage {
    pub fn as_str(self) -> &'static str {
        match self {
            Storage::Postgres => "postgres",
            Storage::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostsService,
    pub storage: Storage,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match connect(db_config, config.run_migrations).await {
                    Ok(state) => return state,
                    Err(e) => {
                        tracing::error!(
                            "Failed to set up database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = config;
            tracing::info!("Running without postgres feature - using in-memory repository");
        }

        Self::in_memory()
    }

    /// State backed by a fresh in-memory repository.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()), Storage::Memory)
    }

    /// State over an already built repository, without a database pool.
    pub fn with_repository(repo: Arc<dyn PostRepository>, storage: Storage) -> Self {
        Self {
            posts: PostsService::new(repo),
            storage,
            db: None,
        }
    }
}

#[cfg(feature = "postgres")]
async fn connect(
    db_config: &blog_infra::DatabaseConfig,
    run_migrations: bool,
) -> Result<AppState, migration::DbErr> {
    use blog_infra::PostgresPostRepository;
    use migration::{Migrator, MigratorTrait};

    let connections = DatabaseConnections::init(db_config).await?;

    if run_migrations {
        Migrator::up(&connections.main, None).await?;
        tracing::info!("Database migrations applied");
    }

    let repo: Arc<dyn PostRepository> =
        Arc::new(PostgresPostRepository::new(connections.main.clone()));

    tracing::info!("Application state initialized (postgres)");

    Ok(AppState {
        posts: PostsService::new(repo),
        storage: Storage::Postgres,
        db: Some(Arc::new(connections)),
    })
}
