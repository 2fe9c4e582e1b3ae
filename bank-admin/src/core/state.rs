use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use crate::auth::{Authenticator, SessionStore, hash_password};
use crate::core::Config;
use crate::db::{
    AccountStore, BoxError, BranchStore, ClientStore, CreditCardStore, EmployeeStore, LoanStore,
    MemoryStore, NewUser, PgStore, StatsStore, Store, TransactionStore, UserStore,
};
use shared::models::Role;

/// Server state - shared references to every service
///
/// Cloning is cheap: every field is behind an `Arc`.
///
/// | Field | Description |
/// |-------|-------------|
/// | config | Configuration (immutable) |
/// | auth | Authenticator, owns the session store |
/// | users | Login accounts |
/// | clients | Bank clients |
/// | branches | Branch offices |
/// | employees | Bank staff |
/// | accounts | Client accounts |
/// | transactions | Account movements |
/// | loans | Client loans |
/// | cards | Credit cards |
/// | stats | Dashboard counters |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub auth: Authenticator,
    pub users: Arc<dyn UserStore>,
    pub clients: Arc<dyn ClientStore>,
    pub branches: Arc<dyn BranchStore>,
    pub employees: Arc<dyn EmployeeStore>,
    pub accounts: Arc<dyn AccountStore>,
    pub transactions: Arc<dyn TransactionStore>,
    pub loans: Arc<dyn LoanStore>,
    pub cards: Arc<dyn CreditCardStore>,
    pub stats: Arc<dyn StatsStore>,
}

impl ServerState {
    /// Assemble state over an existing backend
    pub fn with_store<S>(config: Config, store: Arc<S>) -> Self
    where
        S: Store + 'static,
    {
        let sessions = Arc::new(SessionStore::new(config.session()));
        let users: Arc<dyn UserStore> = store.clone();
        let auth = Authenticator::new(users.clone(), sessions, config.auth_delay());
        Self {
            config: Arc::new(config),
            auth,
            users,
            clients: store.clone(),
            branches: store.clone(),
            employees: store.clone(),
            accounts: store.clone(),
            transactions: store.clone(),
            loans: store.clone(),
            cards: store.clone(),
            stats: store,
        }
    }

    /// Connect the configured backend and seed the bootstrap administrator.
    ///
    /// Uses PostgreSQL (running migrations) when `DATABASE_URL` is set,
    /// the in-memory store otherwise.
    pub async fn initialize(config: &Config) -> Result<Self, BoxError> {
        let state = match &config.database_url {
            Some(url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(10)
                    .connect(url)
                    .await?;
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Connected to PostgreSQL, migrations applied");
                Self::with_store(config.clone(), Arc::new(PgStore::new(pool)))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory store (not persisted)");
                Self::with_store(config.clone(), Arc::new(MemoryStore::new()))
            }
        };

        state.seed_bootstrap_admin().await?;
        Ok(state)
    }

    async fn seed_bootstrap_admin(&self) -> Result<(), BoxError> {
        let Some(admin) = &self.config.bootstrap_admin else {
            return Ok(());
        };
        if self.users.count().await? > 0 {
            return Ok(());
        }

        let id = self
            .users
            .create(NewUser {
                username: admin.username.clone(),
                password_hash: hash_password(&admin.password)?,
                role: Role::Administrator.as_str().to_string(),
                employee_id: None,
            })
            .await?;
        tracing::info!(user_id = id, username = %admin.username, "Seeded bootstrap administrator");
        Ok(())
    }

    /// Periodic cleanup of expired sessions (every 5 minutes)
    pub fn start_background_tasks(&self) {
        let sessions = Arc::clone(self.auth.sessions());
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
            loop {
                interval.tick().await;
                let purged = sessions.purge_expired();
                if purged > 0 {
                    tracing::debug!(purged, "Expired sessions purged");
                }
            }
        });
    }
}
