use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use fix_auth::SecretHasher;
use fix_config::FixConfig;
use fix_db::{DbIdentityProvider, FixStore};
use fix_directory::{Accounts, DirectoryOptions, IncidentDirectory, UserDirectory};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: FixConfig,
    pub store: Arc<FixStore>,
    pub users: UserDirectory,
    pub incidents: IncidentDirectory,
    pub accounts: Accounts,
}

impl AppContext {
    /// Open the store named by `config.store.path` and wire the services over it.
    pub async fn init(config: FixConfig) -> anyhow::Result<Self> {
        if !config.store.is_in_memory() {
            if let Some(parent) = Path::new(&config.store.path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create store directory {}", parent.display())
                    })?;
                }
            }
        }

        let store = Arc::new(
            FixStore::open_local(&config.store.path)
                .await
                .with_context(|| format!("failed to open store at {}", config.store.path))?,
        );
        let hasher = SecretHasher::from_config(&config.auth)?;

        let users = UserDirectory::new(store.clone());
        let incidents = IncidentDirectory::new(
            store.clone(),
            users.clone(),
            DirectoryOptions::from(&config.workflow),
        );
        let accounts = Accounts::new(
            Arc::new(DbIdentityProvider::new(store.clone(), hasher)),
            users.clone(),
            &config.auth,
        );

        tracing::debug!(path = %config.store.path, "store opened");
        Ok(Self {
            config,
            store,
            users,
            incidents,
            accounts,
        })
    }
}
