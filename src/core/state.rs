// Application state (AppState)

use crate::accounts::manager::AccountManager;
use crate::core::config::Config;
use crate::stores::user_store::UserStore;
use crate::upstream::client::UpstreamClient;
use std::sync::Arc;

/// Shared application state handed to request handlers.
///
/// The store handle is opened once at startup and injected here; handlers
/// never open the artifact on their own.
#[derive(Clone)]
pub struct AppState {
    /// File-backed user store
    pub store: Arc<UserStore>,

    /// Registration and login over the store
    pub accounts: Arc<AccountManager>,

    /// Client for the proxied third-party services
    pub upstream: Arc<UpstreamClient>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, store: UserStore, upstream: UpstreamClient) -> Self {
        let store = Arc::new(store);

        Self {
            accounts: Arc::new(AccountManager::new(Arc::clone(&store))),
            store,
            upstream: Arc::new(upstream),
            config: Arc::new(config),
        }
    }
}
