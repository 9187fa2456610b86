use crate::api::client::{CustomerClient, DEFAULT_BASE_URL};
use crate::cli::command_handlers::{ConfigHandler, CustomerHandler};
use crate::cli::main_types::Commands;
use crate::core::services::config_service::ConfigService;
use crate::core::store::CustomerStore;
use crate::display::TableDisplay;
use crate::error::{AppError, ConfigError};
use crate::storage::config::Config;
use crate::utils::logging::print_verbose;
use crate::utils::validation::validate_url;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    /// Profile named with --profile, if any
    requested_profile: Option<String>,
    /// --url or CUSTOMER_DESK_URL
    url_override: Option<String>,
    verbose: bool,
}

impl Dispatcher {
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        requested_profile: Option<String>,
        url_override: Option<String>,
        verbose: bool,
    ) -> Self {
        Self {
            config,
            config_path,
            requested_profile,
            url_override,
            verbose,
        }
    }

    fn log_verbose(&self, msg: &str) {
        print_verbose(self.verbose, msg);
    }

    pub fn profile_name(&self) -> String {
        self.config
            .resolve_profile_name(self.requested_profile.as_deref())
    }

    /// Base URL and timeout for customer commands: --url / env first, then the
    /// selected profile, then the built-in default.
    pub fn resolve_connection(&self) -> Result<(String, Option<Duration>), AppError> {
        let profile_name = self.profile_name();
        let profile = self.config.get_profile(&profile_name);
        let timeout = profile.and_then(|p| p.timeout());

        if let Some(url) = self.url_override.as_deref() {
            validate_url(url)?;
            return Ok((url.to_string(), timeout));
        }

        match profile {
            Some(profile) => Ok((profile.url.clone(), timeout)),
            None if self.requested_profile.is_some() => {
                Err(AppError::Config(ConfigError::ProfileNotFound { name: profile_name }))
            }
            None => {
                log::warn!(
                    "No profile '{}' configured, using {}",
                    profile_name,
                    DEFAULT_BASE_URL
                );
                Ok((DEFAULT_BASE_URL.to_string(), None))
            }
        }
    }

    pub fn build_store(&self) -> Result<Arc<CustomerStore<CustomerClient>>, AppError> {
        let (base_url, timeout) = self.resolve_connection()?;
        self.log_verbose(&format!("Using customer service at {}", base_url));
        let client = CustomerClient::with_timeout(base_url, timeout)?;
        Ok(Arc::new(CustomerStore::new(client)))
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Config { command } => {
                let mut config_service = ConfigService::new(self.config.clone());
                ConfigHandler::new().handle(
                    command,
                    &mut config_service,
                    &self.profile_name(),
                    self.url_override.as_deref(),
                    self.config_path.clone(),
                    self.verbose,
                )
            }
            Commands::Customer(command) => {
                let store = self.build_store()?;
                let watcher = self.verbose.then(|| spawn_state_logger(&store));

                let result = CustomerHandler::new(TableDisplay::new())
                    .handle(command, &store, self.verbose)
                    .await;

                if let Some(watcher) = watcher {
                    watcher.abort();
                }
                result
            }
        }
    }
}

/// Log every store transition at debug level
fn spawn_state_logger(store: &Arc<CustomerStore<CustomerClient>>) -> JoinHandle<()> {
    let mut receiver = store.subscribe();
    tokio::spawn(async move {
        while receiver.changed().await.is_ok() {
            let state = receiver.borrow_and_update().clone();
            log::debug!(
                "store: loading={} customers={} current={:?} error={:?} validation_errors={}",
                state.loading,
                state.customers.len(),
                state.current_customer.as_ref().map(|c| c.id.as_str()),
                state.error,
                state.validation_errors.len()
            );
        }
    })
}
