use crate::api::models::CustomerRequest;
use crate::cli::main_types::{ConfigCommands, CustomerCommands};
use crate::cli::routes::Route;
use crate::core::services::config_service::ConfigService;
use crate::core::services::traits::CustomerApi;
use crate::core::store::CustomerStore;
use crate::display::TableDisplay;
use crate::error::{AppError, CliError};
use crate::utils::logging::print_verbose;
use crate::utils::validation::validate_required;
use std::path::PathBuf;

/// Runs customer commands through the store and renders what it ends up holding.
pub struct CustomerHandler {
    display: TableDisplay,
}

impl CustomerHandler {
    pub fn new(display: TableDisplay) -> Self {
        Self { display }
    }

    pub async fn handle<A: CustomerApi>(
        &self,
        command: CustomerCommands,
        store: &CustomerStore<A>,
        verbose: bool,
    ) -> Result<(), AppError> {
        let output = self.run(command, store, verbose).await?;
        println!("{}", output);
        Ok(())
    }

    /// Execute a customer command and return the text to print
    pub async fn run<A: CustomerApi>(
        &self,
        command: CustomerCommands,
        store: &CustomerStore<A>,
        verbose: bool,
    ) -> Result<String, AppError> {
        match command {
            CustomerCommands::List => {
                print_verbose(verbose, "Attempting list command");
                self.list(store).await
            }
            CustomerCommands::Show { id } => {
                print_verbose(verbose, &format!("Attempting show command - ID: {}", id));
                self.show(store, &id).await
            }
            CustomerCommands::Search { by, value } => {
                print_verbose(
                    verbose,
                    &format!("Attempting search command - by {}: {}", by, value),
                );
                validate_required(by.as_str(), &value)?;
                store.search_customers(by, &value).await;
                let state = store.snapshot();
                if let Some(message) = state.error {
                    return Err(action_failed("Search", message));
                }
                Ok(self.display.render_customer_list(&state.customers))
            }
            CustomerCommands::Create(fields) => {
                print_verbose(verbose, "Attempting create command");
                let request = CustomerRequest::from(fields);
                match store.create_customer(&request).await {
                    Ok(customer) => Ok(format!(
                        "✅ Created customer {}\n{}",
                        customer.id,
                        self.display.render_customer_detail(&customer)
                    )),
                    Err(err) => {
                        self.report_validation_errors(store);
                        Err(AppError::Api(err))
                    }
                }
            }
            CustomerCommands::Update { id, fields } => {
                print_verbose(verbose, &format!("Attempting update command - ID: {}", id));
                let request = CustomerRequest::from(fields);
                match store.update_customer(&id, &request).await {
                    Ok(customer) => Ok(format!(
                        "✅ Updated customer {}\n{}",
                        customer.id,
                        self.display.render_customer_detail(&customer)
                    )),
                    Err(err) => {
                        self.report_validation_errors(store);
                        Err(AppError::Api(err))
                    }
                }
            }
            CustomerCommands::Delete { id } => {
                print_verbose(verbose, &format!("Attempting delete command - ID: {}", id));
                if store.delete_customer(&id).await {
                    Ok(format!("✅ Deleted customer {}", id))
                } else {
                    let message = store.snapshot().error.unwrap_or_default();
                    Err(action_failed("Delete", message))
                }
            }
            CustomerCommands::Open { path } => {
                let route = Route::parse(&path);
                print_verbose(verbose, &format!("Opening route {}", route));
                self.open(store, route).await
            }
        }
    }

    async fn list<A: CustomerApi>(&self, store: &CustomerStore<A>) -> Result<String, AppError> {
        store.fetch_customers().await;
        let state = store.snapshot();
        if let Some(message) = state.error {
            return Err(action_failed("List", message));
        }
        Ok(self.display.render_customer_list(&state.customers))
    }

    async fn show<A: CustomerApi>(
        &self,
        store: &CustomerStore<A>,
        id: &str,
    ) -> Result<String, AppError> {
        store.fetch_customer_by_id(id).await;
        let state = store.snapshot();
        match (state.error, state.current_customer) {
            (Some(message), _) => Err(action_failed("Show", message)),
            (None, Some(customer)) => Ok(self.display.render_customer_detail(&customer)),
            (None, None) => Err(action_failed("Show", format!("Customer {} not loaded", id))),
        }
    }

    async fn open<A: CustomerApi>(
        &self,
        store: &CustomerStore<A>,
        route: Route,
    ) -> Result<String, AppError> {
        match route {
            Route::Home => self.list(store).await,
            Route::CustomerDetails { id } => self.show(store, &id).await,
            Route::CustomerEdit { id } => {
                store.fetch_customer_by_id(&id).await;
                let state = store.snapshot();
                if let Some(message) = state.error {
                    return Err(action_failed("Edit", message));
                }
                let customer = state.current_customer.ok_or_else(|| {
                    action_failed("Edit", format!("Customer {} not loaded", id))
                })?;
                Ok(format!(
                    "Editing customer {} (submit with 'customer-desk update {} ...')\n{}",
                    customer.id,
                    customer.id,
                    self.display
                        .render_request_fields(&CustomerRequest::from(&customer))
                ))
            }
            Route::CustomerCreate => {
                let blank = CustomerRequest {
                    name: String::new(),
                    email: String::new(),
                    annual_spend: None,
                    last_purchase_date: None,
                };
                Ok(format!(
                    "New customer (submit with 'customer-desk create ...')\n{}",
                    self.display.render_request_fields(&blank)
                ))
            }
            Route::NotFound { path } => Err(AppError::Cli(CliError::RouteNotFound { path })),
        }
    }

    fn report_validation_errors<A: CustomerApi>(&self, store: &CustomerStore<A>) {
        let errors = store.snapshot().validation_errors;
        if !errors.is_empty() {
            eprintln!("{}", self.display.render_validation_errors(&errors));
        }
    }
}

fn action_failed(action: &str, message: String) -> AppError {
    AppError::Cli(CliError::ActionFailed {
        action: action.to_string(),
        message,
    })
}

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        command: ConfigCommands,
        config_service: &mut ConfigService,
        profile: &str,
        url: Option<&str>,
        config_path: Option<PathBuf>,
        verbose: bool,
    ) -> Result<(), AppError> {
        let output = self.run(command, config_service, profile, url, config_path, verbose)?;
        println!("{}", output);
        Ok(())
    }

    pub fn run(
        &self,
        command: ConfigCommands,
        config_service: &mut ConfigService,
        profile: &str,
        url: Option<&str>,
        config_path: Option<PathBuf>,
        verbose: bool,
    ) -> Result<String, AppError> {
        match command {
            ConfigCommands::Show => {
                print_verbose(verbose, "Attempting config show command using ConfigService");

                let mut lines = vec![
                    "Current Configuration:".to_string(),
                    "=====================".to_string(),
                ];
                match config_service.get_default_profile() {
                    Some(default_profile) => {
                        lines.push(format!("Default Profile: {}", default_profile))
                    }
                    None => lines.push("Default Profile: (not set)".to_string()),
                }

                lines.push(String::new());
                lines.push("Profiles:".to_string());
                let profiles = config_service.list_profiles();
                if profiles.is_empty() {
                    lines.push("  No profiles configured".to_string());
                }
                for (name, profile) in profiles {
                    lines.push(format!("  [{}]", name));
                    lines.push(format!("    URL: {}", profile.url));
                    if let Some(timeout) = profile.timeout_seconds {
                        lines.push(format!("    Timeout: {} seconds", timeout));
                    }
                }

                Ok(lines.join("\n"))
            }
            ConfigCommands::Set { timeout } => {
                print_verbose(
                    verbose,
                    &format!(
                        "Attempting config set - profile: {}, url: {:?}, timeout: {:?}",
                        profile, url, timeout
                    ),
                );

                if url.is_none() && timeout.is_none() {
                    return Err(AppError::Cli(CliError::InvalidArguments(
                        "Nothing to set. Use --url and/or --timeout".to_string(),
                    )));
                }

                if let Some(url) = url {
                    config_service.set_profile_field(profile, "url", url)?;
                }
                if let Some(timeout) = timeout {
                    config_service.set_profile_field(profile, "timeout", &timeout.to_string())?;
                }
                config_service.save_config(config_path)?;

                Ok(format!("✅ Updated profile '{}'", profile))
            }
        }
    }
}
