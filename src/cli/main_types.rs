use crate::api::models::CustomerRequest;
use crate::core::services::types::SearchType;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "customer-desk")]
#[command(about = "Command line front end for the customers REST service")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Base URL of the customers service
    #[arg(long, global = true, env = "CUSTOMER_DESK_URL")]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Customer(CustomerCommands),
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Commands served by the customer store
#[derive(Subcommand, Debug)]
pub enum CustomerCommands {
    /// List all customers
    List,
    /// Show a single customer
    Show {
        /// Customer ID
        id: String,
    },
    /// Find a customer by id, email or name
    Search {
        /// Field to search by: id, email or name
        by: SearchType,
        /// Value to look up
        value: String,
    },
    /// Create a customer
    Create(CustomerFields),
    /// Replace an existing customer
    Update {
        /// Customer ID
        id: String,
        #[command(flatten)]
        fields: CustomerFields,
    },
    /// Delete a customer
    Delete {
        /// Customer ID
        id: String,
    },
    /// Open a view by path, e.g. /customers/42/edit
    Open {
        path: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CustomerFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub annual_spend: Option<f64>,
    /// Date in YYYY-MM-DD format
    #[arg(long)]
    pub last_purchase_date: Option<NaiveDate>,
}

impl From<CustomerFields> for CustomerRequest {
    fn from(fields: CustomerFields) -> Self {
        Self {
            name: fields.name,
            email: fields.email,
            annual_spend: fields.annual_spend,
            last_purchase_date: fields.last_purchase_date,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set values on the profile selected with --profile, taking the URL from --url
    Set {
        /// Request timeout in seconds (0 disables it)
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["customer-desk", "search", "EMAIL", "ada@example.com"])
            .unwrap();
        match cli.command {
            Commands::Customer(CustomerCommands::Search { by, value }) => {
                assert_eq!(by, SearchType::Email);
                assert_eq!(value, "ada@example.com");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_customer_commands_stay_top_level() {
        let cli = Cli::try_parse_from(["customer-desk", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::Customer(CustomerCommands::List)));

        let cli = Cli::try_parse_from(["customer-desk", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Show
            }
        ));
    }

    #[test]
    fn test_parse_search_rejects_unknown_type() {
        assert!(Cli::try_parse_from(["customer-desk", "search", "phone", "1"]).is_err());
    }

    #[test]
    fn test_parse_create_fields() {
        let cli = Cli::try_parse_from([
            "customer-desk",
            "create",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--annual-spend",
            "1500.5",
            "--last-purchase-date",
            "2024-03-01",
        ])
        .unwrap();

        let Commands::Customer(CustomerCommands::Create(fields)) = cli.command else {
            panic!("expected create");
        };
        let request = CustomerRequest::from(fields);
        assert_eq!(request.name, "Ada");
        assert_eq!(request.annual_spend, Some(1500.5));
        assert_eq!(request.last_purchase_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_parse_create_rejects_bad_date() {
        let result = Cli::try_parse_from([
            "customer-desk",
            "create",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--last-purchase-date",
            "03/01/2024",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::try_parse_from([
            "customer-desk",
            "config",
            "set",
            "--profile",
            "staging",
            "--url",
            "https://staging.example.com",
        ])
        .unwrap();

        assert_eq!(cli.profile.as_deref(), Some("staging"));
        assert_eq!(cli.url.as_deref(), Some("https://staging.example.com"));
        match cli.command {
            Commands::Config {
                command: ConfigCommands::Set { timeout },
            } => assert_eq!(timeout, None),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
