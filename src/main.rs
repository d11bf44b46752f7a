use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::{error, info};

use tricol_client::AppContext;
use tricol_client::auth::guard::{RouteAccess, check_route};
use tricol_client::auth::keyring_storage::KeyringStorage;
use tricol_client::auth::session::Navigator;
use tricol_client::auth::token_introspection;
use tricol_client::config::Environment;
use tricol_client::error::{AppError, AppResult, SerializableError};
use tricol_client::models::{LoginCredentials, RegisterData};

/// Admin console for the Tricol procurement backend
#[derive(Parser, Debug)]
#[command(name = "tricol-admin")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the backend API
    #[arg(long)]
    api_url: Option<String>,

    /// Use the production endpoint layout
    #[arg(long)]
    production: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and keep the session in the OS credential store
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Create a new account
    Register {
        /// Username for the new account
        #[arg(long)]
        username: String,

        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,

        /// Display name
        #[arg(long)]
        full_name: Option<String>,
    },

    /// Show the signed-in user
    Whoami,

    /// Force an access-token refresh
    Refresh,

    /// End the session and clear stored tokens
    Logout,

    /// Product catalogue
    #[command(subcommand)]
    Produits(CrudCommands),

    /// Supplier directory
    #[command(subcommand)]
    Fournisseurs(CrudCommands),
}

#[derive(Subcommand, Debug)]
enum CrudCommands {
    /// List the whole collection
    List,

    /// Show one record
    Get {
        /// Record id
        id: i64,
    },

    /// Delete one record
    Delete {
        /// Record id
        id: i64,
    },
}

/// Navigator for a headless shell: redirects become log lines, the
/// guard result carries the actual denial.
#[derive(Debug, Default)]
struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: &str) {
        info!("Session redirect requested: {}", route);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Set RUST_LOG=debug for request-level detail
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(Some(env_logger::fmt::TimestampPrecision::Millis))
        .format_module_path(true)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let config = resolve_environment(&cli);
    info!("Starting tricol-admin against {}", config.api_url);

    let context = AppContext::new(
        config,
        Arc::new(KeyringStorage::new()),
        Arc::new(ConsoleNavigator),
    );
    context.bootstrap().await;

    match run(cli.command, &context).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {}", e);
            let details = SerializableError::from(e);
            match serde_json::to_string_pretty(&details) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", details.message),
            }
            ExitCode::FAILURE
        }
    }
}

fn resolve_environment(cli: &Cli) -> Environment {
    let mut config = if cli.production {
        Environment::production()
    } else {
        Environment::from_env()
    };
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }
    config
}

async fn run(command: Commands, context: &AppContext) -> AppResult<()> {
    match command {
        Commands::Login { email, password } => {
            let user = context
                .session
                .login(&LoginCredentials { email, password })
                .await?;
            info!("Signed in as {}", user.username);
            print_json(&user)
        }
        Commands::Register {
            username,
            email,
            password,
            full_name,
        } => {
            let response = context
                .session
                .register(&RegisterData {
                    username,
                    email,
                    password,
                    full_name,
                })
                .await?;
            print_json(&response)
        }
        Commands::Whoami => {
            ensure_route(context, "/dashboard")?;
            let Some(user) = context.session.current_user() else {
                return Err(AppError::AuthError("No active session".to_string()));
            };
            print_json(&user)?;
            if let Some(token) = context.tokens.access_token() {
                match token_introspection::seconds_until_expiry(&token) {
                    Some(seconds) => info!("Access token expires in {}s", seconds),
                    None => info!("Access token is past its expiry; the next call refreshes it"),
                }
            }
            Ok(())
        }
        Commands::Refresh => {
            context.session.refresh_token().await?;
            info!("Access token refreshed");
            Ok(())
        }
        Commands::Logout => {
            context.session.logout().await;
            info!("Signed out");
            Ok(())
        }
        Commands::Produits(cmd) => {
            ensure_route(context, "/produits")?;
            match cmd {
                CrudCommands::List => print_json(&context.produits.list().await?),
                CrudCommands::Get { id } => print_json(&context.produits.get(id).await?),
                CrudCommands::Delete { id } => {
                    context.produits.delete(id).await?;
                    info!("Deleted product {}", id);
                    Ok(())
                }
            }
        }
        Commands::Fournisseurs(cmd) => {
            ensure_route(context, "/fournisseurs")?;
            match cmd {
                CrudCommands::List => print_json(&context.fournisseurs.list().await?),
                CrudCommands::Get { id } => print_json(&context.fournisseurs.get(id).await?),
                CrudCommands::Delete { id } => {
                    context.fournisseurs.delete(id).await?;
                    info!("Deleted supplier {}", id);
                    Ok(())
                }
            }
        }
    }
}

fn ensure_route(context: &AppContext, route: &str) -> AppResult<()> {
    match check_route(&context.session, route) {
        RouteAccess::Granted => Ok(()),
        RouteAccess::Redirect(target) => Err(AppError::AccessDenied(format!(
            "Sign in required, redirecting to {}",
            target
        ))),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
