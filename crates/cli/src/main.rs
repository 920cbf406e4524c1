//! Sanad CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create tables, seed the bootstrap admin, backfill legacy passwords
//! sanad-cli migrate
//!
//! # Create an admin
//! sanad-cli admin create -u editor -p "a strong password"
//!
//! # Rotate a password (the required followup to the bootstrap admin)
//! sanad-cli admin set-password -u admin -p "a strong password"
//!
//! # Export messages to CSV through the running server
//! sanad-cli export -u admin -p "a strong password" -o messages.csv --service crm
//! ```
//!
//! # Commands
//!
//! - `migrate` - Create/upgrade the database schema
//! - `admin create` / `admin set-password` - Credential management
//! - `export` - Fetch all messages and write a filtered CSV

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "sanad-cli")]
#[command(author, version, about = "Sanad CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create tables, indexes, and the bootstrap admin
    Migrate,
    /// Manage admin credentials
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Export messages to CSV through a running server
    Export {
        /// Base URL of the server
        #[arg(long, default_value = "http://localhost:3000")]
        url: String,

        /// Admin username
        #[arg(short, long)]
        username: String,

        /// Admin password
        #[arg(short, long)]
        password: String,

        /// Output file path
        #[arg(short, long, default_value = "messages.csv")]
        output: std::path::PathBuf,

        /// Free-text search over name/email/service/message/id
        #[arg(long)]
        search: Option<String>,

        /// Exact service filter ("all" disables)
        #[arg(long)]
        service: Option<String>,

        /// Read-state filter: all, read, or unread
        #[arg(long)]
        read: Option<String>,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin
    Create {
        /// Admin username
        #[arg(short, long)]
        username: String,

        /// Admin password
        #[arg(short, long)]
        password: String,
    },
    /// Set a new password for an existing admin
    SetPassword {
        /// Admin username
        #[arg(short, long)]
        username: String,

        /// New password
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env if present, then initialize tracing
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create { username, password } => {
                commands::admin::create(&username, &password).await?;
            }
            AdminAction::SetPassword { username, password } => {
                commands::admin::set_password(&username, &password).await?;
            }
        },
        Commands::Export {
            url,
            username,
            password,
            output,
            search,
            service,
            read,
        } => {
            commands::export::run(&commands::export::ExportArgs {
                url,
                username,
                password,
                output,
                search,
                service,
                read,
            })
            .await?;
        }
    }
    Ok(())
}
