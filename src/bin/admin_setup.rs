// ABOUTME: Administrative setup utility for Status Window admin accounts
// ABOUTME: Creates, updates, and lists the users allowed to sign in and edit records
//! Admin account management for the Status Window server.
//!
//! Usage:
//! ```bash
//! # Create an admin user
//! cargo run --bin admin-setup -- create-admin-user --email me@example.com --password secret
//!
//! # Reset the password of an existing admin
//! cargo run --bin admin-setup -- create-admin-user --email me@example.com --password new --force
//!
//! # List admin users
//! cargo run --bin admin-setup -- list-admin-users
//! ```

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use status_core::constants::{defaults, env_keys};
use status_window::auth::hash_password;
use status_window::config::environment::DatabaseUrl;
use status_window::database::Database;
use std::env;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "admin-setup",
    about = "Status Window admin account management",
    long_about = "Manage the admin accounts that can sign in to the Status Window dashboard and edit records."
)]
struct AdminSetupArgs {
    #[command(subcommand)]
    command: AdminCommand,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Create or update an admin user
    CreateAdminUser {
        /// Admin email
        #[arg(long)]
        email: String,

        /// Admin password
        #[arg(long)]
        password: String,

        /// Grant read-only access instead of full admin rights
        #[arg(long)]
        read_only: bool,

        /// Update the user if it already exists
        #[arg(long)]
        force: bool,
    },

    /// List admin users
    ListAdminUsers,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = AdminSetupArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    if let Err(e) = dotenvy::dotenv() {
        info!("No .env file loaded: {e}");
    }

    let raw_url = args
        .database_url
        .or_else(|| env::var(env_keys::DATABASE_URL).ok())
        .unwrap_or_else(|| defaults::DATABASE_URL.to_owned());
    let database_url = DatabaseUrl::parse_url(&raw_url)?;

    info!("Connecting to database: {database_url}");
    let database = Database::new(&database_url.to_connection_string()).await?;

    match args.command {
        AdminCommand::CreateAdminUser {
            email,
            password,
            read_only,
            force,
        } => create_admin_user_command(&database, &email, &password, !read_only, force).await,
        AdminCommand::ListAdminUsers => list_admin_users_command(&database).await,
    }
}

async fn create_admin_user_command(
    database: &Database,
    email: &str,
    password: &str,
    is_admin: bool,
    force: bool,
) -> Result<()> {
    if password.is_empty() {
        return Err(anyhow!("Password must not be empty"));
    }

    if let Some(existing) = database.get_admin_user_by_email(email).await? {
        if !force {
            error!("User '{}' already exists", existing.email);
            info!(
                "Created {}; use --force to update",
                existing.created_at.format("%Y-%m-%d %H:%M UTC")
            );
            return Err(anyhow!("User already exists (use --force to update)"));
        }
        info!("Updating existing admin user {}", existing.email);
    }

    let password_hash = hash_password(password)?;
    let user = database
        .upsert_admin_user(email, &password_hash, is_admin)
        .await?;

    println!("\nAdmin user ready");
    println!("{}", "=".repeat(50));
    println!("   Email: {}", user.email);
    println!(
        "   Access: {}",
        if user.is_admin { "full" } else { "read-only" }
    );
    println!("\nSign in with POST /api/auth/login using these credentials.");

    Ok(())
}

async fn list_admin_users_command(database: &Database) -> Result<()> {
    let users = database.list_admin_users().await?;
    if users.is_empty() {
        println!("No admin users. Create one with `admin-setup create-admin-user`.");
        return Ok(());
    }

    println!("{:<36}  {:<32}  {:<6}  LAST LOGIN", "ID", "EMAIL", "ADMIN");
    for user in users {
        let last_login = user.last_login.map_or_else(
            || "never".to_owned(),
            |t| t.format("%Y-%m-%d %H:%M UTC").to_string(),
        );
        println!(
            "{:<36}  {:<32}  {:<6}  {last_login}",
            user.id, user.email, user.is_admin
        );
    }
    Ok(())
}
