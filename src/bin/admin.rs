//! CLI administration tool for six-cities.
//!
//! Provides commands for managing accounts, viewing statistics and checking
//! the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Make sure an account exists (created if missing)
//! cargo run --bin admin -- user ensure --email keks@htmlacademy.ru --name Keks
//!
//! # Issue an access token for an existing account
//! cargo run --bin admin -- user token keks@htmlacademy.ru
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `SALT` (required for `user ensure`): password hashing key
//! - `JWT_SECRET` (required for `user token`): token signing secret
//! - `JWT_EXPIRATION_SECONDS` (optional): token lifetime, default 172800

use six_cities::application::services::{JwtService, UserService};
use six_cities::domain::entities::{Registration, UserType};
use six_cities::infrastructure::persistence::PgUserRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing six-cities.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Find an account by email, creating it if it does not exist
    Ensure {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        name: Option<String>,

        /// Avatar image path or URL (.jpg or .png)
        #[arg(short, long)]
        avatar: Option<String>,

        /// Create the account as a `pro` user
        #[arg(long)]
        pro: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Issue an access token for an existing account
    Token {
        email: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches account management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repository = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));
    let service = UserService::new(repository);

    match action {
        UserAction::Ensure {
            email,
            name,
            avatar,
            pro,
            yes,
        } => ensure_user(&service, email, name, avatar, pro, yes).await?,
        UserAction::Token { email } => issue_token(&service, &email).await?,
    }

    Ok(())
}

/// Returns the account for an email, registering it when it does not exist yet.
///
/// Missing fields are prompted for. An existing account is left untouched.
async fn ensure_user(
    service: &UserService,
    email: Option<String>,
    name: Option<String>,
    avatar: Option<String>,
    pro: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Ensure user account".bright_blue().bold());
    println!();

    let salt = std::env::var("SALT").context("SALT must be set")?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    if let Some(existing) = service
        .find_by_email(&email)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
    {
        println!("{}", "Account already exists".yellow());
        print_user(&existing.id.to_string(), &existing.email, existing.user_type);
        return Ok(());
    }

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password (6-12 characters)")
        .with_confirmation("Repeat password", "Passwords do not match")
        .validate_with(|input: &String| -> Result<(), &str> {
            if (6..=12).contains(&input.chars().count()) {
                Ok(())
            } else {
                Err("Password must be 6 to 12 characters long")
            }
        })
        .interact()?;

    let user_type = if pro { UserType::Pro } else { UserType::Regular };

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create {user_type} account {email}?"))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let user = service
        .find_or_create(
            Registration {
                email,
                name,
                password,
                avatar_url: avatar,
                user_type,
            },
            &salt,
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "Account ready".green().bold());
    print_user(&user.id.to_string(), &user.email, user.user_type);

    Ok(())
}

/// Issues a JWT for an existing account and prints a usage example.
async fn issue_token(service: &UserService, email: &str) -> Result<()> {
    let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
    let expiration = std::env::var("JWT_EXPIRATION_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(172_800);

    let user = service
        .find_by_email(email)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("User not found")?;

    let token = JwtService::new(&secret, expiration)
        .issue(&user)
        .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;

    println!("{}", "Access token".bright_blue().bold());
    println!();
    println!("  {}", token.bright_yellow());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/users/login",
        token.bright_yellow()
    );
    println!();

    Ok(())
}

fn print_user(id: &str, email: &str, user_type: UserType) {
    println!("  ID:    {}", id.bright_black());
    println!("  Email: {}", email.cyan());
    println!("  Type:  {}", user_type.as_str().bright_white());
    println!();
}

/// Displays row counts of the main tables.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let offers_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM offers")
        .fetch_one(pool)
        .await?;

    let premium_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM offers WHERE is_premium")
            .fetch_one(pool)
            .await?;

    let comments_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(pool)
        .await?;

    println!(
        "  Users:          {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Offers:         {}",
        offers_count.to_string().bright_green().bold()
    );
    println!(
        "  Premium offers: {}",
        premium_count.to_string().bright_green().bold()
    );
    println!(
        "  Comments:       {}",
        comments_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
