//! CLI argument definitions for the QnA binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Storage backend type
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Backend {
    /// SQLite database (default)
    Sqlite,
    /// PostgreSQL database
    Postgres,
    /// In-memory with JSON persistence on shutdown (for development)
    Inmemory,
}

/// QnA user management server
#[derive(Parser, Debug)]
#[command(name = "qna")]
#[command(about = "QnA: user sign-up, login and profiles for a Q&A site")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web server
    Serve(ServeArgs),
    /// Check health of a running server
    Health(HealthArgs),
    /// Inspect stored users
    #[command(subcommand)]
    User(UserCommands),
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List all users
    List(UserListArgs),
}

/// Where users are stored. Shared by every command that opens a store.
#[derive(clap::Args, Debug, Clone)]
pub struct BackendConfig {
    /// Storage backend to use
    #[arg(short, long, default_value = "sqlite", env = "QNA_BACKEND")]
    pub backend: Backend,

    /// Data directory for storage files.
    /// For SQLite: stores qna.db
    /// For InMemory: stores qna.json
    #[arg(short = 'D', long, env = "QNA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// PostgreSQL connection URL (required when backend=postgres)
    #[arg(long, env = "QNA_POSTGRES_URL")]
    pub postgres_url: Option<String>,
}

impl BackendConfig {
    /// The data directory, defaulting to the working directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080, env = "QNA_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "QNA_HOST")]
    pub host: String,

    /// Seconds a session may sit idle before it expires
    #[arg(
        long,
        default_value_t = 1800,
        env = "QNA_SESSION_TTL",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub session_ttl: u64,

    #[command(flatten)]
    pub backend_config: BackendConfig,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Base URL of the server to check
    #[arg(long, default_value = "http://127.0.0.1:8080", env = "QNA_URL")]
    pub url: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}

/// Arguments for `user list`
#[derive(clap::Args, Debug)]
pub struct UserListArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub backend_config: BackendConfig,
}
