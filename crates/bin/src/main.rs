use clap::Parser;
use tracing_subscriber::EnvFilter;

mod backend;
mod cli;
mod commands;
mod output;
mod session;
mod templates;

use cli::{Cli, Commands, UserCommands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("qna=info".parse()?))
        .init();

    match cli.command {
        Commands::Serve(args) => commands::serve::run(&args).await,
        Commands::Health(args) => commands::health::run(&args).await,
        Commands::User(UserCommands::List(args)) => commands::user::list(&args).await,
    }
}
