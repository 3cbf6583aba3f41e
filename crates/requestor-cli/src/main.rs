use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "requestor", version, about = "AI requestor service")]
struct Cli {
    /// Path to the configuration file. A missing file means built-in defaults.
    #[arg(
        long,
        short,
        global = true,
        env = "REQUESTOR_CONFIG",
        default_value = "requestor.yaml"
    )]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve,

    /// Print the schema payload that `ai_suggest` would send.
    Schema,

    /// Print the data payload that `ai_query` would send.
    Export {
        /// Prompt to embed in the payload.
        #[arg(long)]
        prompt: String,
    },

    /// Validate configuration and check the database and AI server settings.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Serve => commands::serve::run(&cli.config).await?,
        Command::Schema => commands::preview::schema(&cli.config).await?,
        Command::Export { prompt } => commands::preview::export(&cli.config, &prompt).await?,
        Command::Check => commands::check::run(&cli.config).await?,
    }

    Ok(())
}
