//! CLI for hubmeta model record imports

use clap::Parser;
use hubmeta::HubmetaConfig;
use hubmeta_cli::{OutputFormat, commands, error::CliError};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hubmeta")]
#[command(author, version, about = "Extract and normalize model hub metadata", long_about = None)]
struct Cli {
    /// Config file path (JSON)
    #[arg(short, long, env = "HUBMETA_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "HUBMETA_LOG_LEVEL")]
    log_level: Option<String>,

    /// Hub access token
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the normalized record of a model without storing it
    Extract {
        /// Model identifier (e.g., meta-llama/Llama-3.2-1B)
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// License string already known for this model
        #[arg(long)]
        license_hint: Option<String>,
    },
    /// Extract a model and store the record
    Import {
        /// Model identifier
        identifier: String,

        /// License string already known for this model
        #[arg(long)]
        license_hint: Option<String>,
    },
    /// List stored records
    List,
    /// Show a stored record
    Show {
        /// Record slug
        slug: String,

        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Remove a stored record
    Remove {
        /// Record slug
        slug: String,
    },
}

fn load_config(cli: &Cli) -> Result<HubmetaConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => {
            HubmetaConfig::load_from_file(path).map_err(|e| CliError::Config(e.to_string()))?
        }
        None => HubmetaConfig::default(),
    };

    // CLI flags override file values
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(token) = &cli.token {
        config.api_token = Some(token.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let filter = format!(
        "hubmeta={level},hubmeta_core={level},hubmeta_cli={level}",
        level = config.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &cli.config {
        info!("Configuration loaded from: {}", path.display());
    }

    let service = commands::build_service(&config)?;

    match &cli.command {
        Commands::Extract {
            identifier,
            format,
            license_hint,
        } => {
            commands::run_extract(&service, identifier, *format, license_hint.as_deref()).await?;
        }
        Commands::Import {
            identifier,
            license_hint,
        } => {
            commands::run_import(&service, identifier, license_hint.as_deref()).await?;
        }
        Commands::List => {
            commands::run_list(&service).await?;
        }
        Commands::Show { slug, format } => {
            commands::run_show(&service, slug, *format).await?;
        }
        Commands::Remove { slug } => {
            commands::run_remove(&service, slug).await?;
        }
    }

    Ok(())
}
