use anyhow::Result;
use clap::{Parser, Subcommand};

/// gurudev - contact enquiries for the Gurudev website
#[derive(Parser)]
#[command(name = "gurudev")]
#[command(about = "Serve the contact page and forward enquiries", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Inspect stored enquiries
    Enquiry {
        #[command(subcommand)]
        command: EnquiryCommands,
    },
}

#[derive(Subcommand)]
enum EnquiryCommands {
    /// List the most recent enquiries
    List {
        #[arg(long, default_value_t = 20)]
        limit: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = gurudev::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    gurudev::observability::init_observability(
        "gurudev",
        env!("CARGO_PKG_VERSION"),
        &config.logging.level,
        config.json_logs(),
    )?;

    match cli.command {
        Commands::Serve { host, port } => gurudev::cli::serve(config, host, port).await,
        Commands::Migrate => gurudev::cli::migrate(config).await,
        Commands::Reset => gurudev::cli::reset(config).await,
        Commands::Enquiry {
            command: EnquiryCommands::List { limit },
        } => gurudev::cli::list(config, limit).await,
    }
}
