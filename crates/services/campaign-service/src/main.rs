//! Campaign Service - campaign API and delivery worker.

use clap::{Parser, Subcommand};

use campaign_service_lib::config::DEFAULT_HTTP_PORT;
use common::{init_tracing, Environment};

#[derive(Parser)]
#[command(name = "campaign-service")]
#[command(about = "Campaign microservice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "CAMPAIGN_SERVICE_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "CAMPAIGN_SERVICE_PORT", default_value_t = DEFAULT_HTTP_PORT)]
        port: u16,
    },
    /// Background job management
    Jobs {
        #[command(subcommand)]
        action: JobsAction,
    },
}

#[derive(Subcommand)]
enum JobsAction {
    /// Deliver queued campaign sends
    Work,
}

#[tokio::main]
async fn main() -> Result<(), web::BoxError> {
    dotenvy::dotenv().ok();

    init_tracing(Environment::from_env()?.default_log_filter());

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            campaign_service_lib::run_embedded(&host, port).await?;
        }
        Commands::Jobs {
            action: JobsAction::Work,
        } => {
            campaign_service_lib::run_worker().await?;
        }
    }

    Ok(())
}
