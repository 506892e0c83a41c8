//! Activity Service - domain activity timeline.

use clap::{Parser, Subcommand};

use activity_service_lib::config::DEFAULT_HTTP_PORT;
use common::{init_tracing, Environment};

#[derive(Parser)]
#[command(name = "activity-service")]
#[command(about = "Activity microservice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "ACTIVITY_SERVICE_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "ACTIVITY_SERVICE_PORT", default_value_t = DEFAULT_HTTP_PORT)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<(), web::BoxError> {
    dotenvy::dotenv().ok();

    init_tracing(Environment::from_env()?.default_log_filter());

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            activity_service_lib::run_embedded(&host, port).await?;
        }
    }

    Ok(())
}
