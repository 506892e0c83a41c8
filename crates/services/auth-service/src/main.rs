//! Auth Service - OAuth2 tokens over HTTP, verification over gRPC.

use clap::{Parser, Subcommand};

use auth_service_lib::config::{DEFAULT_GRPC_PORT, DEFAULT_HTTP_PORT};
use common::{init_tracing, Environment};

#[derive(Parser)]
#[command(name = "auth-service")]
#[command(about = "Authentication microservice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP and gRPC servers
    Serve {
        #[arg(long, env = "AUTH_SERVICE_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "AUTH_SERVICE_PORT", default_value_t = DEFAULT_HTTP_PORT)]
        port: u16,
        #[arg(long, env = "AUTH_SERVICE_GRPC_PORT", default_value_t = DEFAULT_GRPC_PORT)]
        grpc_port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<(), web::BoxError> {
    dotenvy::dotenv().ok();

    init_tracing(Environment::from_env()?.default_log_filter());

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            grpc_port,
        } => {
            auth_service_lib::run_embedded(&host, port, grpc_port).await?;
        }
    }

    Ok(())
}
