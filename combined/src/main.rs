//! Combined binary for development - runs every service in one process.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use common::{init_tracing, Environment, GtConfig};
use web::BoxError;

#[derive(Parser)]
#[command(name = "talent-dev")]
#[command(about = "Combined talent services binary for development")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all services and the campaign worker in a single process
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = auth_service_lib::config::DEFAULT_HTTP_PORT)]
        auth_port: u16,
        #[arg(long, default_value_t = auth_service_lib::config::DEFAULT_GRPC_PORT)]
        auth_grpc_port: u16,
        #[arg(long, default_value_t = candidate_service_lib::config::DEFAULT_HTTP_PORT)]
        candidate_port: u16,
        #[arg(long, default_value_t = activity_service_lib::config::DEFAULT_HTTP_PORT)]
        activity_port: u16,
        #[arg(long, default_value_t = campaign_service_lib::config::DEFAULT_HTTP_PORT)]
        campaign_port: u16,
        #[arg(long, default_value_t = widget_service_lib::config::DEFAULT_HTTP_PORT)]
        widget_port: u16,
        /// Skip the background campaign delivery worker
        #[arg(long)]
        no_worker: bool,
    },
    /// Manage the shared database schema
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Drop every table and run all migrations
    Fresh,
}

impl From<MigrateAction> for models::MigrateAction {
    fn from(action: MigrateAction) -> Self {
        match action {
            MigrateAction::Up => models::MigrateAction::Up,
            MigrateAction::Down => models::MigrateAction::Down,
            MigrateAction::Status => models::MigrateAction::Status,
            MigrateAction::Fresh => models::MigrateAction::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();

    init_tracing(Environment::from_env()?.default_log_filter());

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            auth_port,
            auth_grpc_port,
            candidate_port,
            activity_port,
            campaign_port,
            widget_port,
            no_worker,
        } => {
            info!("Starting combined services in development mode");
            info!("  Auth:      http://{}:{} (gRPC {})", host, auth_port, auth_grpc_port);
            info!("  Candidate: http://{}:{}", host, candidate_port);
            info!("  Activity:  http://{}:{}", host, activity_port);
            info!("  Campaign:  http://{}:{}", host, campaign_port);
            info!("  Widget:    http://{}:{}", host, widget_port);

            // Auth applies migrations and serves token verification to the rest
            let auth_host = host.clone();
            let auth_handle = tokio::spawn(async move {
                if let Err(e) =
                    auth_service_lib::run_embedded(&auth_host, auth_port, auth_grpc_port).await
                {
                    error!("Auth service failed: {}", e);
                }
            });

            tokio::time::sleep(Duration::from_millis(500)).await;

            let candidate_host = host.clone();
            let candidate_handle = tokio::spawn(async move {
                if let Err(e) =
                    candidate_service_lib::run_embedded(&candidate_host, candidate_port).await
                {
                    error!("Candidate service failed: {}", e);
                }
            });

            let activity_host = host.clone();
            let activity_handle = tokio::spawn(async move {
                if let Err(e) =
                    activity_service_lib::run_embedded(&activity_host, activity_port).await
                {
                    error!("Activity service failed: {}", e);
                }
            });

            let campaign_host = host.clone();
            let campaign_handle = tokio::spawn(async move {
                if let Err(e) =
                    campaign_service_lib::run_embedded(&campaign_host, campaign_port).await
                {
                    error!("Campaign service failed: {}", e);
                }
            });

            let widget_host = host;
            let widget_handle = tokio::spawn(async move {
                if let Err(e) = widget_service_lib::run_embedded(&widget_host, widget_port).await
                {
                    error!("Widget service failed: {}", e);
                }
            });

            let worker_handle = tokio::spawn(async move {
                if no_worker {
                    return std::future::pending::<()>().await;
                }
                if let Err(e) = campaign_service_lib::run_worker().await {
                    error!("Campaign worker failed: {}", e);
                }
            });

            // Any service exiting means something went wrong
            tokio::select! {
                _ = auth_handle => error!("Auth service exited unexpectedly"),
                _ = candidate_handle => error!("Candidate service exited unexpectedly"),
                _ = activity_handle => error!("Activity service exited unexpectedly"),
                _ = campaign_handle => error!("Campaign service exited unexpectedly"),
                _ = widget_handle => error!("Widget service exited unexpectedly"),
                _ = worker_handle => info!("Campaign worker stopped"),
            }
        }
        Commands::Migrate { action } => {
            let config = GtConfig::from_env()?;
            models::run_migrations(&config.database_url, action.into()).await?;
        }
    }

    Ok(())
}
