//! Campaign send worker.
//!
//! Each job is attempted once. Whatever happens with the provider is stored
//! as a `sent` or `failed` send row; only a vanished campaign or candidate
//! fails the job itself.

use std::sync::Arc;

use apalis::prelude::*;
use apalis_sql::postgres::PostgresStorage;
use apalis_sql::sqlx::postgres::PgPoolOptions;
use tracing::{error, info, warn};

use common::{AppError, AppResult};
use domain::{Campaign, CampaignChannel, CampaignSend, Candidate, SendStatus};

use super::send_job::CampaignSendJob;
use crate::notifier::{Message, Notifiers};
use crate::repository::CampaignRepository;

/// Dependencies shared by every job.
#[derive(Clone)]
pub struct DeliveryContext {
    pub campaigns: Arc<dyn CampaignRepository>,
    pub notifiers: Notifiers,
}

/// Push channel a candidate's devices subscribe to.
pub fn push_channel(candidate: &Candidate) -> String {
    format!("candidate-{}", candidate.id)
}

fn content(campaign: &Campaign, key: &str) -> String {
    campaign.content_str(key).unwrap_or_default().to_string()
}

fn optional(campaign: &Campaign, key: &str) -> Option<String> {
    campaign.content_str(key).map(str::to_string)
}

/// Resolve the candidate's address for the campaign channel.
pub fn build_message(campaign: &Campaign, candidate: &Candidate) -> Result<Message, String> {
    match campaign.channel {
        CampaignChannel::Email => {
            let to = candidate
                .primary_email()
                .ok_or_else(|| "Candidate has no email address".to_string())?;
            Ok(Message::Email {
                to: to.to_string(),
                subject: content(campaign, "subject"),
                body_text: content(campaign, "body_text"),
                body_html: optional(campaign, "body_html"),
                from_name: optional(campaign, "from_name"),
                reply_to: optional(campaign, "reply_to"),
            })
        }
        CampaignChannel::Sms => {
            let to = candidate
                .mobile_phone()
                .ok_or_else(|| "Candidate has no mobile phone".to_string())?;
            Ok(Message::Sms {
                to: to.to_string(),
                body: content(campaign, "body_text"),
            })
        }
        CampaignChannel::Push => Ok(Message::Push {
            channel: push_channel(candidate),
            title: content(campaign, "title"),
            body: content(campaign, "body_text"),
            url: optional(campaign, "url"),
        }),
    }
}

/// Deliver one job and store the outcome.
pub async fn deliver(ctx: &DeliveryContext, job: &CampaignSendJob) -> AppResult<CampaignSend> {
    let campaign = ctx
        .campaigns
        .find_by_id(job.campaign_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let candidate = ctx
        .campaigns
        .find_candidate(job.candidate_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let outcome = match build_message(&campaign, &candidate) {
        Ok(message) => ctx
            .notifiers
            .for_channel(campaign.channel)
            .send(&message)
            .await
            .map_err(|e| e.to_string()),
        Err(reason) => Err(reason),
    };

    let (status, error) = match outcome {
        Ok(()) => (SendStatus::Sent, None),
        Err(reason) => {
            warn!(
                campaign_id = %campaign.id,
                candidate_id = %candidate.id,
                error = %reason,
                "Campaign send failed"
            );
            (SendStatus::Failed, Some(reason))
        }
    };

    ctx.campaigns
        .insert_send(campaign.id, candidate.id, status, error)
        .await
}

async fn handle_send_job(job: CampaignSendJob, ctx: Data<DeliveryContext>) -> Result<(), AppError> {
    match deliver(&ctx, &job).await {
        Ok(send) => {
            info!(
                campaign_id = %job.campaign_id,
                candidate_id = %job.candidate_id,
                status = send.status.as_str(),
                "Campaign send processed"
            );
            Ok(())
        }
        Err(e) => {
            error!(
                campaign_id = %job.campaign_id,
                candidate_id = %job.candidate_id,
                "Campaign send job failed: {}",
                e
            );
            Err(e)
        }
    }
}

/// Open the queue storage, creating the apalis tables when missing.
pub async fn connect_storage(database_url: &str) -> AppResult<PostgresStorage<CampaignSendJob>> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to job queue: {}", e)))?;

    PostgresStorage::setup(&pool)
        .await
        .map_err(|e| AppError::internal(format!("Failed to set up job storage: {}", e)))?;

    Ok(PostgresStorage::new(pool))
}

/// Process send jobs until Ctrl+C.
pub async fn run_worker(database_url: &str, ctx: DeliveryContext) -> AppResult<()> {
    let storage = connect_storage(database_url).await?;

    let worker = WorkerBuilder::new("campaign-send-worker")
        .data(ctx)
        .backend(storage)
        .build_fn(handle_send_job);

    info!("Campaign send worker started. Press Ctrl+C to stop.");
    let monitor = Monitor::new().register(worker);

    tokio::select! {
        result = monitor.run() => {
            if let Err(e) = result {
                error!("Worker error: {}", e);
                return Err(AppError::internal(format!("Worker failed: {}", e)));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal, stopping worker...");
        }
    }

    info!("Campaign send worker stopped.");
    Ok(())
}
