pub mod campaign_handler;
