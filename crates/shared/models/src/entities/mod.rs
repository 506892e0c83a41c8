//! SeaORM entities, one module per table.

pub mod activity;
pub mod banner;
pub mod campaign;
pub mod campaign_send;
pub mod candidate;
pub mod candidate_email;
pub mod candidate_phone;
pub mod client;
pub mod country;
pub mod domain;
pub mod email_label;
pub mod job_opening;
pub mod language;
pub mod organization;
pub mod phone_label;
pub mod product;
pub mod rating_tag;
pub mod social_network;
pub mod token;
pub mod university;
pub mod user;
pub mod venue;
pub mod widget_page;
