pub mod banner_handler;
pub mod contact_handler;
pub mod job_opening_handler;
