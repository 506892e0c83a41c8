pub mod candidate_handler;
pub mod lookup_handler;
