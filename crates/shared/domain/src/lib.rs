//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared across the talent-management services.

pub mod activity;
pub mod campaign;
pub mod candidate;
pub mod constants;
pub mod error;
pub mod lookup;
pub mod password;
pub mod user;
pub mod widget;

pub use activity::{Activity, ActivityResponse, ActivityType};
pub use campaign::{Campaign, CampaignChannel, CampaignSend, SendStatus};
pub use candidate::{
    format_name, validate_email, Candidate, CandidateEmail, CandidatePhone, CreateCandidate,
    NewCandidateEmail, NewCandidatePhone, UpdateCandidate,
};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use lookup::{
    Country, EmailLabel, Language, Organization, PhoneLabel, Product, RatingTag, SocialNetwork,
    University,
};
pub use password::Password;
pub use user::{Domain, User, UserResponse, UserRole};
pub use widget::{Banner, JobOpening, Venue, WidgetPage};
