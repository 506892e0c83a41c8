//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Domain administrator role
pub const ROLE_ADMIN: &str = "admin";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum length of an SMS campaign body (ten concatenated segments)
pub const MAX_SMS_BODY_LENGTH: usize = 1600;

// =============================================================================
// Pagination
// =============================================================================

pub const DEFAULT_PAGE_NUMBER: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 15;
pub const MAX_PAGE_SIZE: u64 = 100;
/// Requests past this page are served this page (and get no rows)
pub const MAX_PAGE_NUMBER: u64 = 1_000_000;

// =============================================================================
// Authentication
// =============================================================================

/// Access token lifetime in seconds (2 hours)
pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 2 * 3600;

/// Refresh token lifetime in days
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 30;

/// Minimum secret key length outside development environments
pub const MIN_SECRET_KEY_LENGTH: usize = 32;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

pub const GRANT_TYPE_PASSWORD: &str = "password";
pub const GRANT_TYPE_REFRESH_TOKEN: &str = "refresh_token";

// =============================================================================
// Activities
// =============================================================================

/// Consecutive activities of one type within this window collapse into one
pub const ACTIVITY_AGGREGATE_WINDOW_MINUTES: i64 = 30;

/// Most recent rows folded into one aggregated activity feed
pub const MAX_AGGREGATE_ROWS: u64 = 1000;

// =============================================================================
// Labels
// =============================================================================

pub const EMAIL_LABEL_PRIMARY: &str = "Primary";
pub const PHONE_LABEL_MOBILE: &str = "Mobile";
/// Applied to phones submitted without a label
pub const PHONE_LABEL_OTHER: &str = "Other";

/// Seeded email label descriptions
pub const DEFAULT_EMAIL_LABELS: &[&str] = &[EMAIL_LABEL_PRIMARY, "Home", "Work", "Other"];

/// Seeded phone label descriptions
pub const DEFAULT_PHONE_LABELS: &[&str] = &["Home", "Work", PHONE_LABEL_MOBILE, PHONE_LABEL_OTHER];
