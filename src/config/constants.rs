//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per day (for token expiration calculation)
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Paths reachable without a token, matched exactly.
pub const PUBLIC_PATHS: &[&str] = &[
    "/api",
    "/api/users/sign-up",
    "/api/users/sign-in",
    "/health",
];

/// Path trees reachable without a token, matched on whole segments.
pub const PUBLIC_PATH_TREES: &[&str] = &["/swagger-ui", "/api-docs"];

// =============================================================================
// Bank Accounts
// =============================================================================

/// Event type broadcast after a bank account is created
pub const EVENT_BANK_ACCOUNT_CREATED: &str = "bank_account_created";

/// Capacity of the notification hub's broadcast buffer
pub const NOTIFICATION_BUFFER_SIZE: usize = 256;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database
// =============================================================================

/// Default size of the database connection pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;
