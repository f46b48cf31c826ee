//! Authentication
//!
//! - [`jwt`] - dashboard bearer tokens
//! - [`credentials`] - HTTP Basic decoding and admin credential check
//! - [`middleware`] - admin guard layer
//! - [`rate_limit`] - per-client request budgets

pub mod credentials;
pub mod jwt;
pub mod middleware;
pub mod rate_limit;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{AdminIdentity, AuthMethod, require_admin};
pub use rate_limit::RateLimiter;
