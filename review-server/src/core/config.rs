use crate::auth::JwtConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | ENVIRONMENT | development | anything else requires real secrets |
/// | HTTP_PORT | 5000 | |
/// | DATABASE_URL | sqlite:reviews.db | created if missing |
/// | OPENAI_API_KEY | - | generation fails without it |
/// | OPENAI_BASE_URL | https://api.openai.com/v1 | |
/// | OPENAI_MODEL | gpt-4o-mini | |
/// | GENERATION_TIMEOUT_SECS | 20 | per attempt |
/// | RESTAURANT_NAME | Siena Paris | |
/// | ADMIN_USERNAME | admin | |
/// | ADMIN_PASSWORD | dev placeholder | secret |
/// | JWT_SECRET | dev placeholder | secret |
/// | JWT_EXPIRATION_MINUTES | 1440 | |
/// | CORS_ALLOWED_ORIGINS | - | comma-separated, empty allows any origin |
/// | GENERATE_RATE_LIMIT | 10 | requests per minute per client |
/// | LOGIN_RATE_LIMIT | 5 | requests per minute per client |
/// | LOG_LEVEL | info | |
/// | LOG_DIR | - | enables daily rolling file logs |
#[derive(Debug, Clone)]
pub struct Config {
    /// development | staging | production
    pub environment: String,
    pub http_port: u16,
    pub database_url: String,
    /// Name the generated reviews are written about
    pub restaurant_name: String,
    pub generator: GeneratorConfig,
    pub admin: AdminCredentials,
    pub jwt: JwtConfig,
    pub cors_allowed_origins: Vec<String>,
    pub rate_limits: RateLimitConfig,
    pub log_level: String,
    pub log_dir: Option<String>,
}

/// Language-model endpoint settings
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

/// Dashboard login
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Per-client request budgets (per minute)
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub generate_per_minute: u32,
    pub login_per_minute: u32,
}

impl Default for Config {
    /// Development defaults, no environment lookups
    fn default() -> Self {
        Self {
            environment: "development".into(),
            http_port: 5000,
            database_url: "sqlite:reviews.db".into(),
            restaurant_name: "Siena Paris".into(),
            generator: GeneratorConfig {
                api_key: None,
                base_url: "https://api.openai.com/v1".into(),
                model: "gpt-4o-mini".into(),
                timeout_secs: 20,
            },
            admin: AdminCredentials {
                username: "admin".into(),
                password: dev_secret("ADMIN_PASSWORD"),
            },
            jwt: JwtConfig {
                secret: dev_secret("JWT_SECRET"),
                expiration_minutes: 1440,
            },
            cors_allowed_origins: Vec::new(),
            rate_limits: RateLimitConfig {
                generate_per_minute: 10,
                login_per_minute: 5,
            },
            log_level: "info".into(),
            log_dir: None,
        }
    }
}

fn dev_secret(name: &str) -> String {
    format!("dev-{name}-not-for-production")
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                dev_secret(name)
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let defaults = Self::default();
        let environment = env_or("ENVIRONMENT", &defaults.environment);

        Ok(Self {
            http_port: env_parse("HTTP_PORT", defaults.http_port),
            database_url: env_or("DATABASE_URL", &defaults.database_url),
            restaurant_name: env_or("RESTAURANT_NAME", &defaults.restaurant_name),
            generator: GeneratorConfig {
                api_key: std::env::var("OPENAI_API_KEY")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                base_url: env_or("OPENAI_BASE_URL", &defaults.generator.base_url),
                model: env_or("OPENAI_MODEL", &defaults.generator.model),
                timeout_secs: env_parse(
                    "GENERATION_TIMEOUT_SECS",
                    defaults.generator.timeout_secs,
                ),
            },
            admin: AdminCredentials {
                username: env_or("ADMIN_USERNAME", &defaults.admin.username),
                password: Self::require_secret("ADMIN_PASSWORD", &environment)?,
            },
            jwt: JwtConfig {
                secret: Self::require_secret("JWT_SECRET", &environment)?,
                expiration_minutes: env_parse(
                    "JWT_EXPIRATION_MINUTES",
                    defaults.jwt.expiration_minutes,
                ),
            },
            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            rate_limits: RateLimitConfig {
                generate_per_minute: env_parse(
                    "GENERATE_RATE_LIMIT",
                    defaults.rate_limits.generate_per_minute,
                ),
                login_per_minute: env_parse(
                    "LOGIN_RATE_LIMIT",
                    defaults.rate_limits.login_per_minute,
                ),
            },
            log_level: env_or("LOG_LEVEL", &defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// Split a comma-separated origin list, dropping blanks
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.restaurant_name, "Siena Paris");
        assert_eq!(config.generator.model, "gpt-4o-mini");
        assert_eq!(config.rate_limits.generate_per_minute, 10);
        assert_eq!(config.rate_limits.login_per_minute, 5);
        assert!(config.is_development());
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" https://siena.example/ , ,http://localhost:5173"),
            vec!["https://siena.example", "http://localhost:5173"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = AdminCredentials {
            username: "admin".into(),
            password: "hunter2".into(),
        };
        let printed = format!("{creds:?}");
        assert!(printed.contains("admin"));
        assert!(!printed.contains("hunter2"));
    }
}
