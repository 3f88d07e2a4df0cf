use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

const DEV_JWT_SECRET: &str = "dev-secret-change-me";

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Runtime configuration, read once from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    pub uploads: UploadConfig,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
    /// Prefix for returned URLs, without trailing slash
    pub public_base_url: String,
    pub max_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = parse_or("PORT", 5000);

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            log::warn!("DATABASE_URL not set, using local MongoDB");
            "mongodb://localhost:27017/consultant_marketplace".to_string()
        });

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("⚠️  JWT_SECRET not set, using development secret");
            DEV_JWT_SECRET.to_string()
        });

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", port))
            .trim_end_matches('/')
            .to_string();

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                    "http://127.0.0.1:5173".to_string(),
                ]
            });

        Self {
            host,
            port,
            database_url,
            auth: AuthConfig {
                jwt_secret,
                jwt_issuer: env::var("JWT_ISSUER")
                    .unwrap_or_else(|_| "consultant-marketplace".to_string()),
                jwt_audience: env::var("JWT_AUDIENCE")
                    .unwrap_or_else(|_| "consultant-marketplace-web".to_string()),
                jwt_ttl_hours: parse_or("JWT_TTL_HOURS", 24),
                bcrypt_cost: parse_or("BCRYPT_COST", bcrypt::DEFAULT_COST),
            },
            uploads: UploadConfig {
                dir: PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string())),
                public_base_url,
                max_bytes: parse_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            },
            cors_origins,
        }
    }
}

/// Parses an env var, falling back to `default` when unset or invalid.
fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            log::warn!("Invalid {} value '{}': {}, using default {}", key, raw, e, default);
            default
        }),
        Err(_) => default,
    }
}
