use clap::Parser;
use once_cell::sync::Lazy;

pub const JWT_EXPIRY_SECONDS: i64 = 86400i64;

/// Fallback prefix for exam numbers when a student is created without a
/// school scope (legacy/global calls).
pub const DEFAULT_EXAM_PREFIX: &str = "SCH";

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env, default_value = "development")]
    pub app_env: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env)]
    pub jwt_secret: String,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env)]
    pub admin_email: String,

    #[clap(long, env)]
    pub admin_password: String,

    #[clap(long, env, default_value = "System Administrator")]
    pub admin_name: String,
}
