use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub embedding_model: String,
    pub hr_rps: u32,
    pub public_rps: u32,
    pub similarity_threshold: f64,
    pub uploads_dir: Option<String>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            jwt_secret: get_env("JWT_SECRET")?,
            llm_api_key: get_env("LLM_API_KEY")?,
            llm_base_url: env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            embedding_model: env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "text-embedding-3-small".to_string()),
            hr_rps: get_env_parse("HR_RPS")?,
            public_rps: get_env_parse("PUBLIC_RPS")?,
            similarity_threshold: env::var("SIMILARITY_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.3),
            uploads_dir: env::var("UPLOADS_DIR").ok(),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_required_vars() {
        env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
        env::set_var("DATABASE_URL", "postgres://localhost/test");
        env::set_var("JWT_SECRET", "secret");
        env::set_var("LLM_API_KEY", "key");
        env::set_var("HR_RPS", "10");
        env::set_var("PUBLIC_RPS", "10");
    }

    #[test]
    fn db_pool_size_is_env_tunable_with_a_default() {
        set_required_vars();

        env::remove_var("DB_MAX_CONNECTIONS");
        let config = Config::from_env().unwrap();
        assert_eq!(config.db_max_connections, 20);

        env::set_var("DB_MAX_CONNECTIONS", "7");
        let config = Config::from_env().unwrap();
        assert_eq!(config.db_max_connections, 7);
        env::remove_var("DB_MAX_CONNECTIONS");
    }
}
