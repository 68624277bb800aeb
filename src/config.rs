use anyhow::Result;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub store_backend: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub admin_uids: Vec<String>,
    pub genai_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            store_backend: env::var("STORE_BACKEND")
                .unwrap_or_else(|_| "memory".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgresql://localhost/yesgem_studio".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key".to_string()),
            admin_uids: env::var("ADMIN_UIDS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            genai_api_key: env::var("GENAI_API_KEY").ok(),
        })
    }

    pub fn is_admin_uid(&self, uid: &str) -> bool {
        self.admin_uids.iter().any(|u| u == uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn parses_admin_uid_list() {
        env::set_var("ADMIN_UIDS", "uid-a, uid-b,,uid-c ");
        let config = Config::from_env().unwrap();
        assert_eq!(config.admin_uids, vec!["uid-a", "uid-b", "uid-c"]);
        assert!(config.is_admin_uid("uid-b"));
        assert!(!config.is_admin_uid("uid-d"));
        env::remove_var("ADMIN_UIDS");
    }

    #[test]
    #[serial]
    fn defaults_to_memory_backend() {
        env::remove_var("STORE_BACKEND");
        let config = Config::from_env().unwrap();
        assert_eq!(config.store_backend, "memory");
    }
}
