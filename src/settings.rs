use std::env;

use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_env")]
    pub env: String, // file / server
    pub database_url: String,
    pub db_min_connections: Option<u32>,
    pub db_max_connections: Option<u32>,
    pub log_dir: Option<String>,
    pub log_level: Option<String>,
}

fn default_env() -> String {
    "file".to_string()
}

pub fn get_config() -> anyhow::Result<Config> {
    let env_var = env::var("env").unwrap_or("file".to_string());
    if env_var == "file" {
        let _ = dotenvy::dotenv();
    }
    Ok(envy::from_env::<Config>()?)
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn test_config_from_iter() {
        let vars = vec![
            ("DATABASE_URL".to_string(), "postgres://localhost/profile".to_string()),
            ("DB_MAX_CONNECTIONS".to_string(), "20".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.env, "file");
        assert_eq!(config.database_url, "postgres://localhost/profile");
        assert_eq!(config.db_min_connections, None);
        assert_eq!(config.db_max_connections, Some(20));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_config_missing_database_url() {
        let vars: Vec<(String, String)> = vec![("ENV".to_string(), "server".to_string())];
        let config = envy::from_iter::<_, Config>(vars);
        assert!(config.is_err());
    }
}
