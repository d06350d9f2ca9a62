use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Lifetime of a login session, in hours.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
    /// bcrypt cost used when hashing new passwords.
    #[serde(default = "default_password_cost")]
    pub password_cost: u32,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    /// Rows shown in "recent" listings on the dashboards.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}
fn default_session_ttl_hours() -> i64 {
    24 * 7
}
fn default_password_cost() -> u32 {
    10
}
fn default_separator_char() -> String {
    "-".to_string()
}
fn default_recent_limit() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self::with_database(db_path.to_string_lossy().to_string())
    }
}

impl Config {
    pub fn with_database(database: String) -> Self {
        Self {
            database,
            currency_symbol: default_currency_symbol(),
            session_ttl_hours: default_session_ttl_hours(),
            password_cost: default_password_cost(),
            separator_char: default_separator_char(),
            recent_limit: default_recent_limit(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("tradetracker")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".tradetracker")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("tradetracker.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("tradetracker.sqlite")
    }

    /// Session token file that lives next to the database.
    pub fn session_file(&self) -> PathBuf {
        PathBuf::from(format!("{}.session", self.database))
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = if let Some(name) = custom_name {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("tradetracker.sqlite")
        };

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config = Config::with_database(db_path.to_string_lossy().to_string());

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
            file.write_all(yaml.as_bytes())
                .map_err(|_| AppError::ConfigSave)?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.currency_symbol, "$");
        assert_eq!(cfg.session_ttl_hours, 168);
        assert_eq!(cfg.password_cost, 10);
        assert_eq!(cfg.session_file(), PathBuf::from("/tmp/x.sqlite.session"));
    }
}
