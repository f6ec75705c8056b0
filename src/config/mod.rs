use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_time;
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable read for the SMTP password when the config has none.
pub const SMTP_PASSWORD_ENV: &str = "RATTENDANCE_SMTP_PASSWORD";

/// Upper bound for `cooldown_minutes` (one day).
pub const MAX_COOLDOWN_MINUTES: i64 = 1440;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: String,
    /// Production lines served by this instance.
    pub lines: Vec<String>,
    /// Minimum spacing between two accepted check-ins of one operator.
    pub cooldown_minutes: i64,
    pub log_level: String,
    pub server: ServerConfig,
    pub digest: DigestConfig,
    /// Outbound mail; digests are only logged when absent.
    pub mail: Option<MailConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Allowed CORS origin. Any origin when unset.
    pub cors_origin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Local wall-clock times (HH:MM) at which the daily digest is sent.
    pub times: Vec<String>,
    /// Lines included in the scheduled digest. Empty means all lines.
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
    pub from: String,
    pub to: Vec<String>,
}

fn default_smtp_port() -> u16 {
    587
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            cors_origin: None,
        }
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            times: vec!["07:02".to_string()],
            lines: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            lines: vec!["line1".to_string()],
            cooldown_minutes: 10,
            log_level: "info".to_string(),
            server: ServerConfig::default(),
            digest: DigestConfig::default(),
            mail: None,
        }
    }
}

impl MailConfig {
    /// Password from the config file, else from the environment.
    pub fn resolved_password(&self) -> Option<String> {
        self.password
            .clone()
            .or_else(|| std::env::var(SMTP_PASSWORD_ENV).ok())
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rattendance")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rattendance")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendance.sqlite")
    }

    /// Load configuration from the standard file, or defaults if not found.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        let cfg = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_yaml::from_str(&content)?
        } else {
            Config::default()
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.lines.is_empty() {
            return Err(AppError::Config("at least one line must be configured".into()));
        }
        for (i, l) in self.lines.iter().enumerate() {
            if l.trim().is_empty() {
                return Err(AppError::Config("line identifiers cannot be empty".into()));
            }
            if self.lines[..i].contains(l) {
                return Err(AppError::Config(format!("line '{l}' is listed twice")));
            }
        }
        if !(1..=MAX_COOLDOWN_MINUTES).contains(&self.cooldown_minutes) {
            return Err(AppError::Config(format!(
                "cooldown_minutes must be between 1 and {MAX_COOLDOWN_MINUTES}, got {}",
                self.cooldown_minutes
            )));
        }
        for l in &self.digest.lines {
            if !self.lines.contains(l) {
                return Err(AppError::Config(format!(
                    "digest line '{l}' is not a configured line"
                )));
            }
        }
        self.digest_times()?;
        Ok(())
    }

    /// Clamped to the accepted range, for configs built without `validate`.
    pub fn cooldown(&self) -> Duration {
        Duration::minutes(self.cooldown_minutes.clamp(1, MAX_COOLDOWN_MINUTES))
    }

    pub fn digest_times(&self) -> AppResult<Vec<NaiveTime>> {
        self.digest
            .times
            .iter()
            .map(|t| parse_time(t).ok_or_else(|| AppError::InvalidTime(t.clone())))
            .collect()
    }

    /// Lines covered by the scheduled digest.
    pub fn digest_lines(&self) -> Vec<String> {
        if self.digest.lines.is_empty() {
            self.lines.clone()
        } else {
            self.digest.lines.clone()
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}
