use clap::Parser;
use std::path::PathBuf;
use userbase_core::LoggingConfig;

/// Saves one demo user to a SQLite database and prints it before and after.
#[derive(Debug, Clone, Parser)]
#[command(name = "userbase", version, long_about = None)]
pub struct Config {
    /// SQLite database file (created when missing)
    #[arg(long, env = "USERBASE_DB_PATH", default_value = "userbase.sqlite3")]
    pub db_path: PathBuf,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, env = "USERBASE_LOG_LEVEL", default_value = "error")]
    pub log_level: String,

    /// Absolute directory for rolling log files; logs go to stderr when unset
    #[arg(long, env = "USERBASE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Username of the demo record (at most 20 characters)
    #[arg(long, default_value = "grahamm2")]
    pub username: String,

    /// Password of the demo record (at most 60 characters)
    #[arg(long, default_value = "password1")]
    pub password: String,
}

impl Config {
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            log_dir: self.log_dir.clone(),
        }
    }
}
