use crate::adapters::DatabaseConfig;
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::Path;

pub const IN_MEMORY_DBNAME: &str = ":memory:";

#[derive(Debug, Clone, Parser)]
#[command(name = "mechanic-shop")]
#[command(about = "Console front-end for the mechanic shop database")]
pub struct CliConfig {
    /// Database name, stored as <data_dir>/<DBNAME>.db (":memory:" for a throwaway session)
    pub dbname: String,

    /// Database port, kept in the connection label
    pub port: u16,

    /// Database user, kept in the connection label
    pub user: String,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn database_config(&self, data_dir: &str) -> DatabaseConfig {
        if self.dbname == IN_MEMORY_DBNAME {
            DatabaseConfig::SqliteInMemory
        } else {
            DatabaseConfig::SqliteFile(Path::new(data_dir).join(format!("{}.db", self.dbname)))
        }
    }

    /// `user@dbname:port`, the identity logged on connect.
    pub fn connection_label(&self) -> String {
        format!("{}@{}:{}", self.user, self.dbname, self.port)
    }
}

/// Missing or surplus positionals. The binary prints the usage and returns
/// normally for these; every other parse error keeps clap's own exit.
pub fn is_argument_count_error(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::MissingRequiredArgument
            | ErrorKind::UnknownArgument
            | ErrorKind::TooManyValues
            | ErrorKind::WrongNumberOfValues
    )
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("dbname", &self.dbname)?;
        validate_non_empty_string("user", &self.user)?;

        if self.dbname != IN_MEMORY_DBNAME
            && self.dbname.contains(|c: char| c == '/' || c == '\\' || c == '\0')
        {
            return Err(ShopError::InvalidConfigValueError {
                field: "dbname".to_string(),
                value: self.dbname.clone(),
                reason: "Database name cannot contain path separators".to_string(),
            });
        }

        if self.port == 0 {
            return Err(ShopError::InvalidConfigValueError {
                field: "port".to_string(),
                value: self.port.to_string(),
                reason: "Port must be between 1 and 65535".to_string(),
            });
        }

        Ok(())
    }
}
