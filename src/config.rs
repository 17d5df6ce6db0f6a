//! Configuration for the export tools
//!
//! Settings are read once at startup from a line-oriented `.env` file and
//! turned into explicit structs that are passed by reference to every
//! component. Nothing here reads the process environment.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default `.env` location, relative to the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Largest page the analytics engine serves per results request
pub const DEFAULT_PAGE_SIZE: u64 = 500;

/// Default SQL Server port
pub const DEFAULT_SQL_PORT: u16 = 1433;

/// Default output directory for the relational tool
pub const DEFAULT_OUTPUT_DIR: &str = "./exports";

// ============================================================================
// .env file
// ============================================================================

/// Parsed contents of a `.env` file
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    /// Where the values were loaded from (reported in errors)
    path: PathBuf,
    values: HashMap<String, String>,
}

impl EnvFile {
    /// Load and parse a `.env` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::EnvFileNotFound { path });
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Self {
            values: parse_env(&content),
            path,
        })
    }

    /// Build from an in-memory string
    pub fn from_str_at(content: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            values: parse_env(content),
        }
    }

    /// Path the file was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a value; empty values are treated as absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Get a value or a default
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Fail with every missing key at once
    pub fn require(&self, keys: &[&str]) -> Result<()> {
        let missing: Vec<String> = keys
            .iter()
            .filter(|k| self.get(k).is_none())
            .map(|k| (*k).to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingConfigKeys {
                keys: missing,
                path: self.path.clone(),
            })
        }
    }

    /// Number of parsed keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the file had no keys
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse `KEY=value` lines. Comments, blank lines and lines without `=`
/// are skipped; one layer of matching quotes is stripped from values.
pub fn parse_env(content: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        values.insert(key.trim().to_string(), strip_quotes(value.trim()).to_string());
    }
    values
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Resolve a relative path (`--env`, output files) against the working directory
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

// ============================================================================
// Dremio
// ============================================================================

/// Connection settings for the REST analytics engine
#[derive(Clone)]
pub struct DremioConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Personal access token sent as a bearer token
    pub api_key: String,
    /// Rows requested per results page
    pub page_size: u64,
}

impl DremioConfig {
    /// Required keys
    pub const REQUIRED: [&'static str; 2] = ["DREMIO_BASE_URL", "DREMIO_API_KEY"];

    /// Create a config directly
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Validate and extract from a parsed `.env` file
    pub fn from_env(env: &EnvFile) -> Result<Self> {
        env.require(&Self::REQUIRED)?;

        let mut config = Self::new(
            env.get("DREMIO_BASE_URL").unwrap_or_default(),
            env.get("DREMIO_API_KEY").unwrap_or_default(),
        );

        if let Some(raw) = env.get("DREMIO_PAGE_SIZE") {
            let page_size: u64 = raw
                .parse()
                .map_err(|_| Error::invalid_value("DREMIO_PAGE_SIZE", "expected a number"))?;
            if page_size == 0 || page_size > DEFAULT_PAGE_SIZE {
                return Err(Error::invalid_value(
                    "DREMIO_PAGE_SIZE",
                    format!("must be between 1 and {DEFAULT_PAGE_SIZE}"),
                ));
            }
            config.page_size = page_size;
        }

        Ok(config)
    }
}

impl std::fmt::Debug for DremioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DremioConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"****")
            .field("page_size", &self.page_size)
            .finish()
    }
}

// ============================================================================
// SQL Server
// ============================================================================

/// Which relational engine the view store talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlBackend {
    /// SQL Server over TDS
    #[default]
    Mssql,
    /// Local DuckDB database file
    Duckdb,
}

impl std::str::FromStr for SqlBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mssql" | "sqlserver" | "sql_server" => Ok(Self::Mssql),
            "duckdb" => Ok(Self::Duckdb),
            other => Err(Error::invalid_value(
                "SQL_BACKEND",
                format!("unknown backend '{other}' (expected mssql or duckdb)"),
            )),
        }
    }
}

/// Connection settings for the relational database
#[derive(Clone)]
pub struct SqlServerConfig {
    pub backend: SqlBackend,
    pub server: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub trust_server_certificate: bool,
    /// Directory for `export` without an explicit output and for `batch-export`
    pub output_dir: PathBuf,
}

impl SqlServerConfig {
    /// Required keys for SQL Server
    pub const REQUIRED: [&'static str; 4] = ["SQL_SERVER", "SQL_DATABASE", "SQL_USER", "SQL_PASSWORD"];

    /// Validate and extract from a parsed `.env` file
    pub fn from_env(env: &EnvFile) -> Result<Self> {
        let backend: SqlBackend = env.get_or("SQL_BACKEND", "mssql").parse()?;

        match backend {
            SqlBackend::Mssql => env.require(&Self::REQUIRED)?,
            SqlBackend::Duckdb => env.require(&["SQL_DATABASE"])?,
        }

        let port_raw = env.get("SQL_PORT");
        let port = match port_raw {
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::invalid_value("SQL_PORT", format!("'{raw}' is not a port")))?,
            None => DEFAULT_SQL_PORT,
        };

        Ok(Self {
            backend,
            server: env.get_or("SQL_SERVER", "").to_string(),
            port,
            database: env.get_or("SQL_DATABASE", "").to_string(),
            user: env.get_or("SQL_USER", "").to_string(),
            password: env.get_or("SQL_PASSWORD", "").to_string(),
            trust_server_certificate: parse_bool(env.get_or("TRUST_SERVER_CERTIFICATE", "Yes")),
            output_dir: PathBuf::from(env.get_or("OUTPUT_DIR", DEFAULT_OUTPUT_DIR)),
        })
    }

    /// Short description for logs (no credentials)
    pub fn describe(&self) -> String {
        match self.backend {
            SqlBackend::Mssql => format!("{}:{} / {}", self.server, self.port, self.database),
            SqlBackend::Duckdb => format!("duckdb:{}", self.database),
        }
    }
}

impl std::fmt::Debug for SqlServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlServerConfig")
            .field("backend", &self.backend)
            .field("server", &self.server)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"****")
            .field("trust_server_certificate", &self.trust_server_certificate)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "yes" | "true" | "1" | "on"
    )
}
