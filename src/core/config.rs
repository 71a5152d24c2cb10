use std::path::PathBuf;

/// Server configuration
///
/// Every item can be overridden through the environment:
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/fleet-ledger | local database, logs |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | TABLE_API_URL | http://localhost:4000 | managed table service |
/// | TABLE_API_KEY | (empty) | bearer key for the table service |
/// | FLEET_NAME | Fleet Ledger | operator name on statements |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | REQUEST_TIMEOUT_MS | 30000 | remote call timeout |
/// | PROBE_TIMEOUT_MS | 1500 | connectivity probe timeout |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the fallback database and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Base URL of the remote table service
    pub table_api_url: String,
    /// API key for the remote table service
    pub table_api_key: String,
    /// Operator name, printed on exported statements
    pub fleet_name: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Remote request timeout (milliseconds)
    pub request_timeout_ms: u64,
    /// Connectivity probe timeout (milliseconds)
    pub probe_timeout_ms: u64,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/fleet-ledger".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            table_api_url: std::env::var("TABLE_API_URL")
                .unwrap_or_else(|_| "http://localhost:4000".into()),
            table_api_key: std::env::var("TABLE_API_KEY").unwrap_or_default(),
            fleet_name: std::env::var("FLEET_NAME").unwrap_or_else(|_| "Fleet Ledger".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            probe_timeout_ms: std::env::var("PROBE_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1500),
        }
    }

    /// Override work dir and port, used by tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Directory for the local fallback database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Directory for log files
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Make sure the work directory layout exists
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
