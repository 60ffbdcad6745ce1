use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// JSON snapshot of the data layer's entity collections.
    pub snapshot_path: PathBuf,
    /// Optional discovery tables override; `None` means the built-in tables.
    pub tables_path: Option<PathBuf>,
    pub default_radius_km: f64,
    /// Minimum members a group needs before grouped listings show it.
    pub group_min_count: usize,
    pub geolocation_timeout_secs: u64,
}
