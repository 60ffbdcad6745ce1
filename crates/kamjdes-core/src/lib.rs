mod app_config;
mod config;
pub mod entities;
pub mod multi_value;
pub mod source;
pub mod tables;
pub mod text;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use entities::{Coordinates, Entity, EntityKind};
pub use multi_value::{split_normalized_display, split_raw, MultiValueField};
pub use source::{distinct_display_values, EntitySource, SnapshotSource, SourceError};
pub use tables::{
    load_tables, load_tables_or_builtin, CuisineCategory, DiscoveryTables, LocationGroup,
    QuickFilter,
};
pub use text::{compare_cs, normalize, title_case};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read discovery tables {path}: {source}")]
    TablesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse discovery tables: {0}")]
    TablesFileParse(#[source] serde_yaml::Error),

    #[error("discovery tables validation failed: {0}")]
    Validation(String),
}
