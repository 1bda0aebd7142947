pub mod app_config;
pub mod config;
pub mod layouts;
pub mod records;

pub use app_config::{AppConfig, ExtractionLimits};
pub use config::{load_app_config, load_app_config_from_env};
pub use layouts::{
    builtin_layouts, load_layouts, load_layouts_or_builtin, LayoutConfig, LayoutsFile,
};
pub use records::{Coordinates, LocationRecord, MovieMeta, PageAuditSnapshot};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read layouts file {path}: {source}")]
    LayoutsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse layouts file: {0}")]
    LayoutsFileParse(#[from] serde_yaml::Error),

    #[error("layout validation error: {0}")]
    Validation(String),
}
