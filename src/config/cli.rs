use std::path::PathBuf;

use clap::{Args, ValueHint, builder::BoolishValueParser};

/// Settings overrides accepted by every console command.
#[derive(Debug, Args, Default, Clone)]
pub struct ConfigOverrides {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "GRATISWAG_CONFIG_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub config_file: Option<PathBuf>,

    /// Base URL of the platform REST API.
    #[arg(
        long = "api-url",
        env = "GRATISWAG_API_URL",
        value_name = "URL",
        global = true
    )]
    pub api_url: Option<String>,

    /// Override the request timeout.
    #[arg(long = "api-timeout-seconds", value_name = "SECONDS", global = true)]
    pub api_timeout_seconds: Option<u64>,

    /// Override the number of rows per list page.
    #[arg(long = "page-size", value_name = "COUNT", global = true)]
    pub page_size: Option<u64>,

    /// Override the largest image accepted by forms, in bytes.
    #[arg(long = "uploads-max-image-bytes", value_name = "BYTES", global = true)]
    pub max_image_bytes: Option<u64>,

    /// Override where the signed-in session is kept.
    #[arg(
        long = "session-file",
        env = "GRATISWAG_SESSION_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub session_file: Option<PathBuf>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}
