//! Command-line flags shared by every service binary.

use crate::observability::{LogFormat, LogSettings};
use clap::{ArgAction, Args};
use std::path::PathBuf;

/// Logging flags. Boolean flags accept `--flag`, `--flag=true` and `--flag=false`.
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Emit debug-level log messages
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub verbose: bool,

    /// Write log output to the file named by --log-file / LOGF instead of stdout
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub flog: bool,

    /// Log file used with --flog
    #[arg(long = "log-file", env = "LOGF", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl LogArgs {
    pub fn settings(&self) -> LogSettings {
        LogSettings {
            verbose: self.verbose,
            to_file: self.flog,
            file: self.log_file.clone(),
            format: self.log_format,
        }
    }
}
