use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human readable lines with full timestamps.
    #[default]
    Text,
    /// One flattened JSON object per event.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Error)]
pub enum LogFileError {
    #[error("log file output requested but no path is set (use --log-file or LOGF)")]
    MissingPath,

    #[error("failed to open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct LogSettings {
    pub verbose: bool,
    pub to_file: bool,
    pub file: Option<PathBuf>,
    pub format: LogFormat,
}

impl LogSettings {
    /// Filter used when `RUST_LOG` is not set.
    pub fn default_directive(&self) -> &'static str {
        if self.verbose {
            "debug,lapin=info,amq_protocol=info,hyper=info"
        } else {
            "info"
        }
    }

    pub fn target(&self) -> Result<LogTarget, LogFileError> {
        if !self.to_file {
            return Ok(LogTarget::Stdout);
        }

        match &self.file {
            Some(path) if !path.as_os_str().is_empty() => Ok(LogTarget::File(path.clone())),
            _ => Err(LogFileError::MissingPath),
        }
    }
}

/// Open (or create) a log file for appending.
pub fn open_log_file(path: &Path) -> Result<File, LogFileError> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o664);
    }

    options.open(path).map_err(|source| LogFileError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Where log output goes once file handling has been resolved.
#[derive(Debug)]
pub struct LogOutput {
    pub target: LogTarget,
    file: Option<File>,
    /// Why file output was requested but stdout is used instead.
    pub fallback: Option<LogFileError>,
}

/// Resolve the settings to an open file or stdout, falling back to stdout
/// when the file is missing or can't be opened.
pub fn resolve_output(settings: &LogSettings) -> LogOutput {
    let opened = settings.target().and_then(|target| match target {
        LogTarget::Stdout => Ok((target, None)),
        LogTarget::File(path) => {
            open_log_file(&path).map(|file| (LogTarget::File(path), Some(file)))
        }
    });

    match opened {
        Ok((target, file)) => LogOutput {
            target,
            file,
            fallback: None,
        },
        Err(e) => LogOutput {
            target: LogTarget::Stdout,
            file: None,
            fallback: Some(e),
        },
    }
}

/// Install the global tracing subscriber.
///
/// When file output is requested but the file can't be opened, output falls
/// back to stdout and the failure is logged as the first event. The returned
/// guard flushes buffered output on drop; keep it alive for the whole of `main`.
pub fn init_tracing(service_name: &str, settings: &LogSettings) -> WorkerGuard {
    let output = resolve_output(settings);

    let to_stdout = output.target == LogTarget::Stdout;
    let (writer, guard) = match output.file {
        Some(file) => tracing_appender::non_blocking(file),
        None => tracing_appender::non_blocking(io::stdout()),
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.default_directive()));

    let json_layer = (settings.format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(writer.clone())
    });
    let text_layer = (settings.format == LogFormat::Text).then(|| {
        tracing_subscriber::fmt::layer()
            .with_ansi(to_stdout)
            .with_target(false)
            .with_writer(writer)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    match (&output.target, &output.fallback) {
        (LogTarget::File(path), _) => {
            tracing::info!(path = %path.display(), "Check log file for entries");
        }
        (LogTarget::Stdout, Some(e)) => {
            tracing::error!(error = %e, "Failed to open log file, logging to stdout");
        }
        (LogTarget::Stdout, None) => {}
    }

    tracing::info!(
        service = %service_name,
        verbose = settings.verbose,
        flog = settings.to_file,
        "Log configuration"
    );

    guard
}
