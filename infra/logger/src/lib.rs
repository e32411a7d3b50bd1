//! # Logger
//!
//! Diagnostic logging for the table generator. Console output goes to stderr
//! so it never mixes with generated data; an optional log file
//! (`<dir>/<name>.log`, appended to on every run) can be added for unattended runs.
//!
//! * `RUST_LOG` still overrides the configured level.
//! * Use [`LoggerBuilder::env_filter`] for module-directed defaults
//!   (e.g., `"pcitab_ids=debug"`).
//!
//! ## Example
//!
//! ```rust
//! # use pcitab_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("pcitab")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::LoggerError;
pub use tracing::level_filters::LevelFilter;

use crate::error::LoggerErrorExt;
use private::Sealed;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            path: None,
            level: LevelFilter::INFO,
            env_filter: None,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}

/// A builder for configuring and initializing the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName> {
    config: LoggerConfig,
    name: N,
}

impl LoggerBuilder<NoName> {
    /// Sets the logger name, also used as the log file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { name: WithName(name.into()), config: self.config }
    }
}

impl LoggerBuilder<WithName> {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Adds an explicit env filter (e.g., `pcitab=debug`). `RUST_LOG` is ignored when set.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    /// Enables or disables the stderr layer.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Additionally writes plain-text logs into the directory `path`.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = Some(path.into());
        self
    }

    /// Consumes the builder and installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive until exit so file output is flushed.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber is already set,
    /// [`LoggerError::Io`] or [`LoggerError::Appender`] if the log file cannot be created, and
    /// [`LoggerError::InvalidConfiguration`] for invalid builder settings.
    pub fn init(self) -> Result<Logger, LoggerError> {
        validate_config(&self.config, &self.name.0)?;

        let env_filter = build_env_filter(&self.config)?;
        let mut layers = Vec::new();

        if self.config.console {
            layers.push(
                layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .boxed(),
            );
        }

        let guard = if let Some(path) = self.config.path {
            fs::create_dir_all(&path)
                .context(format!("Failed to create log directory {}", path.display()))?;

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(&self.name.0)
                .filename_suffix(LOG_FILE_SUFFIX)
                .build(path)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            layers.push(layer().with_writer(non_blocking).with_ansi(false).boxed());
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

/// A handle to the initialized logging system.
#[must_use = "Dropping this handle stops the background log file writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`].
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName }
    }

    /// Returns the file writer guard, present only when file output is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

/// Maps a `-v` count onto a level: 0 = info, 1 = debug, 2+ = trace.
#[must_use]
pub const fn verbosity_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn validate_config(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if config.path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
        return Err(LoggerError::InvalidConfiguration {
            message: "Log file directory cannot be empty".into(),
            context: None,
        });
    }

    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            })
        },
    )
}
