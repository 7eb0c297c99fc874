//! Logger builder implementation

use tracing::Subscriber;
use tracing::span::EnteredSpan;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug, Clone)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard that keeps the logger alive.
///
/// For a scoped logger, dropping the guard restores the previous
/// subscriber. For a global one it only closes the root span.
#[must_use = "dropping the guard ends the logger's root span"]
#[derive(Debug)]
pub struct LoggerGuard {
    root: Option<EnteredSpan>,
    scope: Option<DefaultGuard>,
}

impl LoggerGuard {
    /// A guard holding nothing
    pub fn noop() -> Self {
        Self {
            root: None,
            scope: None,
        }
    }

    /// Whether this guard scopes a thread-local subscriber
    pub fn is_scoped(&self) -> bool {
        self.scope.is_some()
    }
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        // the root span must close while its subscriber is still installed
        drop(self.root.take());
        drop(self.scope.take());
    }
}

impl LoggerBuilder {
    /// Create builder from config
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// The configuration being built
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build and install the logger as the global subscriber.
    ///
    /// # Errors
    ///
    /// [`LogError::Filter`] for a bad filter directive,
    /// [`LogError::AlreadyInitialized`] when a global subscriber exists.
    pub fn build(self) -> LogResult<LoggerGuard> {
        self.subscriber()?
            .try_init()
            .map_err(|e| LogError::AlreadyInitialized(e.to_string()))?;

        Ok(LoggerGuard {
            root: self.root_span(),
            scope: None,
        })
    }

    /// Build the logger for the current thread only, until the guard drops.
    ///
    /// # Errors
    ///
    /// [`LogError::Filter`] for a bad filter directive.
    pub fn build_scoped(self) -> LogResult<LoggerGuard> {
        let scope = tracing::subscriber::set_default(self.subscriber()?);

        Ok(LoggerGuard {
            root: self.root_span(),
            scope: Some(scope),
        })
    }

    fn subscriber(&self) -> LogResult<impl Subscriber + Send + Sync + 'static> {
        let filter = EnvFilter::try_new(&self.config.level)
            .map_err(|e| LogError::filter(&self.config.level, e.to_string()))?;

        Ok(Registry::default().with(filter).with(self.fmt_layer()))
    }

    fn fmt_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let display = &self.config.display;
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(display.colors)
            .with_target(display.target)
            .with_file(display.source)
            .with_line_number(display.source);

        match (self.config.format, display.time) {
            (Format::Pretty, true) => layer.pretty().boxed(),
            (Format::Pretty, false) => layer.pretty().without_time().boxed(),
            (Format::Compact, true) => layer.compact().boxed(),
            (Format::Compact, false) => layer.compact().without_time().boxed(),
            (Format::Json, true) => layer.json().boxed(),
            (Format::Json, false) => layer.json().without_time().boxed(),
        }
    }

    fn root_span(&self) -> Option<EnteredSpan> {
        self.config
            .service
            .as_deref()
            .map(|service| tracing::info_span!("app", service).entered())
    }
}
