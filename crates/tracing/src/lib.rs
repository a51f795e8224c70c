//! Tracing setup for the etheroll-rs binaries.
//!
//! Build a [`RollTracer`] with one stdout layer and an optional file layer, then call
//! [`Tracer::init`] once at startup. Library crates only emit events through the `tracing`
//! macros and never install a subscriber themselves.
// Mostly taken from [reth](https://github.com/paradigmxyz/reth)

use std::{
    fmt::{self, Display},
    path::PathBuf,
    str::FromStr,
};

use clap::ValueEnum;
use eyre::Result;
use tracing::Subscriber;
use tracing_subscriber::{
    filter::Directive, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

// Re-export tracing crates
pub use tracing;
pub use tracing_subscriber;

/// Guard that flushes the non-blocking file writer when dropped. Keep it alive for as long
/// as the program runs.
pub use tracing_appender::non_blocking::WorkerGuard as FileWorkerGuard;

/// A boxed tracing [Layer].
pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// The format logs are written in.
#[derive(Debug, Copy, Clone, ValueEnum, Eq, PartialEq)]
pub enum LogFormat {
    /// Structured JSON, one object per line.
    Json,
    /// `key=value` pairs, see <https://brandur.org/logfmt>.
    LogFmt,
    /// Human readable terminal output.
    Terminal,
}

impl LogFormat {
    /// Builds the layer for this format, filtered by `filter`. When `writer` is set the layer
    /// writes to it instead of stdout and never emits ANSI escape codes.
    pub fn apply<S>(
        &self,
        filter: EnvFilter,
        color: Option<String>,
        writer: Option<tracing_appender::non_blocking::NonBlocking>,
    ) -> BoxedLayer<S>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let ansi = writer.is_none() &&
            color.map(|color| color != "never").unwrap_or(false) &&
            std::env::var("RUST_LOG_STYLE").map(|style| style != "never").unwrap_or(true);

        match (self, writer) {
            (LogFormat::Json, Some(writer)) => {
                tracing_subscriber::fmt::layer().json().with_writer(writer).with_filter(filter).boxed()
            }
            (LogFormat::Json, None) => {
                tracing_subscriber::fmt::layer().json().with_ansi(ansi).with_filter(filter).boxed()
            }
            (LogFormat::LogFmt, Some(writer)) => {
                tracing_logfmt::builder().layer().with_writer(writer).with_filter(filter).boxed()
            }
            (LogFormat::LogFmt, None) => tracing_logfmt::layer().with_filter(filter).boxed(),
            (LogFormat::Terminal, Some(writer)) => tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .with_filter(filter)
                .boxed(),
            (LogFormat::Terminal, None) => tracing_subscriber::fmt::layer()
                .with_ansi(ansi)
                .with_target(false)
                .without_time()
                .with_filter(filter)
                .boxed(),
        }
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::LogFmt => write!(f, "logfmt"),
            LogFormat::Terminal => write!(f, "terminal"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "logfmt" => Ok(LogFormat::LogFmt),
            "terminal" => Ok(LogFormat::Terminal),
            _ => Err(format!("Invalid log format: {s}")),
        }
    }
}

/// Configuration of a single output layer.
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    /// Creates a new [LayerInfo].
    ///
    /// `default_directive` applies when `RUST_LOG` is unset, `filters` is a comma separated
    /// list of extra directives (e.g. `etheroll_decoder=trace`).
    pub fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }

    fn env_filter(&self) -> Result<EnvFilter> {
        build_env_filter(Some(self.default_directive.parse()?), &self.filters)
    }
}

/// Where the file layer writes to.
#[derive(Debug, Clone)]
pub struct FileInfo {
    dir: PathBuf,
    file_name: String,
}

impl FileInfo {
    /// Creates a new [FileInfo] writing `dir/file_name`.
    pub fn new(dir: PathBuf, file_name: impl Into<String>) -> Self {
        Self { dir, file_name: file_name.into() }
    }
}

/// Installs a global tracing subscriber.
pub trait Tracer {
    /// Initializes the global subscriber. The returned guard (if any) must be kept alive.
    fn init(self) -> Result<Option<FileWorkerGuard>>;
}

/// The tracer used by the `etheroll` binary: stdout plus an optional log file.
#[derive(Debug, Clone)]
pub struct RollTracer {
    stdout: LayerInfo,
    file: Option<(LayerInfo, FileInfo)>,
}

impl Default for RollTracer {
    fn default() -> Self {
        Self {
            stdout: LayerInfo::new(
                LogFormat::Terminal,
                "warn".to_string(),
                String::new(),
                Some("always".to_string()),
            ),
            file: None,
        }
    }
}

impl RollTracer {
    /// Creates a tracer with a terminal stdout layer at `warn`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stdout layer.
    pub fn with_stdout(mut self, config: LayerInfo) -> Self {
        self.stdout = config;
        self
    }

    /// Adds a file layer.
    pub fn with_file(mut self, config: LayerInfo, file: FileInfo) -> Self {
        self.file = Some((config, file));
        self
    }
}

impl Tracer for RollTracer {
    fn init(self) -> Result<Option<FileWorkerGuard>> {
        let mut layers: Vec<BoxedLayer<Registry>> = Vec::new();

        layers.push(self.stdout.format.apply(
            self.stdout.env_filter()?,
            self.stdout.color.clone(),
            None,
        ));

        let guard = match self.file {
            Some((config, file)) => {
                std::fs::create_dir_all(&file.dir)?;
                let appender = tracing_appender::rolling::never(&file.dir, &file.file_name);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                layers.push(config.format.apply(config.env_filter()?, None, Some(writer)));
                Some(guard)
            }
            None => None,
        };

        tracing_subscriber::registry().with(layers).try_init()?;
        Ok(guard)
    }
}

/// Builds an [EnvFilter] from `RUST_LOG` (falling back to `default_directive`) plus the
/// comma separated `directives`.
pub fn build_env_filter(
    default_directive: Option<Directive>,
    directives: &str,
) -> Result<EnvFilter> {
    let env_filter = if let Some(default_directive) = default_directive {
        EnvFilter::builder().with_default_directive(default_directive).from_env_lossy()
    } else {
        EnvFilter::builder().from_env_lossy()
    };

    directives.split(',').map(str::trim).filter(|d| !d.is_empty()).try_fold(
        env_filter,
        |env_filter, directive| {
            let directive: Directive = directive.parse()?;
            Ok(env_filter.add_directive(directive))
        },
    )
}
