use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Counters for the stored-vector cache during a recommendation pass.
///
/// A hit is a stored vector reused as-is, a miss is a vector regenerated
/// from text. Persist failures count best-effort writes that were skipped.
#[derive(Debug, Default)]
pub struct VectorCacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    persist_failures: AtomicU64,
}

impl VectorCacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_persist_failure(&self) {
        self.persist_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn persist_failures(&self) -> u64 {
        self.persist_failures.load(Ordering::Relaxed)
    }

    /// Hit rate as a percentage (0.0-100.0)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }
}

/// Log vector cache metrics at debug level.
///
/// Usage:
/// ```rust,ignore
/// let metrics = VectorCacheMetrics::new();
/// log_cache_metrics!(&metrics, "related");
/// ```
#[macro_export]
macro_rules! log_cache_metrics {
    ($metrics:expr, $name:expr) => {
        tracing::debug!(
            operation = $name,
            cache_hits = $metrics.hits(),
            cache_misses = $metrics.misses(),
            cache_hit_rate = $metrics.hit_rate(),
            persist_failures = $metrics.persist_failures(),
            "vector_cache_metrics"
        );
    };
}

/// Trace-level elapsed time since `$start`, with optional extra fields.
///
/// ```rust,ignore
/// trace_time!(start, "open_database");
/// trace_time!(start, "related", path = doc.path.as_str());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Env var consulted when `RUST_LOG` is unset
pub const LOG_ENV: &str = "SIMBLOG_LOG";

const CRATES: [&str; 2] = ["simblog", "simblog_core"];

/// Filter directives for the CLI flags. A bare level applies to both
/// simblog crates; anything containing `=` is passed through.
pub fn default_directives(verbose: bool, log_level: Option<&str>) -> String {
    let level = match log_level.map(str::trim).filter(|l| !l.is_empty()) {
        Some(directive) if directive.contains('=') => return directive.to_string(),
        Some(level) => level,
        None if verbose => "debug",
        None => "warn",
    };
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber: compact or JSON lines on stderr.
///
/// `RUST_LOG`, then `SIMBLOG_LOG`, override the flag-derived filter.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, log_level)));

    let json = log_json.then(|| {
        fmt::layer()
            .json()
            .with_current_span(false)
            .with_writer(std::io::stderr)
    });
    let compact = (!log_json).then(|| {
        fmt::layer()
            .compact()
            .with_target(false)
            .with_ansi(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(compact)
        .try_init()?;
    Ok(())
}
