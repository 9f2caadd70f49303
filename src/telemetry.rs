//! Opt-in tracing setup for hosts embedding `bar-chart-rs`.
//!
//! The crate itself only emits `tracing` events. Hosts that already own a
//! subscriber can ignore this module entirely.

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "bar_chart_rs=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG` (or
/// [`DEFAULT_FILTER`]).
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-provided fallback filter.
#[must_use]
pub fn init_tracing_with_filter(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(fallback_filter));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
