//! Telemetry helpers for applications embedding `chart3d-rs`.
//!
//! The pipeline only emits `tracing` events; installing a subscriber is left
//! to the host. `init_default_tracing` is a convenience for demos and tests.

/// Directive used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "chart3d_rs=info";

/// Initializes a compact `tracing` subscriber when the `telemetry` feature is
/// enabled, falling back to [`DEFAULT_FILTER`].
///
/// Returns `false` when the feature is disabled or a global subscriber was
/// already installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-provided fallback directive,
/// e.g. `"chart3d_rs=trace"` to see per-axis resolution detail.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
