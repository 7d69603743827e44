//! Tracing and logging (shared setup).

/// Initialize process-wide tracing/logging using `LOG_FORMAT` (default JSON).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use crate::tracing::LogFormat;
