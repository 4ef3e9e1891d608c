//! Shared tracing setup for processes embedding the cleanflow crates.

/// Initialize process-wide tracing (JSON, `RUST_LOG` filter, default `info`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
