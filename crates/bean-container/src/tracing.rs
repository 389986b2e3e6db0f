//! # Observability & Tracing
//!
//! The container reports everything through the `tracing` façade and installs
//! no subscriber of its own, so a host that never sets one up sees nothing.
//! That is the silent default: diagnostics are opt-in.
//!
//! ## Severity
//!
//! | Level | Used for |
//! |---|---|
//! | `error` | duplicate names, missing mandatory or by-name dependencies, failed lookups, non-settable tagged fields |
//! | `warn` | duplicate type registration, ambiguous interfaces, default-name collisions |
//! | `info` | registrations, lifecycle hooks, optional misses, start-up progress |
//! | `debug` | default values applied, per-field resolution, by-value registration |
//!
//! ## Usage Examples
//!
//! ```bash
//! # Registrations, hooks and problems
//! RUST_LOG=info cargo run -p bean-sample
//!
//! # Every field the resolver touches
//! RUST_LOG=debug cargo run -p bean-sample
//!
//! # Only the container, quietly otherwise
//! RUST_LOG=warn,bean_container=debug cargo run -p bean-sample
//! ```
//!
//! Log lines carry structured fields rather than formatted prose:
//!
//! ```text
//! INFO Registered bean bean="OrderService" bean_type=bean_sample::components::OrderService
//! WARN Interface has multiple implementations, injected the first registered bean="OrderService" field="inventory" ...
//! ```

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::EnvFilter;

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Panics if a global subscriber is already set; use [`try_setup_tracing`]
/// where that can happen.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false) // bean and bean_type fields identify the source
        .compact()
        .init();
}

/// Like [`setup_tracing`], but reports an already installed subscriber as an error.
pub fn try_setup_tracing() -> Result<(), TryInitError> {
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .finish()
        .try_init()
}
