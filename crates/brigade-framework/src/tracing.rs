//! # Observability & Tracing
//!
//! [`setup_tracing`] installs structured logging for a whole session.
//!
//! The format hides the module prefix (`with_target(false)`) and is compact, so span
//! hierarchy shows inline (`seat_party:create: Created ...`).
//!
//! ## What Gets Traced
//!
//! - **Store operations**: Create and Action on every entity type, with the entity ID
//! - **Lifecycle changes**: dishes ready/died, courses completed/unlocked, tickets completed
//! - **Skipped work**: missing references and rejected reassignments at `warn`
//! - **Mistakes**: every ledger entry at `warn`
//!
//! ```bash
//! RUST_LOG=info cargo run                 # lifecycle only
//! RUST_LOG=debug cargo run                # payloads and no-op transitions
//! RUST_LOG=brigade::gate=trace cargo run  # one module, fully verbose
//! ```

/// Initializes the `tracing-subscriber` fmt layer, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

/// Like [`setup_tracing`] but safe to call more than once (tests, embedded use).
/// Returns `false` if a global subscriber was already installed.
pub fn try_setup_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
