//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide subscriber. Store actors log with a
//! `slice` field instead of module paths, so the output hides targets.
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: start, reset, shutdown with the last issued version
//! - **Invocations**: dispatch (payload at `debug`), commit (`info`), rejection (`warn`)
//! - **Stale results**: discarded settlements at `debug`, with both versions
//! - **HTTP**: method, path and status of each call at `debug`
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info admin-console signups list
//! RUST_LOG=debug admin-console po-team list
//! RUST_LOG=resource_slice=debug,admin_console=info admin-console dashboard
//! ```
//!
//! With `RUST_LOG=info` a delete flow reads:
//!
//! ```text
//! INFO Committed slice="po_team.delete" version=1 status=Succeeded
//! INFO Committed slice="po_team.list" version=2 status=Succeeded
//! ```
//!
//! Logs go to stderr so command output on stdout stays machine-readable.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
