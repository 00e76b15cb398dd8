//! Installs a test-writer subscriber once per e2e binary. Set `RUST_LOG=serve=debug,tower_http=debug`
//! and run with `--nocapture` to see request traces.

use ctor::ctor;
use tracing_subscriber::EnvFilter;

#[ctor]
fn init_e2e_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("serve=warn")),
        )
        .with_test_writer()
        .try_init();
}
