//! Test-only: installs a tracing subscriber from `RUST_LOG` when the test binary starts.
//!
//! Add `mod init_logging;` to an integration test file to see the analyzer's and clients'
//! `tracing` output:
//!
//! ```bash
//! RUST_LOG=oneir=debug cargo test -p oneir -- --nocapture
//! ```

use ctor::ctor;
use tracing_subscriber::EnvFilter;

#[ctor]
fn init_test_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("oneir=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
