pub mod build_info;

use std::sync::Once;

const DEFAULT_DIRECTIVE: &str = "fleet_ledger=info";

static TRACING_INIT: Once = Once::new();

/// Installs the global `fmt` subscriber, filtered by `RUST_LOG` plus the crate default.
///
/// Logs go to stderr so script-mode stdout stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse() {
            filter = filter.add_directive(directive);
        }

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
