//! Tracing setup for the pftracker binary

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Default filter directive when `RUST_LOG` does not mention the crate
const DEFAULT_DIRECTIVE: &str = "pftracker=warn";

/// Initializes the global tracing subscriber, writing to stderr.
///
/// `verbose` raises the crate level to `debug`. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let directive = if verbose {
            "pftracker=debug"
        } else {
            DEFAULT_DIRECTIVE
        };

        let filter = match directive.parse() {
            Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
            Err(_) => EnvFilter::from_default_env(),
        };

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init_tracing(false);
        super::init_tracing(true);
    }
}
