//! tracing-subscriber setup for the `todo` binary.
//!
//! Output goes to stderr so it never mixes with the rendered list on stdout.
//! `RUST_LOG` overrides the built-in directives.

use tracing_subscriber::EnvFilter;

fn build_filter_directives(verbose: bool) -> Vec<&'static str> {
    if verbose {
        vec!["warn", "todo_app=debug", "todo_core=debug"]
    } else {
        vec!["warn"]
    }
}

/// Install the global subscriber. Call once, before bootstrapping the app.
pub fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(build_filter_directives(verbose).join(",")));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
