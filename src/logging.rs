use env_logger::{Builder, Env};
use log::LevelFilter;

/// Logger honouring `RUST_LOG` (default `warn`). `verbose` enables debug
/// output for this crate only, not for the HTTP stack underneath.
pub fn builder(verbose: bool, env: Env<'_>) -> Builder {
    let mut builder = Builder::from_env(env.default_filter_or("warn"));
    if verbose {
        builder.filter_module(env!("CARGO_CRATE_NAME"), LevelFilter::Debug);
    }
    builder
}

pub fn init(verbose: bool) {
    builder(verbose, Env::default()).init();
}
