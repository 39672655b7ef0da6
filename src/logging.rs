//! Diagnostic logging setup.
//!
//! Everything logs through the `log` facade; this installs the
//! `env_logger` backend writing to stderr so stdout only carries the table.

use log::LevelFilter;

/// Level for a given number of `-v` flags.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the logger. `RUST_LOG`, when set, takes precedence over `verbose`.
pub fn init(verbose: u8) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for_verbosity(verbose))
        .target(env_logger::Target::Stderr)
        .parse_default_env();

    // A second init (e.g. from tests) is harmless.
    let _ = builder.try_init();
}
