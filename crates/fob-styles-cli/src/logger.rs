//! Logging setup for the fob-styles CLI.
//!
//! Logs go to stderr so stdout carries nothing but the compiled JSON.
//!
//! The level is chosen in this order:
//! 1. `--verbose`: DEBUG for the fob-styles crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. INFO for the fob-styles crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "fob_styles=debug,fob_styles_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "fob_styles=info,fob_styles_cli=info";

/// Filter for the given flags, falling back to `RUST_LOG`
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    /// Directives of `filter`, independent of display order
    fn directives(filter: &EnvFilter) -> Vec<String> {
        let mut directives: Vec<String> = filter
            .to_string()
            .split(',')
            .map(str::to_string)
            .collect();
        directives.sort();
        directives
    }

    #[test]
    fn verbose_filter_enables_debug() {
        let filter = build_filter(true, false);
        assert_eq!(
            directives(&filter),
            vec!["fob_styles=debug", "fob_styles_cli=debug"]
        );
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn quiet_filter_only_errors() {
        let filter = build_filter(false, true);
        assert_eq!(directives(&filter), vec!["error"]);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn verbose_wins_over_quiet() {
        let filter = build_filter(true, true);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
