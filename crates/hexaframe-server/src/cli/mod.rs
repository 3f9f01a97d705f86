//! CLI argument definitions using the clap derive API.
//!
//! No business logic lives here.

use clap::Parser;

pub mod global;
pub use global::GlobalArgs;

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "hexaframe-demo",
    bin_name = "hexaframe-demo",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Demo HTTP server for Hexaframe use cases",
    long_about = "Serves a handful of example use cases over HTTP to show how \
                  outcomes and errors map onto status codes and JSON envelopes.",
    after_help = "ROUTES:\n\
        \x20 POST /add-one        {\"value\": 1}  ->  {\"result\": 2}\n\
        \x20 POST /add-one/async  same, via a suspend-capable use case\n\
        \x20 GET  /time           current time from the clock port\n\n\
        EXAMPLES:\n\
        \x20 hexaframe-demo --bind 0.0.0.0:8080\n\
        \x20 hexaframe-demo -vv --config hexaframe.toml",
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Address to listen on. Overrides `server.bind` from config.
    #[arg(
        short = 'b',
        long = "bind",
        value_name = "ADDR",
        help = "Listen address, e.g. 127.0.0.1:3000"
    )]
    pub bind: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        assert_eq!(Cli::command().get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn parses_bind_and_verbosity() {
        let cli = Cli::try_parse_from(["hexaframe-demo", "-vv", "--bind", "0.0.0.0:9000"]).unwrap();
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.bind.as_deref(), Some("0.0.0.0:9000"));
        assert!(cli.global.config.is_none());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let err = Cli::try_parse_from(["hexaframe-demo", "-q", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
