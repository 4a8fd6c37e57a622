//! fob-styles CLI entry point.
//!
//! Parses arguments, initializes logging and dispatches the subcommand.

use clap::Parser;
use fob_styles_cli::{cli, commands, error, logger};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let result = match args.command {
        cli::Command::Compile(compile_args) => commands::compile_execute(compile_args),
    };

    result.map_err(error::cli_error_to_miette)
}
