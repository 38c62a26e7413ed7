use anyhow::Result;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;

use crate::cmd::{init_logger, Args, SUBCOMMAND_NAMES};
use crate::term::ColorMode;

mod argv;
mod cmd;
mod make_runner;
mod project;
mod term;

/// The build core runs single-threaded with opt-in fan-out, so the CLI
/// layer stays synchronous too; `anyhow`'s `Debug` impl prints a
/// formatted error message, letting `main` just return a `Result`.
fn main() -> Result<()> {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let expanded = match argv::expand(&raw, &argv::known_short_options()) {
        Ok(expanded) => expanded,
        Err(err) => {
            term::report_error(ColorMode::Auto, &anyhow::anyhow!(err.to_string()));
            std::process::exit(1);
        }
    };

    let args = match Args::try_parse_from(std::iter::once("cabin".to_string()).chain(expanded)) {
        Ok(args) => args,
        Err(err) => exit_with_suggestion(err),
    };

    init_logger(args.verbose, args.quiet);
    let color = ColorMode::resolve(args.color.as_deref());

    match cmd::run(args) {
        Ok(()) => Ok(()),
        Err(err) => {
            term::report_error(color, &err);
            std::process::exit(1);
        }
    }
}

/// Prints a clap parse error as usual, then, for an unknown subcommand
/// or option, appends a `Tip: did you mean 'X'?` line computed against
/// the known subcommand set before exiting with clap's own exit code.
fn exit_with_suggestion(err: clap::Error) -> ! {
    let bad_token = match err.kind() {
        ErrorKind::InvalidSubcommand | ErrorKind::UnknownArgument => err
            .get(ContextKind::InvalidSubcommand)
            .or_else(|| err.get(ContextKind::InvalidArg))
            .and_then(|value| match value {
                ContextValue::String(token) => Some(token.as_str()),
                _ => None,
            }),
        _ => None,
    };

    let _ = err.print();
    if let Some(bad_token) = bad_token {
        if let Some(candidate) = argv::suggest(bad_token, SUBCOMMAND_NAMES.iter().copied()) {
            term::tip(ColorMode::Auto, candidate);
        }
    }
    std::process::exit(err.exit_code());
}
