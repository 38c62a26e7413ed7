//! The CLI tree: one root `cabin` command, global options, and a flat
//! subcommand set. Mirrors the shape of
//! `twoliter::cmd::{Args, Subcommand, run, init_logger}` with the
//! nested-enum `BuildCommand` pattern dropped, since cabin's
//! subcommands are flat.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::term::ColorMode;

mod add;
mod build;
mod clean;
mod fmt;
mod help;
mod init;
mod lint;
mod new;
mod remove;
mod run;
mod search;
mod support;
mod test;
mod tidy;
mod version;

/// All subcommand names, used for `--list` and unknown-subcommand
/// suggestions.
pub const SUBCOMMAND_NAMES: &[&str] = &[
    "build", "run", "test", "clean", "add", "remove", "new", "init", "fmt", "lint", "tidy",
    "help", "version", "search",
];

#[derive(Debug, Parser)]
#[command(
    name = "cabin",
    about = "A C++ package manager and build driver",
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct Args {
    /// Increase log verbosity; repeat for more (`-vv`).
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence all log output below errors.
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// When to colorize output.
    #[arg(long = "color", global = true, value_name = "WHEN")]
    pub color: Option<String>,

    /// List every subcommand, including hidden ones.
    #[arg(long = "list", global = true)]
    pub list: bool,

    /// Print version info and exit. Combines with `-v` to also print
    /// a `compiler:` line; `-vV` and `-Vv` are equivalent since these
    /// are two independent flags, not positionally sensitive ones.
    #[arg(short = 'V', long = "version", global = true)]
    pub version: bool,

    #[command(subcommand)]
    pub subcommand: Option<Subcommand>,
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    Build(build::Build),
    Run(run::Run),
    Test(test::Test),
    Clean(clean::Clean),
    Add(add::Add),
    Remove(remove::Remove),
    New(new::New),
    Init(init::Init),
    Fmt(fmt::Fmt),
    Lint(lint::Lint),
    Tidy(tidy::Tidy),
    Help(help::Help),
    Version(version::Version),
    Search(search::Search),
}

/// Process-wide state resolved once from the parsed `Args`: color
/// mode and the working directory subcommands operate against.
/// Passed by reference into every subcommand's `run`, matching §9's
/// "global singleton" re-architecture note (a struct built once in
/// `main`, read concurrently afterwards).
pub struct Context {
    pub color: ColorMode,
    pub cwd: std::path::PathBuf,
    pub verbose: u8,
}

impl Context {
    pub fn color_enabled(&self) -> bool {
        !matches!(self.color, ColorMode::Never)
    }
}

pub fn run(args: Args) -> Result<()> {
    let color = ColorMode::resolve(args.color.as_deref());
    let ctx = Context {
        color,
        cwd: std::env::current_dir()?,
        verbose: args.verbose,
    };

    if args.version {
        return version::Version::default().run(&ctx);
    }

    if args.list {
        for name in SUBCOMMAND_NAMES {
            println!("{name}");
        }
        return Ok(());
    }

    match args.subcommand {
        Some(Subcommand::Build(cmd)) => cmd.run(&ctx),
        Some(Subcommand::Run(cmd)) => cmd.run(&ctx),
        Some(Subcommand::Test(cmd)) => cmd.run(&ctx),
        Some(Subcommand::Clean(cmd)) => cmd.run(&ctx),
        Some(Subcommand::Add(cmd)) => cmd.run(&ctx),
        Some(Subcommand::Remove(cmd)) => cmd.run(&ctx),
        Some(Subcommand::New(cmd)) => cmd.run(&ctx),
        Some(Subcommand::Init(cmd)) => cmd.run(&ctx),
        Some(Subcommand::Fmt(cmd)) => cmd.run(&ctx),
        Some(Subcommand::Lint(cmd)) => cmd.run(&ctx),
        Some(Subcommand::Tidy(cmd)) => cmd.run(&ctx),
        Some(Subcommand::Help(cmd)) => cmd.run(&ctx),
        Some(Subcommand::Version(cmd)) => cmd.run(&ctx),
        Some(Subcommand::Search(cmd)) => cmd.run(&ctx),
        None => {
            use clap::CommandFactory;
            Args::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Sets up `env_logger`: explicit `-v`/`-q` flags take precedence over
/// `RUST_LOG`/`CABIN_LOG`, which take precedence over a default of
/// `warn`. Mirrors `twoliter::cmd::init_logger`'s precedence order.
pub fn init_logger(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => env_log_level().unwrap_or(LevelFilter::Warn),
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn env_log_level() -> Option<LevelFilter> {
    std::env::var("RUST_LOG")
        .or_else(|_| std::env::var("CABIN_LOG"))
        .ok()
        .and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subcommand_names_cover_the_declared_enum() {
        assert_eq!(SUBCOMMAND_NAMES.len(), 14);
    }
}
