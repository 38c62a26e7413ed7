use std::time::Instant;

use anyhow::Result;
use clap::Args as ClapArgs;

use crate::cmd::{support, Context};

#[derive(Debug, ClapArgs)]
pub struct Build {
    /// Build the dev profile (default).
    #[arg(short = 'd', long = "dev", conflicts_with = "release")]
    dev: bool,

    /// Build the release profile.
    #[arg(short = 'r', long = "release")]
    release: bool,

    /// Emit `compile_commands.json` alongside the Makefile.
    #[arg(long = "compdb")]
    compdb: bool,

    /// Parallel `-MM`/test-discovery workers (default: available cores).
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,
}

impl Build {
    pub fn run(&self, ctx: &Context) -> Result<()> {
        let started = Instant::now();
        let kind = support::resolve_profile(self.release);
        let jobs = support::resolve_jobs(self.jobs);

        let (_project, layout, _constructed) = support::prepare(ctx, kind, self.compdb, jobs, false)?;
        support::make_and_report(ctx, &layout, kind, jobs, &[], started)
    }
}
