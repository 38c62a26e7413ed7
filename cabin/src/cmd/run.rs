use std::time::Instant;

use anyhow::{Context as _, Result};
use cabin_process::{Command, Stdio};
use clap::Args as ClapArgs;

use crate::cmd::{support, Context};

#[derive(Debug, ClapArgs)]
pub struct Run {
    /// Build and run the release profile.
    #[arg(short = 'r', long = "release")]
    release: bool,

    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,

    /// Arguments passed through to the produced binary.
    #[arg(trailing_var_arg = true)]
    args: Vec<String>,
}

impl Run {
    pub fn run(&self, ctx: &Context) -> Result<()> {
        let started = Instant::now();
        let kind = support::resolve_profile(self.release);
        let jobs = support::resolve_jobs(self.jobs);

        let (project, layout, _constructed) = support::prepare(ctx, kind, false, jobs, false)?;
        support::make_and_report(ctx, &layout, kind, jobs, &[], started)?;

        let binary = layout.binary_artifact(&project.manifest.package.name);
        let status = Command::new(binary.display().to_string())
            .args(self.args.iter().cloned())
            .stdout(Stdio::Inherit)
            .stderr(Stdio::Inherit)
            .spawn()
            .context("spawning the built binary")?
            .wait()
            .context("waiting for the built binary")?;

        if !status.success() {
            anyhow::bail!("{}", status);
        }
        Ok(())
    }
}
