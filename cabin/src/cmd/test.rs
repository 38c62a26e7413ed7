use std::time::Instant;

use anyhow::{Context as _, Result};
use cabin_process::{Command, Stdio};
use clap::Args as ClapArgs;

use crate::cmd::{support, Context};

#[derive(Debug, ClapArgs)]
pub struct Test {
    #[arg(short = 'd', long = "dev", conflicts_with = "release")]
    dev: bool,

    #[arg(short = 'r', long = "release")]
    release: bool,

    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,
}

impl Test {
    pub fn run(&self, ctx: &Context) -> Result<()> {
        let started = Instant::now();
        let kind = support::resolve_profile(self.release);
        let jobs = support::resolve_jobs(self.jobs);

        let (_project, layout, constructed) = support::prepare(ctx, kind, false, jobs, true)?;

        let target_strings: Vec<String> = constructed
            .test_binaries
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        let target_refs: Vec<&str> = target_strings.iter().map(String::as_str).collect();
        support::make_and_report(ctx, &layout, kind, jobs, &target_refs, started)?;

        let mut failures = Vec::new();
        for binary in &constructed.test_binaries {
            let status = Command::new(binary.display().to_string())
                .stdout(Stdio::Inherit)
                .stderr(Stdio::Inherit)
                .spawn()
                .with_context(|| format!("spawning {}", binary.display()))?
                .wait()
                .with_context(|| format!("waiting for {}", binary.display()))?;
            if !status.success() {
                failures.push(binary.display().to_string());
            }
        }

        if !failures.is_empty() {
            anyhow::bail!("test binaries failed: {}", failures.join(", "));
        }
        Ok(())
    }
}
