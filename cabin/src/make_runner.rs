//! Builder-pattern wrapper around a `make` invocation, delegating
//! incremental execution to the generated Makefile.
//! Generalized from `twoliter::cargo_make::CargoMake`'s builder shape,
//! dropping its SDK/toolchain environment-variable passthrough since
//! cabin has no equivalent cross-container build environment.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cabin_process::{Command, Stdio};

#[derive(Debug, Clone)]
pub struct MakeRunner {
    makefile: PathBuf,
    cwd: PathBuf,
    jobs: usize,
}

impl MakeRunner {
    pub fn new(makefile: PathBuf, cwd: PathBuf, jobs: usize) -> Self {
        MakeRunner { makefile, cwd, jobs }
    }

    /// Builds `targets` (the default target if empty), streaming
    /// `make`'s own output so the user sees compiler diagnostics live.
    pub fn build(&self, targets: &[&str]) -> Result<()> {
        let jobs = self.jobs.max(1).to_string();
        let status = Command::new("make")
            .arg("-f")
            .arg(self.makefile.display().to_string())
            .arg("-j")
            .arg(jobs)
            .args(targets.iter().map(|t| t.to_string()))
            .cwd(&self.cwd)
            .stdout(Stdio::Inherit)
            .stderr(Stdio::Inherit)
            .spawn()
            .context("spawning make")?
            .wait()
            .context("waiting for make")?;

        if !status.success() {
            anyhow::bail!("make {}", status);
        }
        Ok(())
    }
}
