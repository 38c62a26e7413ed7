use anyhow::{Context as _, Result};
use cabin_process::Command;
use clap::Args as ClapArgs;

use crate::cmd::Context;
use crate::project::Project;

#[derive(Debug, ClapArgs)]
pub struct Lint {
    #[arg(long = "exclude", value_name = "FILE")]
    exclude: Vec<String>,
}

impl Lint {
    pub fn run(&self, ctx: &Context) -> Result<()> {
        which::which("cpplint").map_err(|_| {
            anyhow::anyhow!(
                "cpplint is required; try installing it by running `pip install cpplint`"
            )
        })?;

        let project = Project::load(&ctx.cwd)?;
        let mut sources = cabin_build::all_sources(&project.root().join("src"))?;
        let include_dir = project.root().join("include");
        if include_dir.is_dir() {
            sources.extend(cabin_build::all_sources(&include_dir)?);
        }
        sources.retain(|path| !self.exclude.iter().any(|excluded| path.ends_with(excluded)));
        if sources.is_empty() {
            return Ok(());
        }

        let mut command = Command::new("cpplint");
        if !project.manifest.lint.cpplint.filters.is_empty() {
            command = command.arg(format!("--filter={}", project.manifest.lint.cpplint.filters.join(",")));
        }
        command
            .args(sources.iter().map(|p| p.display().to_string()))
            .output()
            .context("cpplint reported style violations")?;
        Ok(())
    }
}
