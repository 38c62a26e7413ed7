use anyhow::{Context as _, Result};
use cabin_process::Command;
use clap::Args as ClapArgs;

use crate::cmd::Context;
use crate::project::Project;

#[derive(Debug, ClapArgs)]
pub struct Fmt {
    /// Check formatting without rewriting files; exit 1 if anything
    /// would change.
    #[arg(long = "check")]
    check: bool,

    /// Source files to skip, relative to `src/`/`include/`.
    #[arg(long = "exclude", value_name = "FILE")]
    exclude: Vec<String>,
}

impl Fmt {
    pub fn run(&self, ctx: &Context) -> Result<()> {
        let tool = std::env::var("CABIN_FMT").unwrap_or_else(|_| "clang-format".to_string());
        which::which(&tool).map_err(|_| {
            anyhow::anyhow!(
                "{tool} is required; try installing it by adding clang-format to your system \
                 package manager (e.g. `apt install clang-format`)"
            )
        })?;

        let project = Project::load(&ctx.cwd)?;
        let sources = sources_for(&project, &self.exclude)?;
        if sources.is_empty() {
            return Ok(());
        }

        let mut command = Command::new(tool).arg("--style=file");
        command = if self.check {
            command.arg("--dry-run").arg("--Werror")
        } else {
            command.arg("-i")
        };
        command
            .args(sources.iter().map(|p| p.display().to_string()))
            .output()
            .context("clang-format reported formatting issues")?;
        Ok(())
    }
}

fn sources_for(project: &Project, exclude: &[String]) -> Result<Vec<std::path::PathBuf>> {
    let mut found = cabin_build::all_sources(&project.root().join("src"))?;
    let include_dir = project.root().join("include");
    if include_dir.is_dir() {
        found.extend(cabin_build::all_sources(&include_dir)?);
    }
    found.retain(|path| !exclude.iter().any(|excluded| path.ends_with(excluded)));
    Ok(found)
}
