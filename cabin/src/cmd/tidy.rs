use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use cabin_process::Command;
use clap::Args as ClapArgs;

use crate::cmd::support;
use crate::cmd::Context;
use crate::project::Project;

#[derive(Debug, ClapArgs)]
pub struct Tidy {
    /// Apply clang-tidy's suggested fixes in place.
    #[arg(long = "fix")]
    fix: bool,

    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,
}

impl Tidy {
    pub fn run(&self, ctx: &Context) -> Result<()> {
        which::which("clang-tidy").map_err(|_| {
            anyhow::anyhow!(
                "clang-tidy is required; try installing it by adding clang-tidy to your \
                 system package manager (e.g. `apt install clang-tidy`)"
            )
        })?;

        let jobs = support::resolve_jobs(self.jobs);
        let kind = support::resolve_profile(false);
        let (project, layout, _constructed) = support::prepare(ctx, kind, true, jobs, false)?;

        let sources = cabin_build::all_sources(&project.root().join("src"))?;
        if sources.is_empty() {
            return Ok(());
        }

        let compdb_dir = layout.out_base.clone();
        let fix = self.fix;
        let errors: Mutex<Vec<String>> = Mutex::new(Vec::new());

        std::thread::scope(|scope| {
            for chunk in chunks(&sources, jobs.max(1)) {
                let compdb_dir = &compdb_dir;
                let errors = &errors;
                scope.spawn(move || {
                    for source in chunk {
                        if let Err(err) = run_one(source, compdb_dir, fix) {
                            errors.lock().unwrap().push(err.to_string());
                        }
                    }
                });
            }
        });

        let errors = errors.into_inner().unwrap();
        if !errors.is_empty() {
            anyhow::bail!("clang-tidy reported issues:\n{}", errors.join("\n"));
        }
        Ok(())
    }
}

fn run_one(source: &std::path::Path, compdb_dir: &std::path::Path, fix: bool) -> Result<()> {
    let mut command = Command::new("clang-tidy")
        .arg("-p")
        .arg(compdb_dir.display().to_string());
    if fix {
        command = command.arg("--fix");
    }
    command
        .arg(source.display().to_string())
        .output()
        .with_context(|| format!("clang-tidy failed on {}", source.display()))?;
    Ok(())
}

fn chunks(sources: &[PathBuf], worker_count: usize) -> Vec<&[PathBuf]> {
    if worker_count <= 1 || sources.len() <= 1 {
        return vec![sources];
    }
    let size = sources.len().div_ceil(worker_count);
    sources.chunks(size.max(1)).collect()
}
