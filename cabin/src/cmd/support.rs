//! Shared glue between `build`/`run`/`test`: resolves the profile,
//! constructs the build graph, writes the Makefile/compdb, and
//! delegates to `make` for incremental execution.

use std::time::Instant;

use anyhow::{Context, Result};
use cabin_build::{BuildConfig, Constructed, ProfileKind};

use crate::cmd::Context as CliContext;
use crate::make_runner::MakeRunner;
use crate::project::Project;
use crate::term;

pub fn resolve_jobs(explicit: Option<usize>) -> usize {
    explicit.unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
}

pub fn resolve_profile(release: bool) -> ProfileKind {
    if release {
        ProfileKind::Release
    } else {
        ProfileKind::Dev
    }
}

/// Loads the project, assembles compiler options, constructs the
/// build graph, and writes `Makefile`/`compile_commands.json`.
/// Returns the project, its layout, and the constructed graph so
/// callers can run `make` against specific targets.
pub fn prepare(
    ctx: &CliContext,
    kind: ProfileKind,
    compdb: bool,
    jobs: usize,
    include_dev_deps: bool,
) -> Result<(Project, cabin_build::Layout, Constructed)> {
    let project = Project::load(&ctx.cwd)?;
    let layout = project.layout(kind);

    term::compiling(ctx.color, &project.manifest.package.name, &project.manifest.package.version.to_string(), project.root());

    let options = project.compiler_options(kind, include_dev_deps, ctx.color_enabled())?;
    let profile = match kind {
        ProfileKind::Dev => &project.manifest.dev_profile,
        ProfileKind::Release => &project.manifest.release_profile,
    };

    let config = BuildConfig {
        layout: &layout,
        pkg_name: &project.manifest.package.name,
        cxx: &project.cxx,
        options: &options,
        comp_db: compdb || profile.comp_db,
        jobs,
    };

    let manifest_path = project.root().join("cabin.toml");
    let makefile_path = layout.makefile();
    let makefile_fresh = cabin_build::is_fresh(&makefile_path, &layout.src_dir(), &manifest_path)
        .context("checking Makefile freshness")?;

    let constructed = config.construct().context("constructing build graph")?;

    std::fs::create_dir_all(&layout.out_base)
        .with_context(|| format!("creating {}", layout.out_base.display()))?;
    if !makefile_fresh {
        std::fs::write(&makefile_path, constructed.makefile.render()?)
            .with_context(|| format!("writing {}", makefile_path.display()))?;
    }
    if config.comp_db {
        let compdb_path = layout.compile_commands();
        let compdb_fresh = makefile_fresh && compdb_path.exists();
        if !compdb_fresh {
            let rendered = cabin_build::render_compile_commands(&constructed.compile_commands)?;
            std::fs::write(&compdb_path, rendered)
                .with_context(|| format!("writing {}", compdb_path.display()))?;
        }
    }

    Ok((project, layout, constructed))
}

/// Runs `make` against `targets` (the default `all` target if empty)
/// and prints the cargo-style `Finished` status line.
pub fn make_and_report(
    ctx: &CliContext,
    layout: &cabin_build::Layout,
    kind: ProfileKind,
    jobs: usize,
    targets: &[&str],
    started: Instant,
) -> Result<()> {
    let runner = MakeRunner::new(layout.makefile(), layout.root.clone(), jobs);
    runner.build(targets)?;

    let (profile_label, qualifiers) = match kind {
        ProfileKind::Dev => ("dev", "unoptimized + debuginfo"),
        ProfileKind::Release => ("release", "optimized"),
    };
    term::finished(ctx.color, profile_label, qualifiers, started.elapsed().as_secs_f64());
    Ok(())
}
