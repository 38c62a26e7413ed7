//! Glue between a loaded manifest and an assembled set of
//! `CompilerOptions` for one profile: detects the compiler, installs
//! dependencies, and merges profile/environment flags in the order
//! `cabin-compiler::assemble` documents.

use std::path::Path;

use anyhow::{Context, Result};
use cabin_build::ProfileKind;
use cabin_compiler::{assemble_cflags, assemble_ldflags, BuildInfo, CFlagsParams, CompilerOptions};
use cabin_deps::InstallDependencies;
use cabin_manifest::{Manifest, Profile};

pub struct Project {
    pub manifest: Manifest,
    pub cxx: String,
}

impl Project {
    /// Loads the nearest `cabin.toml` ascending from `start` and
    /// detects the compiler to use for it.
    pub fn load(start: &Path) -> Result<Project> {
        let manifest = Manifest::parse(start, true)
            .with_context(|| format!("loading manifest from {}", start.display()))?;
        let cxx = cabin_compiler::detect_cxx().context("detecting C++ compiler")?;
        Ok(Project { manifest, cxx })
    }

    pub fn root(&self) -> &Path {
        &self.manifest.root
    }

    fn profile(&self, kind: ProfileKind) -> &Profile {
        match kind {
            ProfileKind::Dev => &self.manifest.dev_profile,
            ProfileKind::Release => &self.manifest.release_profile,
        }
    }

    /// Assembles this profile's `CompilerOptions`: installed
    /// dependencies first, then the project's own flags, so dependency
    /// include paths lose to the project's explicit `$CXXFLAGS` only
    /// where `merge`'s append-order makes that true.
    pub fn compiler_options(&self, kind: ProfileKind, include_dev_deps: bool, color: bool) -> Result<CompilerOptions> {
        let profile = self.profile(kind);
        let installed = self
            .manifest
            .install_dependencies(include_dev_deps)
            .context("installing dependencies")?;

        let project_include_dir = self.root().join("include");
        let env_cxxflags = std::env::var("CXXFLAGS").ok();
        let params = CFlagsParams {
            edition_code: self.manifest.package.edition.code(),
            debug: profile.debug,
            opt_level: profile.opt_level,
            lto: profile.lto,
            profile_cxxflags: &profile.cxxflags,
            env_cxxflags: env_cxxflags.as_deref(),
            project_include_dir: Some(project_include_dir).filter(|d| d.is_dir()),
            color,
            build_info: &self.build_info(kind),
        };
        let cflags = assemble_cflags(params);
        let ldflags = assemble_ldflags(&profile.ldflags, std::env::var("LDFLAGS").ok().as_deref());
        let own = CompilerOptions { cflags, ldflags };

        let from_deps = installed
            .into_iter()
            .fold(CompilerOptions::default(), |acc, dep| acc.merge(dep));
        Ok(from_deps.merge(own))
    }

    fn build_info(&self, kind: ProfileKind) -> BuildInfo {
        let version = &self.manifest.package.version;
        BuildInfo {
            pkg_name: self.manifest.package.name.clone(),
            version_major: version.major,
            version_minor: version.minor,
            version_patch: version.patch,
            commit_hash: None,
            commit_short_hash: None,
            commit_date: None,
            profile_name: kind.dir_name().to_string(),
        }
    }

    pub fn layout(&self, kind: ProfileKind) -> cabin_build::Layout {
        cabin_build::Layout::new(self.root().to_path_buf(), kind)
    }
}

/// The compiled `cabin` binary's own version line for `cabin version`.
pub fn version_line() -> String {
    let hash = option_env!("CABIN_COMMIT_SHORT_HASH").unwrap_or("unknown");
    let date = option_env!("CABIN_COMMIT_DATE").unwrap_or("unknown");
    format!("cabin {} ({hash} {date})", env!("CARGO_PKG_VERSION"))
}
