use std::fs;
use std::path::{Path, PathBuf};

use cabin_compiler::{CFlags, CompilerOptions, IncludeDir};
use cabin_manifest::{Dependency, GitTarget, Manifest};

use crate::cache_dir::git_dest;
use crate::error::{self, Error};
use crate::pkgconfig;

/// Installs every dependency in `manifest`, optionally including
/// dev-dependencies, returning one `CompilerOptions` per dependency in
/// declaration order.
///
/// `Manifest` lives in `cabin-manifest`, one layer below this crate, so
/// this is exposed as an extension trait rather than an inherent method
/// on `Manifest` itself; call sites still read as `manifest.install_dependencies(..)`.
pub trait InstallDependencies {
    fn install_dependencies(&self, include_dev_deps: bool) -> Result<Vec<CompilerOptions>, Error>;
}

impl InstallDependencies for Manifest {
    fn install_dependencies(&self, include_dev_deps: bool) -> Result<Vec<CompilerOptions>, Error> {
        let mut deps: Vec<&Dependency> = self.dependencies.iter().collect();
        if include_dev_deps {
            deps.extend(self.dev_dependencies.iter());
        }
        deps.into_iter().map(install_one).collect()
    }
}

fn install_one(dep: &Dependency) -> Result<CompilerOptions, Error> {
    match dep {
        Dependency::Git { url, target, .. } => install_git(url, target.as_ref()).map(|dest| {
            CompilerOptions {
                cflags: include_dir_cflags(&dest),
                ldflags: Default::default(),
            }
        }),
        Dependency::Path { path, .. } => install_path(path).map(|dest| CompilerOptions {
            cflags: include_dir_cflags(&dest),
            ldflags: Default::default(),
        }),
        Dependency::System { name, version_req } => {
            let (cflags, ldflags) = pkgconfig::query(name, version_req)?;
            Ok(CompilerOptions { cflags, ldflags })
        }
    }
}

fn install_git(url: &str, target: Option<&GitTarget>) -> Result<PathBuf, Error> {
    let name = url
        .rsplit('/')
        .next()
        .unwrap_or(url)
        .trim_end_matches(".git");
    let dest = git_dest(name, target);

    if dest.is_dir() && fs::read_dir(&dest).map(|mut it| it.next().is_some()).unwrap_or(false) {
        return Ok(dest);
    }

    let repo = git2::Repository::clone(url, &dest).map_err(|source| Error::Clone {
        url: url.to_string(),
        dest: dest.clone(),
        source,
    })?;

    if let Some(target) = target {
        let refname = match target {
            GitTarget::Rev(rev) => rev.as_str(),
            GitTarget::Tag(tag) => tag.as_str(),
            GitTarget::Branch(branch) => branch.as_str(),
        };
        let object = repo
            .revparse_single(refname)
            .map_err(|source| Error::Revparse {
                target: refname.to_string(),
                dest: dest.clone(),
                source,
            })?;
        repo.set_head_detached(object.id())
            .map_err(|source| Error::Checkout {
                target: refname.to_string(),
                dest: dest.clone(),
                source,
            })?;
        repo.checkout_head(Some(git2::build::CheckoutBuilder::new().force()))
            .map_err(|source| Error::Checkout {
                target: refname.to_string(),
                dest: dest.clone(),
                source,
            })?;
    }

    Ok(dest)
}

fn install_path(path: &Path) -> Result<PathBuf, Error> {
    if !path.exists() {
        return error::PathMissingSnafu { path: path.to_path_buf() }.fail();
    }
    fs::canonicalize(path).map_err(|source| Error::Canonicalize {
        path: path.to_path_buf(),
        source,
    })
}

fn include_dir_cflags(dest: &Path) -> CFlags {
    let include = dest.join("include");
    let path = if include.is_dir() { include } else { dest.to_path_buf() };
    CFlags {
        include_dirs: vec![IncludeDir { path, is_system: true }],
        ..Default::default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn path_dependency_prefers_an_include_subdir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("include")).unwrap();

        let dest = install_path(dir.path()).unwrap();
        let cflags = include_dir_cflags(&dest);
        assert_eq!(cflags.include_dirs.len(), 1);
        assert!(cflags.include_dirs[0].path.ends_with("include"));
        assert!(cflags.include_dirs[0].is_system);
    }

    #[test]
    fn path_dependency_falls_back_to_dest_without_include_subdir() {
        let dir = tempfile::tempdir().unwrap();

        let dest = install_path(dir.path()).unwrap();
        let cflags = include_dir_cflags(&dest);
        assert_eq!(cflags.include_dirs[0].path, dest);
    }

    #[test]
    fn missing_path_dependency_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(matches!(
            install_path(&missing),
            Err(Error::PathMissing { .. })
        ));
    }
}
