use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::dependency::{build_dependency, Dependency, RawDependency};
use crate::edition::Edition;
use crate::error::{self, Error};
use crate::lint::Lint;
use crate::package::Package;
use crate::profile::{build_profiles, Profile, RawProfileSection};
use crate::validate::validate_package_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub package: Package,
    pub dependencies: Vec<Dependency>,
    pub dev_dependencies: Vec<Dependency>,
    pub dev_profile: Profile,
    pub release_profile: Profile,
    pub lint: Lint,
    /// Directory containing this manifest's `cabin.toml`; relative
    /// dependency and source paths resolve against it.
    pub root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawPackage {
    name: String,
    edition: String,
    version: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawManifest {
    package: Option<RawPackage>,
    #[serde(default)]
    dependencies: BTreeMap<String, RawDependency>,
    #[serde(rename = "dev-dependencies", default)]
    dev_dependencies: BTreeMap<String, RawDependency>,
    profile: Option<RawProfileSection>,
    #[serde(default)]
    lint: Lint,
}

impl Manifest {
    /// Ascends from `path`'s parent toward the filesystem root looking
    /// for a `cabin.toml` when `find_parents` is set; otherwise reads
    /// exactly `path`.
    pub fn parse(path: &Path, find_parents: bool) -> Result<Manifest, Error> {
        let manifest_path = if find_parents {
            find_manifest(path)?
        } else {
            path.to_path_buf()
        };

        let text = fs::read_to_string(&manifest_path).map_err(|source| error::Error::Read {
            path: manifest_path.clone(),
            source,
        })?;
        let value: toml::Value =
            toml::from_str(&text).map_err(|source| error::Error::Parse {
                path: manifest_path.clone(),
                source,
            })?;

        Manifest::from_toml(value, &manifest_path)
    }

    pub fn from_toml(value: toml::Value, path: &Path) -> Result<Manifest, Error> {
        let raw: RawManifest = value
            .try_into()
            .map_err(|source| error::Error::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let raw_package = raw
            .package
            .ok_or_else(|| error::invalid("package", "missing [package] section"))?;

        validate_package_name(&raw_package.name)
            .map_err(|reason| error::invalid("package name", reason))?;
        let edition = Edition::parse(&raw_package.edition)?;
        let version = cabin_semver::Version::parse(&raw_package.version)
            .map_err(|source| error::invalid("package version", source.to_string()))?;

        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let dependencies = build_dependencies(raw.dependencies, &root)?;
        let dev_dependencies = build_dependencies(raw.dev_dependencies, &root)?;
        let (dev_profile, release_profile) = build_profiles(&raw.profile)?;

        Ok(Manifest {
            package: Package {
                name: raw_package.name,
                edition,
                version,
            },
            dependencies,
            dev_dependencies,
            dev_profile,
            release_profile,
            lint: raw.lint,
            root,
        })
    }
}

fn build_dependencies(
    raw: BTreeMap<String, RawDependency>,
    root: &Path,
) -> Result<Vec<Dependency>, Error> {
    raw.into_iter()
        .map(|(name, dep)| build_dependency(&name, dep, root))
        .collect()
}

fn find_manifest(start: &Path) -> Result<PathBuf, Error> {
    let mut dir = if start.is_dir() {
        Some(start.to_path_buf())
    } else {
        start.parent().map(Path::to_path_buf)
    };

    while let Some(candidate) = dir {
        let manifest_path = candidate.join("cabin.toml");
        if manifest_path.is_file() {
            return Ok(manifest_path);
        }
        dir = candidate.parent().map(Path::to_path_buf);
    }

    Err(Error::NotFound {
        start: start.to_path_buf(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn parses_a_minimal_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "cabin.toml",
            r#"
                [package]
                name = "hello-world"
                edition = "20"
                version = "0.1.0"
            "#,
        );

        let manifest = Manifest::parse(&dir.path().join("cabin.toml"), false).unwrap();
        assert_eq!(manifest.package.name, "hello-world");
        assert_eq!(manifest.dev_profile.opt_level, 0);
        assert_eq!(manifest.release_profile.opt_level, 3);
    }

    #[test]
    fn find_parents_ascends_to_the_nearest_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "cabin.toml",
            r#"
                [package]
                name = "hello-world"
                edition = "20"
                version = "0.1.0"
            "#,
        );
        let nested = dir.path().join("src").join("nested");
        fs::create_dir_all(&nested).unwrap();

        let manifest = Manifest::parse(&nested, true).unwrap();
        assert_eq!(manifest.package.name, "hello-world");
    }

    #[test]
    fn missing_manifest_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::parse(dir.path(), true).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn parses_dependencies_and_profile_overrides() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "cabin.toml",
            r#"
                [package]
                name = "hello-world"
                edition = "20"
                version = "0.1.0"

                [dependencies]
                bar = { path = "../bar" }
                baz = { version = "^2.0", system = true }

                [profile]
                cxxflags = ["-Wall"]

                [profile.release]
                opt-level = 1
            "#,
        );

        let manifest = Manifest::parse(&dir.path().join("cabin.toml"), false).unwrap();
        assert_eq!(manifest.dependencies.len(), 2);
        assert_eq!(manifest.dev_profile.cxxflags, vec!["-Wall".to_string()]);
        assert_eq!(manifest.release_profile.opt_level, 1);
    }
}
