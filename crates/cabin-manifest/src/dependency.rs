use std::path::{Path, PathBuf};

use cabin_semver::VersionReq;
use serde::Deserialize;

use crate::error::{self, Error};
use crate::validate::validate_dep_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitTarget {
    Rev(String),
    Tag(String),
    Branch(String),
}

/// A dependency, as a tagged sum type: a plain enum is enough here
/// because each variant's install step is a free function dispatched
/// by match, not a trait object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    Git {
        name: String,
        url: String,
        target: Option<GitTarget>,
    },
    Path {
        name: String,
        path: PathBuf,
    },
    System {
        name: String,
        version_req: VersionReq,
    },
}

impl Dependency {
    pub fn name(&self) -> &str {
        match self {
            Dependency::Git { name, .. } => name,
            Dependency::Path { name, .. } => name,
            Dependency::System { name, .. } => name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawDependency {
    pub git: Option<String>,
    pub rev: Option<String>,
    pub tag: Option<String>,
    pub branch: Option<String>,
    pub path: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub system: bool,
}

pub(crate) fn build_dependency(
    name: &str,
    raw: RawDependency,
    manifest_dir: &Path,
) -> Result<Dependency, Error> {
    validate_dep_name(name).map_err(|reason| error::invalid("dependency name", reason))?;

    if let Some(url) = raw.git {
        let target = match (raw.rev, raw.tag, raw.branch) {
            (Some(rev), _, _) => Some(GitTarget::Rev(rev)),
            (None, Some(tag), _) => Some(GitTarget::Tag(tag)),
            (None, None, Some(branch)) => Some(GitTarget::Branch(branch)),
            (None, None, None) => None,
        };
        return Ok(Dependency::Git {
            name: name.to_string(),
            url,
            target,
        });
    }

    if let Some(path) = raw.path {
        return Ok(Dependency::Path {
            name: name.to_string(),
            path: manifest_dir.join(path),
        });
    }

    if let Some(version) = raw.version {
        let version_req = VersionReq::parse(&version).map_err(|err| {
            error::invalid(
                format!("dependency '{name}' version requirement"),
                err.to_string(),
            )
        })?;
        return Ok(Dependency::System {
            name: name.to_string(),
            version_req,
        });
    }

    Err(error::invalid(
        format!("dependency '{name}'"),
        "only Git, path, and system dependencies are supported",
    ))
}
