use std::io;
use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("unable to clone {url} into {}", dest.display()))]
    Clone {
        url: String,
        dest: PathBuf,
        source: git2::Error,
    },

    #[snafu(display("unable to resolve git target '{target}' in {}", dest.display()))]
    Revparse {
        target: String,
        dest: PathBuf,
        source: git2::Error,
    },

    #[snafu(display("unable to check out '{target}' in {}", dest.display()))]
    Checkout {
        target: String,
        dest: PathBuf,
        source: git2::Error,
    },

    #[snafu(display("dependency path {} does not exist", path.display()))]
    PathMissing { path: PathBuf },

    #[snafu(display("unable to canonicalize dependency path {}", path.display()))]
    Canonicalize { path: PathBuf, source: io::Error },

    #[snafu(display("unable to run pkg-config for '{name}'"))]
    PkgConfig {
        name: String,
        source: cabin_process::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
