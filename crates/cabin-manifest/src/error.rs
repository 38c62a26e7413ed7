use std::io;
use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("could not find cabin.toml in {} or its parents", start.display()))]
    NotFound { start: PathBuf },

    #[snafu(display("unable to read manifest file {}", path.display()))]
    Read { path: PathBuf, source: io::Error },

    #[snafu(display("unable to parse {}", path.display()))]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[snafu(display("invalid {what}: {reason}"))]
    Invalid { what: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn invalid(what: impl Into<String>, reason: impl Into<String>) -> Error {
    Error::Invalid {
        what: what.into(),
        reason: reason.into(),
    }
}
