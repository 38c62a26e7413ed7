use std::io;
use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("src/main.* or src/lib.* was not found under {}", root.display()))]
    NoEntryPoint { root: PathBuf },

    #[snafu(display("multiple main sources were found: {}", candidates.join(", ")))]
    MultipleMainSources { candidates: Vec<String> },

    #[snafu(display("multiple lib sources were found: {}", candidates.join(", ")))]
    MultipleLibSources { candidates: Vec<String> },

    #[snafu(display("too complex build graph"))]
    Cycle,

    #[snafu(display("unknown variable '{name}' referenced"))]
    UnknownVariable { name: String },

    #[snafu(display("unable to walk {}", root.display()))]
    Walk {
        root: PathBuf,
        source: walkdir::Error,
    },

    #[snafu(display("unable to read {}", path.display()))]
    Read { path: PathBuf, source: io::Error },

    #[snafu(display("unable to write {}", path.display()))]
    Write { path: PathBuf, source: io::Error },

    #[snafu(display("unable to run '{cxx}' in {}", cwd.display()))]
    Preprocess {
        cxx: String,
        cwd: PathBuf,
        source: cabin_process::Error,
    },

    #[snafu(display("unable to parse -MM output for {}", source_file.display()))]
    DepfileParse { source_file: PathBuf, line: String },

    #[snafu(display("unable to serialize compile_commands.json"))]
    Serialize { source: serde_json::Error },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
