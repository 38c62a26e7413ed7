use std::io;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("unable to start command `{program}`"))]
    Spawn { program: String, source: io::Error },

    #[snafu(display("unable to wait on command `{program}`"))]
    Wait { program: String, source: io::Error },

    #[snafu(display(
        "command `{program}` was unsuccessful, {status}\n{stderr}"
    ))]
    Unsuccessful {
        program: String,
        status: String,
        stderr: String,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
