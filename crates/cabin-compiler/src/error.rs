use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display(
        "C++ compiler is required; try installing one and setting $CXX, or installing `make`"
    ))]
    CompilerNotFound,

    #[snafu(display("unable to probe `make` for the default compiler"))]
    ProbeMake { source: cabin_process::Error },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
