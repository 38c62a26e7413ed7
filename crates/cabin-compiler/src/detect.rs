use std::env;

use cabin_process::{Command, Stdio};
use snafu::ResultExt;

use crate::error::{self, Result};

/// Detects the C++ compiler to use: `$CXX` takes priority; otherwise
/// probe `make`'s built-in database for its default `CXX` value, the
/// way a bare `make` invocation would pick one up.
pub fn detect_cxx() -> Result<String> {
    if let Ok(cxx) = env::var("CXX") {
        if !cxx.trim().is_empty() {
            return Ok(cxx);
        }
    }
    probe_make_cxx()
}

fn probe_make_cxx() -> Result<String> {
    // `--question` deliberately exits non-zero ("rebuild needed"); that
    // is not a failure here, so spawn/wait directly instead of going
    // through `Command::output`'s success check.
    let output = Command::new("make")
        .arg("--print-data-base")
        .arg("--question")
        .arg("-f")
        .arg("/dev/null")
        .stdout(Stdio::Piped)
        .stderr(Stdio::Piped)
        .spawn()
        .context(error::ProbeMakeSnafu)?
        .wait_with_output()
        .context(error::ProbeMakeSnafu)?;

    output
        .stdout_string()
        .lines()
        .find_map(|line| line.strip_prefix("CXX = "))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(error::Error::CompilerNotFound)
}
