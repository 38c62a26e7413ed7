use std::fs;
use std::path::Path;

use cabin_process::Command;

use crate::error::Error;

/// A source contains test code iff the literal token `CABIN_TEST`
/// appears in its text (a cheap first filter) and preprocessing it
/// with and without `-DCABIN_TEST` yields different output (confirming
/// the token is semantically meaningful, not a comment or string).
pub fn is_test_source(
    cxx: &str,
    cflags: &[String],
    source: &Path,
    cwd: &Path,
) -> Result<bool, Error> {
    let text = fs::read_to_string(source).map_err(|source_err| Error::Read {
        path: source.to_path_buf(),
        source: source_err,
    })?;
    if !text.contains("CABIN_TEST") {
        return Ok(false);
    }

    let without = preprocess(cxx, cflags, source, cwd, false)?;
    let with = preprocess(cxx, cflags, source, cwd, true)?;
    Ok(without != with)
}

fn preprocess(
    cxx: &str,
    cflags: &[String],
    source: &Path,
    cwd: &Path,
    define_test: bool,
) -> Result<Vec<u8>, Error> {
    let mut command = Command::new(cxx).args(cflags.iter().cloned());
    if define_test {
        command = command.arg("-DCABIN_TEST");
    }
    let output = command
        .arg("-E")
        .arg(source.display().to_string())
        .cwd(cwd)
        .output()
        .map_err(|source_err| Error::Preprocess {
            cxx: cxx.to_string(),
            cwd: cwd.to_path_buf(),
            source: source_err,
        })?;
    Ok(output.stdout)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn a_source_without_the_token_is_never_a_test() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("plain.cc");
        fs::write(&source, "int main() { return 0; }\n").unwrap();

        let found = is_test_source("cc", &[], &source, dir.path()).unwrap();
        assert!(!found);
    }
}
