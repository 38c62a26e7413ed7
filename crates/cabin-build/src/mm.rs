use std::path::{Path, PathBuf};

use cabin_process::Command;

use crate::error::{self, Error};

/// The result of running `<cxx> <cflags> -MM <src>`: the object name
/// the compiler would produce and the set of headers it depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepInfo {
    pub object_name: String,
    pub headers: Vec<PathBuf>,
}

pub fn extract_dependencies(
    cxx: &str,
    cflags: &[String],
    source: &Path,
    cwd: &Path,
) -> Result<DepInfo, Error> {
    let output = Command::new(cxx)
        .args(cflags.iter().cloned())
        .arg("-MM")
        .arg(source.display().to_string())
        .cwd(cwd)
        .output()
        .map_err(|source_err| Error::Preprocess {
            cxx: cxx.to_string(),
            cwd: cwd.to_path_buf(),
            source: source_err,
        })?;

    parse_depfile(source, &output.stdout_string())
}

/// Parses a Make-rule line `obj.o: src header1 header2 \` (possibly
/// continued over several lines) into `(objName, headers)`, skipping
/// the first item after `:` (the source file itself).
pub(crate) fn parse_depfile(source: &Path, raw: &str) -> Result<DepInfo, Error> {
    let joined = raw.replace("\\\n", " ");
    let (target, rest) = joined.split_once(':').ok_or_else(|| Error::DepfileParse {
        source_file: source.to_path_buf(),
        line: raw.to_string(),
    })?;

    let mut tokens = rest.split_whitespace();
    tokens.next(); // the source file itself

    let headers = tokens.map(PathBuf::from).collect();

    Ok(DepInfo {
        object_name: target.trim().to_string(),
        headers,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_a_single_line_rule() {
        let info = parse_depfile(
            Path::new("src/main.cc"),
            "main.o: src/main.cc src/foo.hpp src/bar.hpp\n",
        )
        .unwrap();
        assert_eq!(info.object_name, "main.o");
        assert_eq!(
            info.headers,
            vec![PathBuf::from("src/foo.hpp"), PathBuf::from("src/bar.hpp")]
        );
    }

    #[test]
    fn parses_a_continued_rule() {
        let info = parse_depfile(
            Path::new("src/main.cc"),
            "main.o: src/main.cc \\\n  src/foo.hpp \\\n  src/bar.hpp\n",
        )
        .unwrap();
        assert_eq!(info.headers.len(), 2);
    }

    #[test]
    fn rejects_malformed_output() {
        assert!(parse_depfile(Path::new("src/main.cc"), "not a rule").is_err());
    }
}
