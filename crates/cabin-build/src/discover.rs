use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{self, Error};

const SOURCE_EXTENSIONS: &[&str] = &["c", "c++", "cc", "cpp", "cxx"];
const HEADER_EXTENSIONS: &[&str] = &["h", "h++", "hh", "hpp", "hxx"];

pub fn is_source(path: &Path) -> bool {
    has_extension(path, SOURCE_EXTENSIONS)
}

pub fn is_header(path: &Path) -> bool {
    has_extension(path, HEADER_EXTENSIONS)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|candidate| candidate.eq_ignore_ascii_case(ext)))
}

/// All source files under `src_dir`, discovered recursively.
pub fn all_sources(src_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut sources = Vec::new();
    for entry in WalkDir::new(src_dir) {
        let entry = entry.map_err(|source| Error::Walk {
            root: src_dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_source(entry.path()) {
            sources.push(entry.path().to_path_buf());
        }
    }
    sources.sort();
    Ok(sources)
}

/// An entry point discovered directly in `src/`: a binary (`main`) or a
/// static library (`lib`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoints {
    pub binary: Option<PathBuf>,
    pub library: Option<PathBuf>,
}

/// A binary is built iff exactly one file directly in `src/` has stem
/// `main`; same for `lib`/static library. Files with those stems
/// elsewhere under `src/` are not entry points (callers should warn).
pub fn find_entry_points(src_dir: &Path) -> Result<EntryPoints, Error> {
    let mut main_candidates = Vec::new();
    let mut lib_candidates = Vec::new();

    let entries = std::fs::read_dir(src_dir).map_err(|source| Error::Read {
        path: src_dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| Error::Read {
            path: src_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() || !is_source(&path) {
            continue;
        }
        match path.file_stem().and_then(|s| s.to_str()) {
            Some("main") => main_candidates.push(path),
            Some("lib") => lib_candidates.push(path),
            _ => {}
        }
    }
    main_candidates.sort();
    lib_candidates.sort();

    if main_candidates.len() > 1 {
        return error::MultipleMainSourcesSnafu {
            candidates: main_candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
        }
        .fail();
    }
    if lib_candidates.len() > 1 {
        return error::MultipleLibSourcesSnafu {
            candidates: lib_candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
        }
        .fail();
    }

    let binary = main_candidates.into_iter().next();
    let library = lib_candidates.into_iter().next();

    if binary.is_none() && library.is_none() {
        return error::NoEntryPointSnafu {
            root: src_dir.to_path_buf(),
        }
        .fail();
    }

    Ok(EntryPoints { binary, library })
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn finds_a_single_binary_entry_point() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "main.cc");
        touch(dir.path(), "helper.cc");

        let entries = find_entry_points(dir.path()).unwrap();
        assert_eq!(entries.binary, Some(dir.path().join("main.cc")));
        assert_eq!(entries.library, None);
    }

    #[test]
    fn rejects_multiple_main_sources() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "main.cc");
        touch(dir.path(), "main.cpp");

        assert!(matches!(
            find_entry_points(dir.path()),
            Err(Error::MultipleMainSources { .. })
        ));
    }

    #[test]
    fn requires_at_least_one_entry_point() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "helper.cc");

        assert!(matches!(
            find_entry_points(dir.path()),
            Err(Error::NoEntryPoint { .. })
        ));
    }

    #[test]
    fn nested_main_stem_is_not_an_entry_point() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        touch(&nested, "main.cc");

        assert!(matches!(
            find_entry_points(dir.path()),
            Err(Error::NoEntryPoint { .. })
        ));
    }
}
