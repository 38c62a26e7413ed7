use std::path::Path;
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::error::Error;

/// The Makefile/compdb is fresh iff it exists and every file under
/// `src/` and the manifest has an mtime no later than the artifact's.
/// Freshness only controls whether emission is skipped; `make` is
/// still always invoked, its `--question` mode distinguishing
/// "rebuild needed" from "up to date".
pub fn is_fresh(artifact: &Path, src_dir: &Path, manifest_path: &Path) -> Result<bool, Error> {
    let artifact_mtime = match mtime(artifact)? {
        Some(mtime) => mtime,
        None => return Ok(false),
    };

    if let Some(manifest_mtime) = mtime(manifest_path)? {
        if manifest_mtime > artifact_mtime {
            return Ok(false);
        }
    }

    for entry in WalkDir::new(src_dir) {
        let entry = entry.map_err(|source| Error::Walk {
            root: src_dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(source_mtime) = mtime(entry.path())? {
            if source_mtime > artifact_mtime {
                return Ok(false);
            }
        }
    }

    Ok(true)
}

fn mtime(path: &Path) -> Result<Option<SystemTime>, Error> {
    match std::fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata.modified().map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn missing_artifact_is_never_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("Makefile");
        let src_dir = dir.path().join("src");
        fs::create_dir(&src_dir).unwrap();
        let manifest = dir.path().join("cabin.toml");
        fs::write(&manifest, "").unwrap();

        assert!(!is_fresh(&artifact, &src_dir, &manifest).unwrap());
    }

    #[test]
    fn fresh_when_artifact_is_newer_than_every_input() {
        let dir = tempfile::tempdir().unwrap();
        let src_dir = dir.path().join("src");
        fs::create_dir(&src_dir).unwrap();
        let manifest = dir.path().join("cabin.toml");
        fs::write(&manifest, "").unwrap();
        fs::write(src_dir.join("main.cc"), "").unwrap();

        sleep(Duration::from_millis(10));
        let artifact = dir.path().join("Makefile");
        fs::write(&artifact, "").unwrap();

        assert!(is_fresh(&artifact, &src_dir, &manifest).unwrap());
    }

    #[test]
    fn stale_when_a_source_is_newer_than_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let src_dir = dir.path().join("src");
        fs::create_dir(&src_dir).unwrap();
        let manifest = dir.path().join("cabin.toml");
        fs::write(&manifest, "").unwrap();

        let artifact = dir.path().join("Makefile");
        fs::write(&artifact, "").unwrap();

        sleep(Duration::from_millis(10));
        fs::write(src_dir.join("main.cc"), "").unwrap();

        assert!(!is_fresh(&artifact, &src_dir, &manifest).unwrap());
    }
}
