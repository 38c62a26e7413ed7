use std::path::{Path, PathBuf};

/// Which profile a build is for; controls the `cabin-out/<dev|release>`
/// output subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Dev,
    Release,
}

impl ProfileKind {
    pub fn dir_name(self) -> &'static str {
        match self {
            ProfileKind::Dev => "dev",
            ProfileKind::Release => "release",
        }
    }
}

/// The `cabin-out/<dev|release>/...` directory layout.
#[derive(Debug, Clone)]
pub struct Layout {
    pub root: PathBuf,
    pub out_base: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, profile: ProfileKind) -> Self {
        let root = root.into();
        let out_base = root.join("cabin-out").join(profile.dir_name());
        Layout { root, out_base }
    }

    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    pub fn include_dir(&self) -> PathBuf {
        self.root.join("include")
    }

    pub fn makefile(&self) -> PathBuf {
        self.out_base.join("Makefile")
    }

    pub fn compile_commands(&self) -> PathBuf {
        self.out_base.join("compile_commands.json")
    }

    /// `<pkgname>.d/**/*.o` production object directory.
    pub fn build_out_dir(&self, pkg_name: &str) -> PathBuf {
        self.out_base.join(format!("{pkg_name}.d"))
    }

    pub fn unittest_out_dir(&self) -> PathBuf {
        self.out_base.join("unittests")
    }

    pub fn binary_artifact(&self, pkg_name: &str) -> PathBuf {
        self.out_base.join(pkg_name)
    }

    pub fn library_artifact(&self, pkg_name: &str) -> PathBuf {
        self.out_base.join(format!("lib{pkg_name}.a"))
    }

    /// Maps a source file under `src/` to its object path under the
    /// matching output subdirectory, preserving the relative directory.
    pub fn object_for(&self, base_out_dir: &Path, source: &Path) -> PathBuf {
        let relative = source
            .strip_prefix(self.src_dir())
            .unwrap_or(source)
            .with_extension("o");
        base_out_dir.join(relative)
    }
}
