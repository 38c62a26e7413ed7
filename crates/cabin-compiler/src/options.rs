use std::path::PathBuf;

/// A preprocessor macro, with or without a value (`-DNAME` vs `-DNAME=value`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
    pub name: String,
    pub value: Option<String>,
}

impl Macro {
    pub fn flag(&self) -> String {
        match &self.value {
            Some(value) => format!("-D{}={}", self.name, value),
            None => format!("-D{}", self.name),
        }
    }
}

/// A `-I`/`-isystem` include directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDir {
    pub path: PathBuf,
    pub is_system: bool,
}

impl IncludeDir {
    pub fn flag(&self) -> String {
        if self.is_system {
            format!("-isystem {}", self.path.display())
        } else {
            format!("-I{}", self.path.display())
        }
    }
}

/// Compiler-side flags collected from the manifest, dependency
/// installation, and the environment: macros, include directories, and
/// anything else passed through verbatim (`-Wall`, `-fPIC`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CFlags {
    pub macros: Vec<Macro>,
    pub include_dirs: Vec<IncludeDir>,
    pub other: Vec<String>,
}

impl CFlags {
    pub fn merge(mut self, other: CFlags) -> Self {
        self.macros.extend(other.macros);
        self.include_dirs.extend(other.include_dirs);
        self.other.extend(other.other);
        self
    }

    pub fn to_flags(&self) -> Vec<String> {
        let mut flags: Vec<String> = self.macros.iter().map(Macro::flag).collect();
        flags.extend(self.include_dirs.iter().map(IncludeDir::flag));
        flags.extend(self.other.iter().cloned());
        flags
    }
}

/// A `-L` library search directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibDir(pub PathBuf);

/// A `-l` library name (without the `lib`/extension Cargo-style bare name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lib(pub String);

/// Linker-side flags: library directories, libraries, and anything else
/// passed through verbatim (`-static`, `-Wl,...`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LdFlags {
    pub lib_dirs: Vec<LibDir>,
    pub libs: Vec<Lib>,
    pub other: Vec<String>,
}

impl LdFlags {
    pub fn merge(mut self, other: LdFlags) -> Self {
        self.lib_dirs.extend(other.lib_dirs);
        self.libs.extend(other.libs);
        self.other.extend(other.other);
        self
    }

    pub fn to_flags(&self) -> Vec<String> {
        let mut flags: Vec<String> = self
            .lib_dirs
            .iter()
            .map(|d| format!("-L{}", d.0.display()))
            .collect();
        flags.extend(self.libs.iter().map(|l| format!("-l{}", l.0)));
        flags.extend(self.other.iter().cloned());
        flags
    }
}

/// The two flag bundles produced by dependency installation and
/// combined by `Project` into one compiler invocation. `merge` is the
/// single operation both installDeps results and the final assembled
/// options are built from, concatenating in order so later entries
/// (e.g. `$CXXFLAGS` from the environment) win on conflict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOptions {
    pub cflags: CFlags,
    pub ldflags: LdFlags,
}

impl CompilerOptions {
    pub fn merge(mut self, other: CompilerOptions) -> Self {
        self.cflags = self.cflags.merge(other.cflags);
        self.ldflags = self.ldflags.merge(other.ldflags);
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn merge_preserves_order() {
        let a = CompilerOptions {
            cflags: CFlags {
                other: vec!["-Wall".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let b = CompilerOptions {
            cflags: CFlags {
                other: vec!["-Wextra".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let merged = a.merge(b);
        assert_eq!(merged.cflags.other, vec!["-Wall", "-Wextra"]);
    }

    #[test]
    fn macro_flag_formatting() {
        let with_value = Macro {
            name: "FOO".into(),
            value: Some("1".into()),
        };
        assert_eq!(with_value.flag(), "-DFOO=1");
        let bare = Macro {
            name: "DEBUG".into(),
            value: None,
        };
        assert_eq!(bare.flag(), "-DDEBUG");
    }
}
