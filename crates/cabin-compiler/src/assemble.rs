use std::path::PathBuf;

use crate::options::{CFlags, IncludeDir, LdFlags, Macro};

/// Version-control and package metadata baked into `CABIN_<PKG>_*`
/// macros so a binary can report its own provenance.
#[derive(Debug, Clone, Default)]
pub struct BuildInfo {
    pub pkg_name: String,
    pub version_major: u64,
    pub version_minor: u64,
    pub version_patch: u64,
    pub commit_hash: Option<String>,
    pub commit_short_hash: Option<String>,
    pub commit_date: Option<String>,
    pub profile_name: String,
}

/// Everything needed to assemble one profile's CFlags, gathered by the
/// caller from the manifest's `Package`/`Profile` plus the environment.
pub struct CFlagsParams<'a> {
    pub edition_code: &'a str,
    pub debug: bool,
    pub opt_level: u8,
    pub lto: bool,
    pub profile_cxxflags: &'a [String],
    pub env_cxxflags: Option<&'a str>,
    pub project_include_dir: Option<PathBuf>,
    pub color: bool,
    pub build_info: &'a BuildInfo,
}

fn quoted_macro(name: &str, value: &str) -> Macro {
    // Single-quoted then double-quoted so the value survives shell and
    // Makefile expansion and reaches the preprocessor intact.
    Macro {
        name: name.to_string(),
        value: Some(format!("'\"{value}\"'")),
    }
}

fn build_info_macros(info: &BuildInfo) -> Vec<Macro> {
    let prefix = format!("CABIN_{}", info.pkg_name.to_uppercase().replace('-', "_"));
    let mut macros = vec![
        quoted_macro(&format!("{prefix}_NAME"), &info.pkg_name),
        Macro {
            name: format!("{prefix}_VERSION_MAJOR"),
            value: Some(info.version_major.to_string()),
        },
        Macro {
            name: format!("{prefix}_VERSION_MINOR"),
            value: Some(info.version_minor.to_string()),
        },
        Macro {
            name: format!("{prefix}_VERSION_PATCH"),
            value: Some(info.version_patch.to_string()),
        },
        quoted_macro(&format!("{prefix}_PROFILE"), &info.profile_name),
    ];
    if let Some(hash) = &info.commit_hash {
        macros.push(quoted_macro(&format!("{prefix}_COMMIT_HASH"), hash));
    }
    if let Some(short) = &info.commit_short_hash {
        macros.push(quoted_macro(&format!("{prefix}_COMMIT_SHORT_HASH"), short));
    }
    if let Some(date) = &info.commit_date {
        macros.push(quoted_macro(&format!("{prefix}_COMMIT_DATE"), date));
    }
    macros
}

/// Assembles a profile's CFlags in a fixed order: `-std`, color,
/// debug/optimization flags, profile flags, then `$CXXFLAGS` last so
/// it wins on conflict.
pub fn assemble_cflags(params: CFlagsParams<'_>) -> CFlags {
    let mut other = vec![format!("-std=c++{}", params.edition_code)];
    if params.color {
        other.push("-fdiagnostics-color".to_string());
    }
    if params.debug {
        other.push("-g".to_string());
    }
    other.push(format!("-O{}", params.opt_level));
    if params.lto {
        other.push("-flto".to_string());
    }
    other.extend(params.profile_cxxflags.iter().cloned());
    if let Some(env) = params.env_cxxflags {
        other.extend(env.split_whitespace().map(str::to_string));
    }

    let mut macros = vec![Macro {
        name: if params.debug { "DEBUG" } else { "NDEBUG" }.to_string(),
        value: None,
    }];
    macros.extend(build_info_macros(params.build_info));

    let mut include_dirs = Vec::new();
    if let Some(dir) = params.project_include_dir.filter(|d| d.exists()) {
        include_dirs.push(IncludeDir {
            path: dir,
            is_system: false,
        });
    }

    CFlags {
        macros,
        include_dirs,
        other,
    }
}

/// Assembles a profile's LdFlags: profile `ldflags`, then `$LDFLAGS`.
pub fn assemble_ldflags(profile_ldflags: &[String], env_ldflags: Option<&str>) -> LdFlags {
    let mut other = profile_ldflags.to_vec();
    if let Some(env) = env_ldflags {
        other.extend(env.split_whitespace().map(str::to_string));
    }
    LdFlags {
        other,
        ..Default::default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cflags_order_and_env_wins_last() {
        let info = BuildInfo {
            pkg_name: "hello-world".into(),
            version_major: 1,
            version_minor: 2,
            version_patch: 3,
            profile_name: "dev".into(),
            ..Default::default()
        };
        let cflags = assemble_cflags(CFlagsParams {
            edition_code: "20",
            debug: true,
            opt_level: 0,
            lto: false,
            profile_cxxflags: &["-Wall".to_string()],
            env_cxxflags: Some("-Wextra"),
            project_include_dir: None,
            color: false,
            build_info: &info,
        });
        assert_eq!(
            cflags.other,
            vec!["-std=c++20", "-g", "-O0", "-Wall", "-Wextra"]
        );
        assert!(cflags.macros.iter().any(|m| m.name == "DEBUG"));
        assert!(cflags
            .macros
            .iter()
            .any(|m| m.name == "CABIN_HELLO_WORLD_VERSION_MAJOR"));
    }
}
