use cabin_compiler::{CFlags, IncludeDir, LdFlags, Lib, LibDir, Macro};
use cabin_process::Command;
use cabin_semver::VersionReq;

use crate::error::Error;

/// Runs `pkg-config --cflags <name> <reqSpec>` and `--libs`, tokenizing
/// each on whitespace and classifying tokens by their leading flag.
pub(crate) fn query(name: &str, req: &VersionReq) -> Result<(CFlags, LdFlags), Error> {
    let spec = req.to_pkg_config_string(name);

    let cflags_out = run_pkg_config(name, &["--cflags", &spec])?;
    let ldflags_out = run_pkg_config(name, &["--libs", &spec])?;

    Ok((parse_cflags(&cflags_out), parse_ldflags(&ldflags_out)))
}

fn run_pkg_config(name: &str, args: &[&str]) -> Result<String, Error> {
    let output = Command::new("pkg-config")
        .args(args.iter().map(|a| a.to_string()))
        .output()
        .map_err(|source| Error::PkgConfig {
            name: name.to_string(),
            source,
        })?;
    Ok(output.stdout_string().trim_end_matches('\n').to_string())
}

fn parse_cflags(raw: &str) -> CFlags {
    let mut cflags = CFlags::default();
    for token in raw.split_whitespace() {
        if let Some(rest) = token.strip_prefix("-D") {
            let (name, value) = match rest.split_once('=') {
                Some((name, value)) => (name.to_string(), Some(value.to_string())),
                None => (rest.to_string(), None),
            };
            cflags.macros.push(Macro { name, value });
        } else if let Some(path) = token.strip_prefix("-I") {
            cflags.include_dirs.push(IncludeDir {
                path: path.into(),
                is_system: false,
            });
        } else {
            cflags.other.push(token.to_string());
        }
    }
    cflags
}

fn parse_ldflags(raw: &str) -> LdFlags {
    let mut ldflags = LdFlags::default();
    for token in raw.split_whitespace() {
        if let Some(path) = token.strip_prefix("-L") {
            ldflags.lib_dirs.push(LibDir(path.into()));
        } else if let Some(name) = token.strip_prefix("-l") {
            ldflags.libs.push(Lib(name.to_string()));
        } else {
            ldflags.other.push(token.to_string());
        }
    }
    ldflags
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_cflags_tokens() {
        let cflags = parse_cflags("-DFOO=1 -DBAR -I/usr/include/foo -pthread");
        assert_eq!(cflags.macros.len(), 2);
        assert_eq!(cflags.include_dirs.len(), 1);
        assert_eq!(cflags.other, vec!["-pthread".to_string()]);
    }

    #[test]
    fn parses_ldflags_tokens() {
        let ldflags = parse_ldflags("-L/usr/lib/foo -lfoo -lbar -static");
        assert_eq!(ldflags.lib_dirs.len(), 1);
        assert_eq!(ldflags.libs.len(), 2);
        assert_eq!(ldflags.other, vec!["-static".to_string()]);
    }
}
