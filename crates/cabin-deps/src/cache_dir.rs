use std::env;
use std::path::PathBuf;

use cabin_manifest::GitTarget;

/// `<XDG_CACHE_HOME or $HOME/.cache>/cabin/git/src/<name>[-<target>]`.
pub(crate) fn git_dest(name: &str, target: Option<&GitTarget>) -> PathBuf {
    let base = cache_home().join("cabin").join("git").join("src");
    match target {
        Some(target) => base.join(format!("{name}-{}", target_token(target))),
        None => base.join(name),
    }
}

fn target_token(target: &GitTarget) -> &str {
    match target {
        GitTarget::Rev(rev) => rev,
        GitTarget::Tag(tag) => tag,
        GitTarget::Branch(branch) => branch,
    }
}

fn cache_home() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CACHE_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg);
        }
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".cache")
}
