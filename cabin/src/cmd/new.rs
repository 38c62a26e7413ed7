use std::path::Path;

use anyhow::{Context as _, Result};
use cabin_manifest::validate_package_name;
use clap::Args as ClapArgs;

use crate::cmd::Context;

#[derive(Debug, ClapArgs)]
pub struct New {
    name: Option<String>,

    /// Scaffold a binary (application) package (default).
    #[arg(long = "bin", conflicts_with = "lib")]
    bin: bool,

    /// Scaffold a library package (`include/` instead of `src/main.cc`).
    #[arg(long = "lib")]
    lib: bool,
}

impl New {
    pub fn run(&self, ctx: &Context) -> Result<()> {
        let name = self
            .name
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("package name must not be empty"))?;
        validate_package_name(name).map_err(|reason| anyhow::anyhow!(reason))?;

        let dir = ctx.cwd.join(name);
        if dir.exists() {
            anyhow::bail!("destination `{}` already exists", dir.display());
        }
        std::fs::create_dir(&dir).with_context(|| format!("creating {}", dir.display()))?;

        scaffold(&dir, name, self.lib)?;

        let kind = if self.lib { "library" } else { "binary (application)" };
        crate::term::created(ctx.color, kind, name);
        Ok(())
    }
}

/// Shared by `new` and `init`: lays down `cabin.toml`, the source tree,
/// `.gitignore`, and a fresh git repository.
pub fn scaffold(dir: &Path, name: &str, lib: bool) -> Result<()> {
    std::fs::write(dir.join("cabin.toml"), manifest_toml(name))
        .with_context(|| format!("writing {}", dir.join("cabin.toml").display()))?;
    std::fs::write(dir.join(".gitignore"), "/cabin-out\n")
        .with_context(|| format!("writing {}", dir.join(".gitignore").display()))?;

    if lib {
        let include = dir.join("include").join(name);
        std::fs::create_dir_all(&include)
            .with_context(|| format!("creating {}", include.display()))?;
        std::fs::write(include.join(format!("{name}.h")), library_header(name))
            .with_context(|| format!("writing into {}", include.display()))?;
    } else {
        let src = dir.join("src");
        std::fs::create_dir_all(&src).with_context(|| format!("creating {}", src.display()))?;
        std::fs::write(src.join("main.cc"), MAIN_CC)
            .with_context(|| format!("writing {}", src.join("main.cc").display()))?;
    }

    git2::Repository::init(dir).with_context(|| format!("initializing git repository in {}", dir.display()))?;
    Ok(())
}

fn manifest_toml(name: &str) -> String {
    format!(
        "[package]\nname = \"{name}\"\nedition = \"20\"\nversion = \"0.1.0\"\n\n[dependencies]\n"
    )
}

fn library_header(name: &str) -> String {
    format!("#pragma once\n\nnamespace {name} {{\n\ninline int placeholder() {{ return 0; }}\n\n}} // namespace {name}\n")
}

const MAIN_CC: &str = "#include <iostream>\n\nint main() {\n    std::cout << \"Hello, world!\\n\";\n    return 0;\n}\n";
