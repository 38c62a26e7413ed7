use anyhow::{Context as _, Result};
use cabin_manifest::validate_package_name;
use clap::Args as ClapArgs;

use crate::cmd::new::scaffold;
use crate::cmd::Context;

#[derive(Debug, ClapArgs)]
pub struct Init {
    #[arg(long = "bin", conflicts_with = "lib")]
    bin: bool,

    #[arg(long = "lib")]
    lib: bool,
}

impl Init {
    pub fn run(&self, ctx: &Context) -> Result<()> {
        let name = ctx
            .cwd
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("package name must not be empty"))?;
        validate_package_name(name).map_err(|reason| anyhow::anyhow!(reason))?;

        if ctx.cwd.join("cabin.toml").exists() {
            anyhow::bail!("`cabin.toml` already exists in {}", ctx.cwd.display());
        }

        scaffold(&ctx.cwd, name, self.lib).context("scaffolding package")?;

        let kind = if self.lib { "library" } else { "binary (application)" };
        crate::term::created(ctx.color, kind, name);
        Ok(())
    }
}
