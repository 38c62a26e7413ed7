use anyhow::{Context as _, Result};
use cabin_build::{Layout, ProfileKind};
use clap::Args as ClapArgs;

use crate::cmd::Context;
use crate::project::Project;

#[derive(Debug, ClapArgs)]
pub struct Clean {
    /// Remove only the named profile's output directory (default: both).
    #[arg(short = 'p', long = "profile", value_name = "dev|release")]
    profile: Option<String>,
}

impl Clean {
    pub fn run(&self, ctx: &Context) -> Result<()> {
        let project = Project::load(&ctx.cwd)?;

        let kinds: Vec<ProfileKind> = match self.profile.as_deref() {
            Some("dev") => vec![ProfileKind::Dev],
            Some("release") => vec![ProfileKind::Release],
            Some(other) => anyhow::bail!("unknown profile `{other}`; expected `dev` or `release`"),
            None => vec![ProfileKind::Dev, ProfileKind::Release],
        };

        for kind in kinds {
            let layout = Layout::new(project.root().to_path_buf(), kind);
            if layout.out_base.exists() {
                std::fs::remove_dir_all(&layout.out_base)
                    .with_context(|| format!("removing {}", layout.out_base.display()))?;
            }
        }
        Ok(())
    }
}
