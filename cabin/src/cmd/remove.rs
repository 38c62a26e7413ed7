use anyhow::{Context as _, Result};
use clap::Args as ClapArgs;
use toml::value::Value;

use crate::cmd::Context;
use crate::project::Project;

#[derive(Debug, ClapArgs)]
pub struct Remove {
    #[arg(required = true)]
    deps: Vec<String>,
}

impl Remove {
    pub fn run(&self, ctx: &Context) -> Result<()> {
        let project = Project::load(&ctx.cwd)?;
        let manifest_path = project.root().join("cabin.toml");
        let text = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("reading {}", manifest_path.display()))?;
        let mut doc: Value = toml::from_str(&text)
            .with_context(|| format!("parsing {}", manifest_path.display()))?;

        let table = doc
            .as_table_mut()
            .context("cabin.toml is not a TOML table at its root")?;
        let deps = table
            .entry("dependencies")
            .or_insert_with(|| Value::Table(toml::value::Table::new()))
            .as_table_mut()
            .context("[dependencies] is not a table")?;

        let mut removed = Vec::new();
        for name in &self.deps {
            if deps.remove(name).is_some() {
                removed.push(name.clone());
            } else {
                crate::term::warning(
                    ctx.color,
                    format!("Dependency `{name}` not found in {}", manifest_path.display()),
                );
            }
        }

        let rendered = toml::to_string_pretty(&doc).context("rendering cabin.toml")?;
        std::fs::write(&manifest_path, rendered)
            .with_context(|| format!("writing {}", manifest_path.display()))?;

        if !removed.is_empty() {
            crate::term::removed(ctx.color, &removed, &manifest_path);
        }
        Ok(())
    }
}
