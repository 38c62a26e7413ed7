use anyhow::{Context as _, Result};
use cabin_manifest::validate_dep_name;
use clap::Args as ClapArgs;
use toml::value::{Table, Value};

use crate::cmd::Context;
use crate::project::Project;

#[derive(Debug, ClapArgs)]
pub struct Add {
    /// One or more dependency names to add to `[dependencies]`.
    #[arg(required = true)]
    deps: Vec<String>,

    /// Record this dependency as a `system = true` (pkg-config) one.
    #[arg(long = "sys")]
    sys: bool,

    #[arg(long = "version", value_name = "REQ")]
    version: Option<String>,

    #[arg(long = "tag", conflicts_with_all = ["rev", "branch"])]
    tag: Option<String>,

    #[arg(long = "rev", conflicts_with_all = ["tag", "branch"])]
    rev: Option<String>,

    #[arg(long = "branch", conflicts_with_all = ["tag", "rev"])]
    branch: Option<String>,
}

impl Add {
    pub fn run(&self, ctx: &Context) -> Result<()> {
        for name in &self.deps {
            validate_dep_name(name).map_err(|reason| anyhow::anyhow!(reason))?;
        }

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
            .or_insert_with(|| Value::Table(Table::new()))
            .as_table_mut()
            .context("[dependencies] is not a table")?;

        for name in &self.deps {
            deps.insert(name.clone(), self.entry_for(name));
        }

        let rendered = toml::to_string_pretty(&doc).context("rendering cabin.toml")?;
        std::fs::write(&manifest_path, rendered)
            .with_context(|| format!("writing {}", manifest_path.display()))?;

        crate::term::added(ctx.color, &self.deps, &manifest_path);
        Ok(())
    }

    fn entry_for(&self, name: &str) -> Value {
        let mut entry = Table::new();
        if self.sys {
            entry.insert("system".to_string(), Value::Boolean(true));
            if let Some(version) = &self.version {
                entry.insert("version".to_string(), Value::String(version.clone()));
            }
        } else if let Some(version) = &self.version {
            entry.insert("version".to_string(), Value::String(version.clone()));
        } else {
            entry.insert(
                "git".to_string(),
                Value::String(format!("https://github.com/{name}/{name}")),
            );
            if let Some(tag) = &self.tag {
                entry.insert("tag".to_string(), Value::String(tag.clone()));
            } else if let Some(rev) = &self.rev {
                entry.insert("rev".to_string(), Value::String(rev.clone()));
            } else if let Some(branch) = &self.branch {
                entry.insert("branch".to_string(), Value::String(branch.clone()));
            }
        }
        Value::Table(entry)
    }
}
