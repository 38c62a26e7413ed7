use anyhow::Result;
use clap::Args as ClapArgs;

use crate::cmd::Context;

#[derive(Debug, ClapArgs)]
pub struct Search {
    query: String,
}

impl Search {
    pub fn run(&self, _ctx: &Context) -> Result<()> {
        anyhow::bail!(
            "no package registry is configured; `cabin search {}` has nothing to query \
             (dependencies are resolved by git URL, local path, or pkg-config name)",
            self.query
        )
    }
}
