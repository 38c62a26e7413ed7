use anyhow::Result;
use clap::{Args as ClapArgs, CommandFactory};

use crate::cmd::{Args, Context};

#[derive(Debug, ClapArgs)]
pub struct Help {
    /// Print help for this subcommand instead of the root command.
    subcommand: Option<String>,
}

impl Help {
    pub fn run(&self, _ctx: &Context) -> Result<()> {
        let mut command = Args::command();
        match &self.subcommand {
            Some(name) => {
                let sub = command
                    .find_subcommand_mut(name)
                    .ok_or_else(|| anyhow::anyhow!("no such subcommand `{name}`"))?;
                sub.print_help()?;
            }
            None => command.print_help()?,
        }
        println!();
        Ok(())
    }
}
