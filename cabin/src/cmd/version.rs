use anyhow::Result;
use clap::Args as ClapArgs;

use crate::cmd::Context;
use crate::project;

#[derive(Debug, Default, ClapArgs)]
pub struct Version {}

impl Version {
    pub fn run(&self, ctx: &Context) -> Result<()> {
        println!("{}", project::version_line());
        if ctx.verbose > 0 {
            if let Ok(cxx) = cabin_compiler::detect_cxx() {
                println!("compiler: {cxx}");
            }
        }
        Ok(())
    }
}
