//! `reportcard basic --temp <dir> <trial> <name> <creator> <type> <robot> <description> <time> <total> <figure>`

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::{composer, report};
use crate::GlobalArgs;

/// Render and typeset the basic report card.
#[derive(Args, Debug)]
pub struct BasicArgs {
    /// Temporary working directory; `basic.tex` and `basic.pdf` are written here.
    #[arg(long, value_name = "DIR")]
    pub temp: PathBuf,

    /// trial id, name, creator, type, robot type, description, time,
    /// total time, total-time figure, in that order.
    #[arg(value_name = "FIELD")]
    pub fields: Vec<String>,
}

impl BasicArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let composer = composer(global)?;
        let outcome = composer.basic(&self.temp, &self.fields);
        report(&outcome, global)
    }
}
