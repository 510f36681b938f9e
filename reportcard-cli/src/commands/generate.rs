//! `reportcard generate --temp <dir> --trial <id> <section.tex>...`

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::{composer, report};
use crate::GlobalArgs;

/// Compose and typeset the final report card.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Temporary working directory; `rc.tex` and `rc.pdf` are written here.
    #[arg(long, value_name = "DIR")]
    pub temp: PathBuf,

    /// Trial identifier shown on the report card.
    #[arg(long, value_name = "ID")]
    pub trial: String,

    /// Rendered section files, in order (see `reportcard section`).
    #[arg(required = true, value_name = "SECTION")]
    pub sections: Vec<String>,
}

impl GenerateArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let composer = composer(global)?;
        let outcome = composer.generate(&self.temp, &self.trial, &self.sections);
        report(&outcome, global)
    }
}
