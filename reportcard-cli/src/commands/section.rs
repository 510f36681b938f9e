//! `reportcard section --temp <dir> <name> [--arg V]... [--raw-arg V]... [--seq JSON]... [--raw-seq JSON]...`

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use reportcard_compose::SectionArgs as Groups;

use super::{composer, report};
use crate::{GlobalArgs, SeqArg};

/// Render one section template.
#[derive(Args, Debug)]
pub struct SectionArgs {
    /// Temporary working directory (created if missing).
    #[arg(long, value_name = "DIR")]
    pub temp: PathBuf,

    /// Section template name, without `.tex`.
    pub name: String,

    /// Value for `argument<i>`, escaped. Repeat in order.
    #[arg(long = "arg", value_name = "VALUE")]
    pub arguments: Vec<String>,

    /// Value for `rawArgument<i>`, inserted verbatim.
    #[arg(long = "raw-arg", value_name = "VALUE")]
    pub raw_arguments: Vec<String>,

    /// JSON array for `seqArguments<i>`, escaped element-wise.
    #[arg(long = "seq", value_name = "JSON")]
    pub seq_arguments: Vec<SeqArg>,

    /// JSON array for `rawSeqArguments<i>`, inserted verbatim.
    #[arg(long = "raw-seq", value_name = "JSON")]
    pub raw_seq_arguments: Vec<SeqArg>,
}

impl SectionArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let composer = composer(global)?;
        let groups = Groups {
            arguments: self.arguments,
            raw_arguments: self.raw_arguments,
            seq_arguments: self.seq_arguments.into_iter().map(Into::into).collect(),
            raw_seq_arguments: self.raw_seq_arguments.into_iter().map(Into::into).collect(),
        };
        let outcome = composer.render_section(&self.temp, &self.name, &groups);
        report(&outcome, global)
    }
}
