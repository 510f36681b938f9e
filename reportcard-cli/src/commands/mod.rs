//! Subcommands plus the setup they share: config loading, composer
//! construction and outcome printing.

pub mod basic;
pub mod doctor;
pub mod generate;
pub mod section;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;

use reportcard_compose::{Composer, ComposerConfig, LatexTypesetter};
use reportcard_core::{config, Config, Outcome};

use crate::GlobalArgs;

/// Config file (or defaults) with command-line overrides applied.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => config::load_from(path)
            .with_context(|| format!("cannot load config '{}'", path.display()))?,
        None => config::load().context("cannot load ~/.reportcard/config.yaml")?,
    };
    if let Some(program) = &global.typesetter {
        config.typesetter.program = program.clone();
    }
    Ok(config)
}

pub(crate) fn template_dir(global: &GlobalArgs, config: &Config) -> Result<PathBuf> {
    match &global.template_dir {
        Some(dir) => Ok(dir.clone()),
        None => config.resolve_template_dir().context(
            "cannot resolve the template directory; pass --template-dir or set `template_dir`/`packages` in the config",
        ),
    }
}

pub(crate) fn composer(global: &GlobalArgs) -> Result<Composer<LatexTypesetter>> {
    let config = load_config(global)?;
    let template_dir = template_dir(global, &config)?;
    tracing::debug!("templates from {}", template_dir.display());
    Ok(Composer::new(
        ComposerConfig {
            template_dir,
            limits: config.limits,
        },
        LatexTypesetter::from_config(&config.typesetter),
    ))
}

/// Path on stdout, diagnostics on stderr (or everything as JSON).
pub(crate) fn report(outcome: &Outcome, global: &GlobalArgs) -> Result<()> {
    if global.json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        println!("{}", outcome.path.display());
        for diagnostic in &outcome.diagnostics {
            eprintln!("{} {diagnostic}", "warning:".yellow().bold());
        }
    }

    if global.strict && !outcome.is_clean() {
        bail!(
            "{} diagnostic(s) recorded for {}",
            outcome.diagnostics.len(),
            outcome.path.display()
        );
    }
    Ok(())
}
