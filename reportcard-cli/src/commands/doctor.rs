use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use reportcard_compose::{
    composer::{BASIC_TEMPLATE, TOP_LEVEL_TEMPLATE},
    LatexTypesetter,
};
use reportcard_core::config;
use reportcard_renderer::TemplateEngine;

use super::{load_config, template_dir};
use crate::GlobalArgs;

/// Check the template directory and the LaTeX toolchain.
#[derive(Args, Debug)]
pub struct DoctorArgs {}

impl DoctorArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let config_file = match (&global.config, dirs::home_dir()) {
            (Some(path), _) => Some(path.clone()),
            (None, Some(home)) => Some(config::config_path_at(&home)),
            (None, None) => None,
        };
        if let Some(path) = config_file {
            let note = if path.is_file() { "" } else { " (not found, using defaults)" };
            println!("config: {}{note}", path.display());
        }

        let config = load_config(global)?;
        let mut failures = 0usize;

        match template_dir(global, &config) {
            Ok(dir) => {
                check(&mut failures, dir.is_dir(), &format!("template dir {}", dir.display()));
                let engine = TemplateEngine::new(&dir);
                for name in [TOP_LEVEL_TEMPLATE, BASIC_TEMPLATE] {
                    let path = engine.template_path(name);
                    check(&mut failures, engine.has_template(name), &path.display().to_string());
                }
            }
            Err(e) => check(&mut failures, false, &format!("template dir: {e:#}")),
        }

        let typesetter = LatexTypesetter::from_config(&config.typesetter);
        match typesetter.probe() {
            Ok(path) => check(&mut failures, true, &format!("typesetter {}", path.display())),
            Err(e) => check(&mut failures, false, &e.to_string()),
        }

        if failures > 0 {
            bail!("{failures} check(s) failed");
        }
        Ok(())
    }
}

fn check(failures: &mut usize, ok: bool, label: &str) {
    if ok {
        println!("{} {label}", "✓".green().bold());
    } else {
        *failures += 1;
        println!("{} {label}", "✗".red().bold());
    }
}
