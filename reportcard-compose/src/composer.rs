//! Section composer: binds, renders and typesets report cards.
//!
//! ## Flow
//!
//! 1. `render_section` once per section: bind the four argument groups,
//!    render `<section>.tex` into the temp dir. No typesetting.
//! 2. `generate` once: bind `trialID` + `section0..9` (the paths from step 1),
//!    render `reportCard.tex` to `rc.tex`, typeset it to `rc.pdf`.
//!
//! `basic` is a self-contained alternative to 1+2 for the fixed one-page
//! layout.
//!
//! Every call returns an [`Outcome`]. Stage failures are recorded as
//! diagnostics and the pipeline carries on; the returned path is where the
//! artifact is (or would have been) written.

use std::path::{Path, PathBuf};

use reportcard_core::{
    CapacityLimits, Diagnostic, EscapePolicy, Outcome, SlotBinder, SlotGroup, SlotSet,
};
use reportcard_renderer::TemplateEngine;

use crate::typeset::{document_path, Typesetter};

/// Top-level template stitching the sections together.
pub const TOP_LEVEL_TEMPLATE: &str = "reportCard";
/// File stem of the composed document (`rc.tex` → `rc.pdf`).
pub const TOP_LEVEL_OUTPUT: &str = "rc";
pub const TRIAL_ID_SLOT: &str = "trialID";

pub const BASIC_TEMPLATE: &str = "basic";
/// Positional slot names of the basic layout.
pub const BASIC_SLOTS: [&str; 9] = [
    "trialID",
    "name",
    "creator",
    "type",
    "robotType",
    "description",
    "time",
    "totalTime",
    "totalTimeFigure",
];

/// Where templates live and how many slots they expose.
#[derive(Debug, Clone)]
pub struct ComposerConfig {
    pub template_dir: PathBuf,
    pub limits: CapacityLimits,
}

impl ComposerConfig {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            limits: CapacityLimits::default(),
        }
    }
}

/// The four argument groups of one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionArgs {
    /// `argument<i>`, escaped.
    pub arguments: Vec<String>,
    /// `rawArgument<i>`, verbatim.
    pub raw_arguments: Vec<String>,
    /// `seqArguments<i>`, escaped element-wise.
    pub seq_arguments: Vec<Vec<String>>,
    /// `rawSeqArguments<i>`, verbatim.
    pub raw_seq_arguments: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Composer
// ---------------------------------------------------------------------------

/// Report card generator.
///
/// All methods block until their files are written and the typesetter has
/// exited. Calls that share a temp directory overwrite each other's output
/// (`rc.tex`, `rc.pdf`, `<section>.tex`), so concurrent callers must use
/// distinct temp directories.
pub struct Composer<T> {
    config: ComposerConfig,
    engine: TemplateEngine,
    typesetter: T,
}

impl<T: Typesetter> Composer<T> {
    pub fn new(config: ComposerConfig, typesetter: T) -> Self {
        let engine = TemplateEngine::new(config.template_dir.clone());
        Composer {
            config,
            engine,
            typesetter,
        }
    }

    pub fn typesetter(&self) -> &T {
        &self.typesetter
    }

    /// Compose the final report card from already-rendered section files.
    ///
    /// Returns `<temp_dir>/rc.pdf`.
    pub fn generate<S: AsRef<str>>(
        &self,
        temp_dir: &Path,
        trial_id: &str,
        section_paths: &[S],
    ) -> Outcome {
        let temp_dir = absolutize(temp_dir);
        let markup = temp_dir.join(format!("{TOP_LEVEL_OUTPUT}.tex"));
        let mut outcome = Outcome::new(document_path(&markup, &temp_dir));

        let mut binder = SlotBinder::new(self.config.limits);
        binder
            .named(TRIAL_ID_SLOT, trial_id, EscapePolicy::Raw)
            .scalars(SlotGroup::Section, section_paths);
        let bound = binder.finish();
        outcome.extend(bound.diagnostics);

        let document = outcome.path.clone();
        if self.ensure_dir(&temp_dir, &mut outcome) {
            self.clear_stale(&[markup.as_path(), document.as_path()], &mut outcome);
        }
        if self.render_stage(TOP_LEVEL_TEMPLATE, &bound.slots, &markup, &mut outcome) {
            self.typeset_stage(&markup, &temp_dir, &mut outcome);
        }
        outcome
    }

    /// Render one section template into `<temp_dir>/<section>.tex`.
    ///
    /// The returned path is meant to be passed to [`Composer::generate`].
    /// A `section` that is not a bare file stem is rejected with a render
    /// diagnostic, and the returned path is then `temp_dir` itself.
    pub fn render_section(&self, temp_dir: &Path, section: &str, args: &SectionArgs) -> Outcome {
        let temp_dir = absolutize(temp_dir);
        if !is_bare_name(section) {
            let mut outcome = Outcome::new(temp_dir);
            outcome.push(Diagnostic::Render {
                template: section.to_owned(),
                message: "section name must be a bare template name without path separators"
                    .to_owned(),
            });
            return outcome;
        }
        let markup = temp_dir.join(format!("{section}.tex"));
        let mut outcome = Outcome::new(markup.clone());

        let mut binder = SlotBinder::new(self.config.limits);
        binder
            .scalars(SlotGroup::Argument, &args.arguments)
            .scalars(SlotGroup::RawArgument, &args.raw_arguments)
            .sequences(SlotGroup::SeqArguments, &args.seq_arguments)
            .sequences(SlotGroup::RawSeqArguments, &args.raw_seq_arguments);
        let bound = binder.finish();
        outcome.extend(bound.diagnostics);

        if self.ensure_dir(&temp_dir, &mut outcome) {
            self.clear_stale(&[markup.as_path()], &mut outcome);
        }
        self.render_stage(section, &bound.slots, &markup, &mut outcome);
        outcome
    }

    /// Render and typeset the fixed nine-slot layout.
    ///
    /// Returns `<temp_dir>/basic.pdf`.
    pub fn basic<S: AsRef<str>>(&self, temp_dir: &Path, args: &[S]) -> Outcome {
        let temp_dir = absolutize(temp_dir);
        let markup = temp_dir.join(format!("{BASIC_TEMPLATE}.tex"));
        let mut outcome = Outcome::new(document_path(&markup, &temp_dir));

        let mut binder = SlotBinder::new(self.config.limits);
        binder.fixed(BASIC_TEMPLATE, &BASIC_SLOTS, args, EscapePolicy::Escaped);
        let bound = binder.finish();
        outcome.extend(bound.diagnostics);

        let document = outcome.path.clone();
        if self.ensure_dir(&temp_dir, &mut outcome) {
            self.clear_stale(&[markup.as_path(), document.as_path()], &mut outcome);
        }
        if self.render_stage(BASIC_TEMPLATE, &bound.slots, &markup, &mut outcome) {
            self.typeset_stage(&markup, &temp_dir, &mut outcome);
        }
        outcome
    }

    // -----------------------------------------------------------------------
    // Stages
    // -----------------------------------------------------------------------

    /// `false` when the directory is missing and could not be created.
    fn ensure_dir(&self, dir: &Path, outcome: &mut Outcome) -> bool {
        if dir.is_dir() {
            return true;
        }
        tracing::info!("couldn't find temp dir {}; creating", dir.display());
        match std::fs::create_dir_all(dir) {
            Ok(()) => true,
            Err(e) => {
                outcome.push(Diagnostic::Io {
                    path: dir.to_path_buf(),
                    message: e.to_string(),
                });
                false
            }
        }
    }

    /// Remove markup and documents left by an earlier run.
    fn clear_stale(&self, paths: &[&Path], outcome: &mut Outcome) {
        for path in paths {
            match std::fs::remove_file(path) {
                Ok(()) => tracing::debug!("removed stale {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => outcome.push(Diagnostic::Io {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }),
            }
        }
    }

    /// `true` when fresh markup was written.
    fn render_stage(
        &self,
        template: &str,
        slots: &SlotSet,
        markup: &Path,
        outcome: &mut Outcome,
    ) -> bool {
        match self.engine.render_to(template, slots, markup) {
            Ok(_) => true,
            Err(e) => {
                outcome.push(Diagnostic::Render {
                    template: template.to_owned(),
                    message: e.detail(),
                });
                false
            }
        }
    }

    fn typeset_stage(&self, markup: &Path, output_dir: &Path, outcome: &mut Outcome) {
        match self
            .typesetter
            .typeset(markup, output_dir, self.engine.template_dir())
        {
            Ok(document) => {
                if document != outcome.path {
                    tracing::debug!("typesetter produced {}", document.display());
                    outcome.path = document;
                }
            }
            Err(e) => outcome.push(Diagnostic::Typeset {
                markup: markup.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }
}

/// A single path component: no separators, not `.` or `..`.
fn is_bare_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// `path` if absolute, otherwise joined onto the current directory.
fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
