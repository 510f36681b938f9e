//! # reportcard-renderer
//!
//! Tera-based engine that fills LaTeX templates with bound slots and writes
//! the resulting markup.
//!
//! Templates use tera syntax inside otherwise ordinary LaTeX. Tera reads
//! `{#` as the start of a comment, so macro parameters need a space:
//! `\newcommand{\foo}[1]{ #1}`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use reportcard_core::{CapacityLimits, SlotBinder, SlotGroup};
//! use reportcard_renderer::TemplateEngine;
//!
//! fn render_intro(out: &std::path::Path) {
//!     let mut binder = SlotBinder::new(CapacityLimits::default());
//!     binder.scalars(SlotGroup::Argument, &["50% done"]);
//!     let bound = binder.finish();
//!
//!     let engine = TemplateEngine::new("/srv/report_card/tex_templates");
//!     if let Err(e) = engine.render_to("intro", &bound.slots, out) {
//!         eprintln!("{}", e.detail());
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::to_tera_context;
pub use engine::{TemplateEngine, TEMPLATE_EXT};
pub use error::RenderError;
