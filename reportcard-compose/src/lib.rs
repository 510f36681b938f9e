//! # reportcard-compose
//!
//! Report card orchestration: per-section rendering, top-level composition
//! and the external typesetting step.
//!
//! Build a [`Composer`] with a [`ComposerConfig`] and any [`Typesetter`]
//! (normally [`LatexTypesetter`]), then call [`Composer::render_section`] for
//! each section and [`Composer::generate`] once with the resulting paths.

pub mod composer;
pub mod error;
pub mod typeset;

pub use composer::{Composer, ComposerConfig, SectionArgs, BASIC_SLOTS};
pub use error::TypesetError;
pub use typeset::{LatexTypesetter, Typesetter};
