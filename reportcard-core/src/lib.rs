//! reportcard core library: escaping, slot binding, diagnostics, config.
//!
//! Public API surface:
//! - [`escape`]: LaTeX escaping rule table
//! - [`types`]: slot values, groups, [`CapacityLimits`]
//! - [`binder`]: [`SlotBinder`] → [`Bound`]
//! - [`diagnostics`]: [`Diagnostic`] and [`Outcome`]
//! - [`config`] / [`resolve`]: YAML config and `package://` paths

pub mod binder;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod escape;
pub mod resolve;
pub mod types;

pub use binder::{Bound, SlotBinder};
pub use config::{Config, TypesetterConfig};
pub use diagnostics::{Diagnostic, Outcome, Status};
pub use error::ConfigError;
pub use escape::{escape, escape_all};
pub use types::{CapacityLimits, EscapePolicy, SlotGroup, SlotSet, SlotValue};
