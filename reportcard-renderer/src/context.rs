//! Slot set → [`tera::Context`].
//!
//! Scalars become strings and sequences become arrays, so templates can use
//! `{{ argument0 }}`, `{{ seqArguments0[1] }}` or
//! `{% for row in rawSeqArguments0 %}...{% endfor %}`.

use reportcard_core::SlotSet;

use crate::error::RenderError;

/// Convert to a [`tera::Context`] for rendering.
pub fn to_tera_context(slots: &SlotSet) -> Result<tera::Context, RenderError> {
    tera::Context::from_serialize(slots).map_err(RenderError::from)
}
