//! Slot types shared by the binder, the renderer and the composer.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Whether a slot value is escaped before substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapePolicy {
    /// LaTeX control characters are neutralized at bind time.
    Escaped,
    /// Passed through verbatim; the caller vouches for the content.
    Raw,
}

impl fmt::Display for EscapePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EscapePolicy::Escaped => write!(f, "escaped"),
            EscapePolicy::Raw => write!(f, "raw"),
        }
    }
}

/// A bound value: one string or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    Scalar(String),
    Sequence(Vec<String>),
}

impl SlotValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            SlotValue::Scalar(s) => Some(s),
            SlotValue::Sequence(_) => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[String]> {
        match self {
            SlotValue::Scalar(_) => None,
            SlotValue::Sequence(v) => Some(v),
        }
    }

    /// Empty string or empty sequence.
    pub fn is_blank(&self) -> bool {
        match self {
            SlotValue::Scalar(s) => s.is_empty(),
            SlotValue::Sequence(v) => v.is_empty(),
        }
    }
}

impl From<&str> for SlotValue {
    fn from(s: &str) -> Self {
        SlotValue::Scalar(s.to_owned())
    }
}

impl From<String> for SlotValue {
    fn from(s: String) -> Self {
        SlotValue::Scalar(s)
    }
}

impl From<Vec<String>> for SlotValue {
    fn from(v: Vec<String>) -> Self {
        SlotValue::Sequence(v)
    }
}

/// Indexed slot families. Each group fixes its name prefix, its value kind
/// and its [`EscapePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotGroup {
    Argument,
    RawArgument,
    SeqArguments,
    RawSeqArguments,
    Section,
}

impl SlotGroup {
    pub fn all() -> &'static [SlotGroup] {
        &[
            SlotGroup::Argument,
            SlotGroup::RawArgument,
            SlotGroup::SeqArguments,
            SlotGroup::RawSeqArguments,
            SlotGroup::Section,
        ]
    }

    /// Placeholder name prefix; the slot name is `<prefix><index>`.
    pub fn prefix(&self) -> &'static str {
        match self {
            SlotGroup::Argument => "argument",
            SlotGroup::RawArgument => "rawArgument",
            SlotGroup::SeqArguments => "seqArguments",
            SlotGroup::RawSeqArguments => "rawSeqArguments",
            SlotGroup::Section => "section",
        }
    }

    pub fn policy(&self) -> EscapePolicy {
        match self {
            SlotGroup::Argument | SlotGroup::SeqArguments => EscapePolicy::Escaped,
            SlotGroup::RawArgument | SlotGroup::RawSeqArguments | SlotGroup::Section => {
                EscapePolicy::Raw
            }
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, SlotGroup::SeqArguments | SlotGroup::RawSeqArguments)
    }

    /// Configured capacity for this group.
    pub fn limit(&self, limits: &CapacityLimits) -> usize {
        match self {
            SlotGroup::Argument | SlotGroup::RawArgument => limits.arguments,
            SlotGroup::SeqArguments | SlotGroup::RawSeqArguments => limits.sequences,
            SlotGroup::Section => limits.sections,
        }
    }

    pub fn slot_name(&self, index: usize) -> String {
        format!("{}{}", self.prefix(), index)
    }
}

impl fmt::Display for SlotGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// Per-category slot caps. Templates are written against these numbers, so
/// raising one means extending the templates too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityLimits {
    /// `section<i>` placeholders in the top-level template.
    pub sections: usize,
    /// `argument<i>` / `rawArgument<i>` per section.
    pub arguments: usize,
    /// `seqArguments<i>` / `rawSeqArguments<i>` per section.
    pub sequences: usize,
    /// Elements inside a single sequence.
    pub sequence_elements: usize,
}

impl Default for CapacityLimits {
    fn default() -> Self {
        Self {
            sections: 10,
            arguments: 20,
            sequences: 20,
            sequence_elements: 20,
        }
    }
}

/// Slot name → value, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotSet(BTreeMap<String, SlotValue>);

impl SlotSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<SlotValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&SlotValue> {
        self.0.get(name)
    }

    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(SlotValue::as_scalar)
    }

    pub fn sequence(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(SlotValue::as_sequence)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SlotValue)> {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
