//! Slot binder: turns positional argument groups into a validated [`SlotSet`].
//!
//! # Naming
//!
//! | Group             | Slot names                       | Policy  |
//! |-------------------|----------------------------------|---------|
//! | `Argument`        | `argument0` … `argument19`       | escaped |
//! | `RawArgument`     | `rawArgument0` …                 | raw     |
//! | `SeqArguments`    | `seqArguments0` … (lists)        | escaped |
//! | `RawSeqArguments` | `rawSeqArguments0` … (lists)     | raw     |
//! | `Section`         | `section0` … `section9`          | raw     |
//!
//! Every index below the group's limit is always bound. Missing values
//! become `""` (or an empty list), so a template may reference any in-range
//! placeholder. Over-limit input is recorded as
//! [`Diagnostic::CapacityExceeded`], once per offending group, and is still
//! bound under its natural index.

use crate::diagnostics::Diagnostic;
use crate::escape::escape;
use crate::types::{CapacityLimits, EscapePolicy, SlotGroup, SlotSet, SlotValue};

/// Binder output: the slots plus whatever went over capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bound {
    pub slots: SlotSet,
    pub diagnostics: Vec<Diagnostic>,
}

/// Accumulates slot groups for one render call.
#[derive(Debug, Clone)]
pub struct SlotBinder {
    limits: CapacityLimits,
    slots: SlotSet,
    diagnostics: Vec<Diagnostic>,
}

impl SlotBinder {
    pub fn new(limits: CapacityLimits) -> Self {
        Self {
            limits,
            slots: SlotSet::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Bind a scalar group: `<prefix>0 .. <prefix>{limit-1}`.
    pub fn scalars<S: AsRef<str>>(&mut self, group: SlotGroup, values: &[S]) -> &mut Self {
        debug_assert!(!group.is_sequence(), "{group} is a sequence group");
        let limit = group.limit(&self.limits);
        self.check(group.prefix(), limit, values.len());

        for (i, value) in values.iter().enumerate() {
            let value = apply(group.policy(), value.as_ref());
            self.slots.insert(group.slot_name(i), value);
        }
        for i in values.len()..limit {
            self.slots.insert(group.slot_name(i), "");
        }
        self
    }

    /// Bind a sequence group. Each inner list is checked against
    /// `sequence_elements` on its own.
    pub fn sequences<S: AsRef<str>>(&mut self, group: SlotGroup, values: &[Vec<S>]) -> &mut Self {
        debug_assert!(group.is_sequence(), "{group} is a scalar group");
        let limit = group.limit(&self.limits);
        self.check(group.prefix(), limit, values.len());

        let element_limit = self.limits.sequence_elements;
        for (i, seq) in values.iter().enumerate() {
            let name = group.slot_name(i);
            self.check(&name, element_limit, seq.len());
            let items: Vec<String> = seq
                .iter()
                .map(|v| apply(group.policy(), v.as_ref()))
                .collect();
            self.slots.insert(name, SlotValue::Sequence(items));
        }
        for i in values.len()..limit {
            self.slots.insert(group.slot_name(i), SlotValue::Sequence(Vec::new()));
        }
        self
    }

    /// Bind one free-standing scalar such as `trialID`.
    pub fn named(&mut self, name: &str, value: &str, policy: EscapePolicy) -> &mut Self {
        self.slots.insert(name, apply(policy, value));
        self
    }

    /// Bind `values` onto a fixed list of slot names, by position.
    ///
    /// `label` names the group in the capacity diagnostic. Names without a
    /// value are blanked; values without a name are dropped after reporting.
    pub fn fixed<S: AsRef<str>>(
        &mut self,
        label: &str,
        names: &[&str],
        values: &[S],
        policy: EscapePolicy,
    ) -> &mut Self {
        self.check(label, names.len(), values.len());
        for (i, name) in names.iter().enumerate() {
            let value = values.get(i).map(|v| v.as_ref()).unwrap_or("");
            self.slots.insert(*name, apply(policy, value));
        }
        self
    }

    pub fn finish(self) -> Bound {
        Bound {
            slots: self.slots,
            diagnostics: self.diagnostics,
        }
    }

    fn check(&mut self, group: &str, limit: usize, count: usize) {
        if count > limit {
            self.diagnostics.push(Diagnostic::CapacityExceeded {
                group: group.to_owned(),
                limit,
                count,
            });
        }
    }
}

fn apply(policy: EscapePolicy, value: &str) -> String {
    match policy {
        EscapePolicy::Escaped => escape(value),
        EscapePolicy::Raw => value.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
