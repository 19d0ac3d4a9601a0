//! Combat events and the round log.

use std::sync::Arc;

use crate::resolve::PartySide;
use crate::skill::{CombatPhase, SkillDefinition};
use crate::unit::UnitId;

/// Stages and hooks a combat event can describe.
///
/// Skill execution walks Declare → Target → Apply; a reactive skill's events
/// are inserted between the triggering skill's declaration and application,
/// which can stack further reactions. The effect hooks are reserved for
/// on-damage/on-death reactions; nothing emits them yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEventKind {
    // Execution flow events
    Declare,
    Target,
    Apply,

    // Skill effect events
    OnDamage,
    OnRecover,
    OnDeath,
}

/// Snapshot of "skill S used by U is now at stage K".
///
/// This is the payload triggering policies inspect; it captures the user's
/// side and the skill's phase at dispatch time.
#[derive(Clone, Debug)]
pub struct CombatEvent {
    pub kind: CombatEventKind,
    /// Side the skill's user fights for.
    pub party: PartySide,
    /// Phase the skill performs in, from its definition.
    pub phase: CombatPhase,
    pub skill: Arc<SkillDefinition>,
    pub user: UnitId,
    /// The user for Declare/Apply events, one resolved target for Target
    /// events.
    pub target: UnitId,
}

/// Insertion-ordered field mapping of one log entry.
///
/// Field names are the contract with the external formatter: `user`,
/// `target`, `skillname`, plus whatever the effect records (`damage`,
/// `mitigated`, `absorbed`, `healed`, `shielded`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogValues(Vec<(&'static str, String)>);

impl LogValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: impl ToString) {
        debug_assert!(self.get(key).is_none(), "duplicate log field {key}");
        self.0.push((key, value.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One effect application on one target, in round order.
#[derive(Clone, Debug)]
pub struct CombatLogEntry {
    /// The skill whose effect produced this entry.
    pub skill: Arc<SkillDefinition>,
    pub values: LogValues,
}

impl CombatLogEntry {
    pub fn new(skill: Arc<SkillDefinition>) -> Self {
        Self {
            skill,
            values: LogValues::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_values_preserve_insertion_order() {
        let mut values = LogValues::new();
        values.insert("user", "a");
        values.insert("damage", 7);
        values.insert("target", "b");

        let keys: Vec<_> = values.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["user", "damage", "target"]);
        assert_eq!(values.get("damage"), Some("7"));
        assert_eq!(values.get("missing"), None);
        assert_eq!(values.len(), 3);
    }
}
