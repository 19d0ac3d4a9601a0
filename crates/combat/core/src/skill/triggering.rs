//! Triggering policies: when a reactive skill fires.
//!
//! A skill performed in the reaction phase has its trigger checked against
//! every combat event. A firing trigger resolves the reactive skill in full
//! before the triggering event's skill continues.

use crate::resolve::{CombatDispatcher, CombatEvent, CombatEventKind};
use crate::skill::SkillTags;
use crate::unit::UnitId;

/// Fires when an opposing party declares a cast-tagged skill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterruptCastingTrigger;

impl InterruptCastingTrigger {
    pub fn can_react(
        &self,
        dispatcher: &CombatDispatcher<'_>,
        skill_owner: UnitId,
        event: &CombatEvent,
    ) -> bool {
        if event.kind != CombatEventKind::Declare {
            return false;
        }
        // Only declarations from the other side of the battle count.
        if dispatcher.unit_party(skill_owner) == Some(event.party) {
            return false;
        }
        // TODO: cap the level of spells this can interrupt once skills carry
        // a level.
        event.skill.has_tag(SkillTags::CAST)
    }
}

/// When a reactive skill fires.
///
/// Each variant delegates to its struct implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerKind {
    InterruptCasting(InterruptCastingTrigger),
}

impl TriggerKind {
    /// Whether the owner's reactive skill should fire in response to the
    /// event.
    pub fn can_react(
        &self,
        dispatcher: &CombatDispatcher<'_>,
        skill_owner: UnitId,
        event: &CombatEvent,
    ) -> bool {
        match self {
            Self::InterruptCasting(trigger) => trigger.can_react(dispatcher, skill_owner, event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::party::{Party, PartyId};
    use crate::resolve::PartySide;
    use crate::skill::{CombatPhase, SkillDefinition, SkillTags};
    use crate::unit::{Roster, Unit};
    use std::sync::Arc;

    fn event(kind: CombatEventKind, party: PartySide, tags: SkillTags, unit: UnitId) -> CombatEvent {
        let definition = Arc::new(
            SkillDefinition::new("bolt", "Bolt")
                .with_phase(CombatPhase::Channel)
                .with_tags(tags),
        );
        CombatEvent {
            kind,
            party,
            phase: definition.performed_phase,
            skill: definition,
            user: unit,
            target: unit,
        }
    }

    #[test]
    fn reacts_only_to_opposing_cast_declarations() {
        let mut roster = Roster::new();
        let caster = roster.spawn(Unit::new("caster").with_max_life(10));
        let watcher = roster.spawn(Unit::new("watcher").with_max_life(10));
        let mut offense = Party::new(PartyId(0));
        let mut defense = Party::new(PartyId(1));
        offense.add_member(&mut roster, caster).unwrap();
        defense.add_member(&mut roster, watcher).unwrap();

        let trigger = InterruptCastingTrigger;
        let dispatcher = CombatDispatcher::new(&mut roster, &offense, &defense);

        let cast = event(
            CombatEventKind::Declare,
            PartySide::Offense,
            SkillTags::CAST,
            caster,
        );
        assert!(trigger.can_react(&dispatcher, watcher, &cast));

        // Same side as the declaration: no reaction.
        assert!(!trigger.can_react(&dispatcher, caster, &cast));

        let melee = event(
            CombatEventKind::Declare,
            PartySide::Offense,
            SkillTags::MELEE,
            caster,
        );
        assert!(!trigger.can_react(&dispatcher, watcher, &melee));

        let apply = event(
            CombatEventKind::Apply,
            PartySide::Offense,
            SkillTags::CAST,
            caster,
        );
        assert!(!trigger.can_react(&dispatcher, watcher, &apply));
    }
}
