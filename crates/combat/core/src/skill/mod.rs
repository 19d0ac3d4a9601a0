//! Skill templates and per-owner instances.
//!
//! A [`SkillDefinition`] is an immutable template: where it can be slotted,
//! when it acts, and the effect/targeting/triggering policies that
//! parameterize it. A [`Skill`] is one unit's instance of a template,
//! tracking remaining uses.

pub mod effect;
pub mod targeting;
pub mod triggering;

pub use effect::{AttackEffect, DamageType, EffectKind, RecoverEffect, Scaling, ShieldEffect, ShieldType};
pub use targeting::{
    LowestHealthTargeting, PositionTargeting, SKILL_TARGET_ORDER, StandardSingleTargeting,
    TargetingKind,
};
pub use triggering::{InterruptCastingTrigger, TriggerKind};

use std::sync::Arc;

use bitflags::bitflags;
use strum::IntoEnumIterator;

use crate::party::{PartyPosition, PositionMask};

/// The ordered stages of one combat round.
///
/// Assigned skills act in the phase their definition names; the reaction
/// phase is never scheduled and is entered only when a trigger fires.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatPhase {
    /// Both parties ready themselves; shields and stances go up first.
    Preparation,
    /// Initial contact, where fast attackers land their first strikes.
    Preemptive,
    /// Ranged attacks, a step ahead of melee.
    Ranged,
    /// The regular melee exchange.
    Attack,
    /// Actions that take time to perform, typically channeled spells.
    Channel,
    /// The parties disengage and recover.
    Recovery,
    /// Reactive skills only; reachable solely through triggering.
    Reaction,
}

impl CombatPhase {
    pub fn is_reaction(self) -> bool {
        matches!(self, Self::Reaction)
    }

    /// The phases a round schedules, in resolution order.
    pub fn scripted() -> impl Iterator<Item = CombatPhase> {
        Self::iter().filter(|phase| !phase.is_reaction())
    }
}

bitflags! {
    /// Categorization tags a skill can carry in any combination.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct SkillTags: u8 {
        const MELEE  = 1 << 0;
        const RANGED = 1 << 1;
        const ATTACK = 1 << 2;
        const CAST   = 1 << 3;
    }
}

/// Immutable skill template shared by every instance created from it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    /// Unique template name, the registry key.
    pub name: String,
    /// Name shown to players and written into log entries.
    pub displayed_name: String,
    /// How many times a fresh instance can be used.
    pub base_usage: u32,
    /// Positions this skill can be assigned to.
    pub allowed_positions: PositionMask,
    /// Phase in which this skill acts.
    pub performed_phase: CombatPhase,
    pub tags: SkillTags,
    /// What the skill does to each target. A skill without an effect still
    /// declares and targets but applies nothing.
    pub effect: Option<EffectKind>,
    /// Who the skill can hit.
    pub targeting: TargetingKind,
    /// When a reactive skill fires. Checked only for reaction-phase skills.
    pub triggering: Option<TriggerKind>,
    /// Key into the string table holding this skill's log line template.
    pub log_format: String,
}

impl SkillDefinition {
    pub fn new(name: impl Into<String>, displayed_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            displayed_name: displayed_name.into(),
            base_usage: 1,
            allowed_positions: PositionMask::all(),
            performed_phase: CombatPhase::Attack,
            tags: SkillTags::empty(),
            effect: None,
            targeting: TargetingKind::StandardSingle(StandardSingleTargeting),
            triggering: None,
            log_format: String::new(),
        }
    }

    pub fn with_usage(mut self, base_usage: u32) -> Self {
        self.base_usage = base_usage;
        self
    }

    pub fn with_positions(mut self, allowed_positions: PositionMask) -> Self {
        self.allowed_positions = allowed_positions;
        self
    }

    pub fn with_phase(mut self, performed_phase: CombatPhase) -> Self {
        self.performed_phase = performed_phase;
        self
    }

    pub fn with_tags(mut self, tags: SkillTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_effect(mut self, effect: EffectKind) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn with_targeting(mut self, targeting: TargetingKind) -> Self {
        self.targeting = targeting;
        self
    }

    pub fn with_triggering(mut self, triggering: TriggerKind) -> Self {
        self.triggering = Some(triggering);
        self
    }

    pub fn with_log_format(mut self, log_format: impl Into<String>) -> Self {
        self.log_format = log_format.into();
        self
    }

    pub fn has_tag(&self, tag: SkillTags) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_reaction(&self) -> bool {
        self.performed_phase.is_reaction()
    }

    pub fn can_be_used_in_position(&self, position: PartyPosition) -> bool {
        self.allowed_positions.contains(position.mask())
    }
}

/// Index of a skill in its owner's skill list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SkillSlot(pub usize);

/// A per-owner instance of a skill template, tracking remaining uses.
///
/// Usage is committed at declaration: a valid declaration costs one use even
/// when a reaction later cancels the outcome.
#[derive(Clone, Debug)]
pub struct Skill {
    definition: Arc<SkillDefinition>,
    pub current_usage: u32,
    pub max_usage: u32,
}

impl Skill {
    pub fn instantiate(definition: Arc<SkillDefinition>) -> Self {
        let usage = definition.base_usage;
        Self {
            definition,
            current_usage: usage,
            max_usage: usage,
        }
    }

    pub fn definition(&self) -> &Arc<SkillDefinition> {
        &self.definition
    }

    pub fn is_spent(&self) -> bool {
        self.current_usage == 0
    }

    /// Spends one use.
    pub fn consume(&mut self) {
        self.current_usage = self.current_usage.saturating_sub(1);
    }

    /// Restores the full usage count.
    pub fn restore(&mut self) {
        self.current_usage = self.max_usage;
    }

    pub fn can_be_used_in_position(&self, position: PartyPosition) -> bool {
        self.definition.can_be_used_in_position(position)
    }
}
