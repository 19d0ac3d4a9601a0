//! Skill template registry and the built-in skill set.

use std::collections::HashMap;
use std::sync::Arc;

use combat_core::{
    AttackEffect, CombatPhase, DamageType, InterruptCastingTrigger, LowestHealthTargeting,
    PartyPosition, PositionMask, PositionTargeting, RecoverEffect, Scaling, ShieldEffect,
    ShieldType, Skill, SkillDefinition, SkillRepository, SkillTags, TargetingKind, TriggerKind,
    Unit,
};
use tracing::debug;

/// Keyed storage of skill templates.
#[derive(Debug, Default)]
pub struct SkillBook {
    templates: HashMap<String, Arc<SkillDefinition>>,
}

impl SkillBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// A book preloaded with the prototype skill set.
    pub fn builtin() -> Self {
        let mut book = Self::new();
        for definition in builtin_definitions() {
            book.register(definition);
        }
        book
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Creates a fresh instance of a template.
    pub fn create(&self, name: &str) -> Option<Skill> {
        self.lookup(name).map(Skill::instantiate)
    }

    /// Teaches a unit a skill by template name. A no-op when the unit
    /// already knows it or the template is unknown; returns whether the
    /// skill was learned.
    pub fn learn(&self, unit: &mut Unit, name: &str) -> bool {
        if unit.has_skill(name) {
            return false;
        }
        match self.create(name) {
            Some(skill) => unit.learn(skill),
            None => false,
        }
    }
}

impl SkillRepository for SkillBook {
    fn register(&mut self, definition: SkillDefinition) -> bool {
        if self.templates.contains_key(&definition.name) {
            return false;
        }
        debug!(name = %definition.name, "registered skill template");
        self.templates
            .insert(definition.name.clone(), Arc::new(definition));
        true
    }

    fn lookup(&self, name: &str) -> Option<Arc<SkillDefinition>> {
        self.templates.get(name).cloned()
    }
}

fn builtin_definitions() -> Vec<SkillDefinition> {
    vec![
        SkillDefinition::new("slash_1", "Slash I")
            .with_usage(8)
            .with_positions(PositionMask::ATTACK)
            .with_phase(CombatPhase::Attack)
            .with_tags(SkillTags::MELEE | SkillTags::ATTACK)
            .with_effect(
                AttackEffect::new(
                    DamageType::Physical,
                    10,
                    Scaling::percent(100),
                    Scaling::percent(100),
                )
                .into(),
            )
            .with_log_format("generic_attack_log"),
        SkillDefinition::new("first_aid_1", "First Aid")
            .with_usage(8)
            .with_positions(PositionMask::DEFENSE | PositionMask::SUPPORT)
            .with_phase(CombatPhase::Recovery)
            .with_effect(RecoverEffect::new(4, Scaling::percent(100), Scaling::ZERO).into())
            .with_targeting(TargetingKind::LowestHealth(LowestHealthTargeting {
                target_ally_party: true,
                by_percentage: true,
            }))
            .with_log_format("generic_heal_log"),
        SkillDefinition::new("shield_up_1", "Shield Up")
            .with_usage(8)
            .with_positions(PositionMask::DEFENSE)
            .with_phase(CombatPhase::Preparation)
            .with_effect(
                ShieldEffect::new(
                    ShieldType::GrantArmor,
                    6,
                    Scaling::percent(50),
                    Scaling::percent(100),
                )
                .into(),
            )
            .with_targeting(TargetingKind::Position(PositionTargeting {
                target_ally: true,
                position: PartyPosition::Defense,
            }))
            .with_log_format("generic_shield_log"),
        SkillDefinition::new("mana_bolt_1", "Mana Bolt I")
            .with_usage(8)
            .with_positions(PositionMask::SUPPORT | PositionMask::ATTACK)
            .with_phase(CombatPhase::Channel)
            .with_tags(SkillTags::CAST | SkillTags::RANGED)
            .with_effect(
                AttackEffect::new(
                    DamageType::Magic,
                    6,
                    Scaling::percent(100),
                    Scaling::percent(50),
                )
                .into(),
            )
            .with_log_format("generic_attack_log"),
        SkillDefinition::new("counterspell_1", "Counterspell")
            .with_usage(3)
            .with_positions(PositionMask::SUPPORT)
            .with_phase(CombatPhase::Reaction)
            .with_triggering(TriggerKind::InterruptCasting(InterruptCastingTrigger))
            .with_effect(
                AttackEffect::new(DamageType::Magic, 3, Scaling::percent(50), Scaling::ZERO)
                    .into(),
            )
            .with_log_format("generic_attack_log"),
    ]
}
