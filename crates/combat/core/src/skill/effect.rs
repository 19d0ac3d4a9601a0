//! Skill effects: what a skill does to each target.
//!
//! Effects mutate the battle only through [`CombatDispatcher`] and record
//! what they did in the entry's log values. Field names written here are the
//! contract with the external formatter.

use crate::resolve::{CombatDispatcher, LogValues};
use crate::unit::{UnitId, UnitStatus};

/// Integer scaling factor in hundredths of a point per level.
///
/// `percent(150).apply(4)` is `floor(4 × 1.5) = 6`; integer math keeps
/// resolution deterministic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scaling(u32);

impl Scaling {
    pub const ZERO: Scaling = Scaling(0);

    pub const fn percent(hundredths: u32) -> Self {
        Self(hundredths)
    }

    pub fn apply(self, level: u32) -> u32 {
        level * self.0 / 100
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    Physical,
    Magic,
}

/// Which mitigation pool a shield effect grants to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShieldType {
    GrantArmor,
    GrantAbsorb,
}

/// Base value plus level-scaled contributions from the user's stats.
fn scaled_value(base: u32, character: Scaling, item: Scaling, user: &UnitStatus) -> u32 {
    base + character.apply(user.character_level) + item.apply(user.item_level)
}

/// Deals level-scaled damage, mitigated by the target's armor and absorb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackEffect {
    pub damage_type: DamageType,
    pub base_damage: u32,
    pub character_scaling: Scaling,
    pub item_scaling: Scaling,
}

impl AttackEffect {
    pub fn new(
        damage_type: DamageType,
        base_damage: u32,
        character_scaling: Scaling,
        item_scaling: Scaling,
    ) -> Self {
        Self {
            damage_type,
            base_damage,
            character_scaling,
            item_scaling,
        }
    }

    pub fn apply(
        &self,
        dispatcher: &mut CombatDispatcher<'_>,
        user: UnitId,
        target: UnitId,
        log: &mut LogValues,
    ) {
        let mut damage = scaled_value(
            self.base_damage,
            self.character_scaling,
            self.item_scaling,
            &dispatcher.unit(user).status,
        );

        // Armor blunts physical damage without being consumed.
        if self.damage_type == DamageType::Physical && dispatcher.unit(target).combat.armor > 0 {
            let mitigated = damage.min(dispatcher.unit(target).combat.armor);
            damage -= mitigated;
            log.insert("mitigated", mitigated);
        }

        // Absorb soaks whatever damage remains and is spent doing so.
        if damage > 0 && dispatcher.unit(target).combat.absorb > 0 {
            let absorbed = damage.min(dispatcher.unit(target).combat.absorb);
            damage -= absorbed;
            dispatcher.unit_mut(target).combat.absorb -= absorbed;
            log.insert("absorbed", absorbed);
        }

        dispatcher.deal_damage(user, target, damage);
        log.insert("damage", damage);
    }
}

/// Recovers level-scaled life. Dead targets are skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecoverEffect {
    pub base_recover: u32,
    pub character_scaling: Scaling,
    pub item_scaling: Scaling,
}

impl RecoverEffect {
    pub fn new(base_recover: u32, character_scaling: Scaling, item_scaling: Scaling) -> Self {
        Self {
            base_recover,
            character_scaling,
            item_scaling,
        }
    }

    pub fn apply(
        &self,
        dispatcher: &mut CombatDispatcher<'_>,
        user: UnitId,
        target: UnitId,
        log: &mut LogValues,
    ) {
        let recover = scaled_value(
            self.base_recover,
            self.character_scaling,
            self.item_scaling,
            &dispatcher.unit(user).status,
        );
        dispatcher.recover_life(user, target, recover, false);
        log.insert("healed", recover);
    }
}

/// Grants level-scaled armor or absorb to the target, additive and uncapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShieldEffect {
    pub shield_type: ShieldType,
    pub base_shield: u32,
    pub character_scaling: Scaling,
    pub item_scaling: Scaling,
}

impl ShieldEffect {
    pub fn new(
        shield_type: ShieldType,
        base_shield: u32,
        character_scaling: Scaling,
        item_scaling: Scaling,
    ) -> Self {
        Self {
            shield_type,
            base_shield,
            character_scaling,
            item_scaling,
        }
    }

    pub fn apply(
        &self,
        dispatcher: &mut CombatDispatcher<'_>,
        user: UnitId,
        target: UnitId,
        log: &mut LogValues,
    ) {
        let shield = scaled_value(
            self.base_shield,
            self.character_scaling,
            self.item_scaling,
            &dispatcher.unit(user).status,
        );
        let combat = &mut dispatcher.unit_mut(target).combat;
        match self.shield_type {
            ShieldType::GrantArmor => combat.armor += shield,
            ShieldType::GrantAbsorb => combat.absorb += shield,
        }
        log.insert("shielded", shield);
    }
}

/// The concrete effect a skill applies to each resolved target.
///
/// Each variant delegates to its struct implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    Attack(AttackEffect),
    Recover(RecoverEffect),
    Shield(ShieldEffect),
}

impl EffectKind {
    /// Applies the effect to one target, recording log fields as it goes.
    pub fn apply(
        &self,
        dispatcher: &mut CombatDispatcher<'_>,
        user: UnitId,
        target: UnitId,
        log: &mut LogValues,
    ) {
        match self {
            Self::Attack(effect) => effect.apply(dispatcher, user, target, log),
            Self::Recover(effect) => effect.apply(dispatcher, user, target, log),
            Self::Shield(effect) => effect.apply(dispatcher, user, target, log),
        }
    }
}

impl From<AttackEffect> for EffectKind {
    fn from(effect: AttackEffect) -> Self {
        Self::Attack(effect)
    }
}

impl From<RecoverEffect> for EffectKind {
    fn from(effect: RecoverEffect) -> Self {
        Self::Recover(effect)
    }
}

impl From<ShieldEffect> for EffectKind {
    fn from(effect: ShieldEffect) -> Self {
        Self::Shield(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::party::{Party, PartyId};
    use crate::unit::{Roster, Unit};

    fn battlefield() -> (Roster, Party, Party, UnitId, UnitId) {
        let mut roster = Roster::new();
        let attacker = roster.spawn(Unit::new("attacker").with_max_life(30).with_levels(1, 0));
        let defender = roster.spawn(Unit::new("defender").with_max_life(30));
        let mut offense = Party::new(PartyId(0));
        let mut defense = Party::new(PartyId(1));
        offense.add_member(&mut roster, attacker).unwrap();
        defense.add_member(&mut roster, defender).unwrap();
        (roster, offense, defense, attacker, defender)
    }

    #[test]
    fn scaling_floors_fractional_levels() {
        assert_eq!(Scaling::percent(50).apply(1), 0);
        assert_eq!(Scaling::percent(50).apply(3), 1);
        assert_eq!(Scaling::percent(100).apply(7), 7);
        assert_eq!(Scaling::ZERO.apply(9), 0);
    }

    #[test]
    fn attack_applies_armor_before_absorb() {
        let (mut roster, offense, defense, attacker, defender) = battlefield();
        roster[defender].combat.armor = 6;
        roster[defender].combat.absorb = 3;

        let effect = AttackEffect::new(
            DamageType::Physical,
            10,
            Scaling::percent(100),
            Scaling::ZERO,
        );
        let mut log = LogValues::new();
        let mut dispatcher = CombatDispatcher::new(&mut roster, &offense, &defense);
        // Level 1 attacker: 10 + 1 = 11 raw damage.
        effect.apply(&mut dispatcher, attacker, defender, &mut log);

        assert_eq!(log.get("mitigated"), Some("6"));
        assert_eq!(log.get("absorbed"), Some("3"));
        assert_eq!(log.get("damage"), Some("2"));
        assert_eq!(roster[defender].status.life, 28);
        // Armor is untouched; absorb was consumed.
        assert_eq!(roster[defender].combat.armor, 6);
        assert_eq!(roster[defender].combat.absorb, 0);
    }

    #[test]
    fn magic_damage_ignores_armor() {
        let (mut roster, offense, defense, attacker, defender) = battlefield();
        roster[defender].combat.armor = 50;

        let effect = AttackEffect::new(DamageType::Magic, 8, Scaling::ZERO, Scaling::ZERO);
        let mut log = LogValues::new();
        let mut dispatcher = CombatDispatcher::new(&mut roster, &offense, &defense);
        effect.apply(&mut dispatcher, attacker, defender, &mut log);

        assert_eq!(log.get("mitigated"), None);
        assert_eq!(log.get("damage"), Some("8"));
        assert_eq!(roster[defender].status.life, 22);
    }

    #[test]
    fn fully_absorbed_attack_logs_zero_damage() {
        let (mut roster, offense, defense, attacker, defender) = battlefield();
        roster[defender].combat.absorb = 20;

        let effect = AttackEffect::new(DamageType::Magic, 5, Scaling::ZERO, Scaling::ZERO);
        let mut log = LogValues::new();
        let mut dispatcher = CombatDispatcher::new(&mut roster, &offense, &defense);
        effect.apply(&mut dispatcher, attacker, defender, &mut log);

        assert_eq!(log.get("absorbed"), Some("5"));
        assert_eq!(log.get("damage"), Some("0"));
        assert_eq!(roster[defender].status.life, 30);
        assert_eq!(roster[defender].combat.absorb, 15);
    }

    #[test]
    fn recover_clamps_at_max_life_and_skips_dead() {
        let (mut roster, offense, defense, healer, patient) = battlefield();
        roster[patient].status.life = 28;

        let effect = RecoverEffect::new(4, Scaling::ZERO, Scaling::ZERO);
        let mut log = LogValues::new();
        {
            let mut dispatcher = CombatDispatcher::new(&mut roster, &offense, &defense);
            effect.apply(&mut dispatcher, healer, patient, &mut log);
        }
        assert_eq!(roster[patient].status.life, 30);
        assert_eq!(log.get("healed"), Some("4"));

        roster[patient].status.life = 0;
        let mut log = LogValues::new();
        {
            let mut dispatcher = CombatDispatcher::new(&mut roster, &offense, &defense);
            effect.apply(&mut dispatcher, healer, patient, &mut log);
        }
        // The dead target is skipped; the computed value is still recorded.
        assert_eq!(roster[patient].status.life, 0);
        assert_eq!(log.get("healed"), Some("4"));
    }

    #[test]
    fn shields_grant_the_chosen_pool() {
        let (mut roster, offense, defense, caster, ward) = battlefield();

        let armor = ShieldEffect::new(
            ShieldType::GrantArmor,
            6,
            Scaling::percent(50),
            Scaling::ZERO,
        );
        let absorb = ShieldEffect::new(ShieldType::GrantAbsorb, 4, Scaling::ZERO, Scaling::ZERO);
        let mut log = LogValues::new();
        let mut dispatcher = CombatDispatcher::new(&mut roster, &offense, &defense);
        // Level 1 caster: 6 + floor(0.5) = 6.
        armor.apply(&mut dispatcher, caster, ward, &mut log);
        absorb.apply(&mut dispatcher, caster, ward, &mut log);

        assert_eq!(roster[ward].combat.armor, 6);
        assert_eq!(roster[ward].combat.absorb, 4);
    }
}
