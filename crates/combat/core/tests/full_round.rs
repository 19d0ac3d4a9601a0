//! Round resolution scenarios covering phase/position ordering, mitigation,
//! usage accounting, and log stability.

use std::sync::Arc;

use combat_core::{
    AttackEffect, CombatPhase, CombatResolver, DamageType, LowestHealthTargeting, Party, PartyId,
    PartyPosition, PositionMask, PositionTargeting, RecoverEffect, Roster, Scaling, ShieldEffect,
    ShieldType, Skill, SkillDefinition, SkillTags, TargetingKind, Unit, UnitId,
};

fn strike(phase: CombatPhase, positions: PositionMask, base_damage: u32) -> SkillDefinition {
    SkillDefinition::new("strike", "Strike")
        .with_usage(8)
        .with_positions(positions)
        .with_phase(phase)
        .with_tags(SkillTags::MELEE | SkillTags::ATTACK)
        .with_effect(
            AttackEffect::new(DamageType::Physical, base_damage, Scaling::ZERO, Scaling::ZERO)
                .into(),
        )
}

fn armor_up(base_shield: u32) -> SkillDefinition {
    SkillDefinition::new("armor_up", "Armor Up")
        .with_usage(8)
        .with_positions(PositionMask::DEFENSE)
        .with_phase(CombatPhase::Preparation)
        .with_effect(
            ShieldEffect::new(ShieldType::GrantArmor, base_shield, Scaling::ZERO, Scaling::ZERO)
                .into(),
        )
        .with_targeting(TargetingKind::Position(PositionTargeting {
            target_ally: true,
            position: PartyPosition::Defense,
        }))
}

fn field_medicine(base_recover: u32) -> SkillDefinition {
    SkillDefinition::new("field_medicine", "Field Medicine")
        .with_usage(8)
        .with_positions(PositionMask::SUPPORT)
        .with_phase(CombatPhase::Recovery)
        .with_effect(RecoverEffect::new(base_recover, Scaling::ZERO, Scaling::ZERO).into())
        .with_targeting(TargetingKind::LowestHealth(LowestHealthTargeting {
            target_ally_party: true,
            by_percentage: true,
        }))
}

/// Spawns a unit, adds it to the party, and assigns it to a position with
/// its first usable skill (if any).
fn enlist(
    roster: &mut Roster,
    party: &mut Party,
    name: &str,
    life: u32,
    position: PartyPosition,
    skill: Option<SkillDefinition>,
) -> UnitId {
    let mut unit = Unit::new(name).with_max_life(life);
    if let Some(definition) = skill {
        unit.learn(Skill::instantiate(Arc::new(definition)));
    }
    let id = roster.spawn(unit);
    party.add_member(roster, id).unwrap();
    party.set_assignment(roster, id, position).unwrap();
    id
}

fn log_field(resolver: &CombatResolver<'_>, index: usize, key: &str) -> String {
    resolver.event_log()[index]
        .values
        .get(key)
        .unwrap_or_default()
        .to_string()
}

#[test]
fn round_without_assignments_produces_no_events() {
    let mut roster = Roster::new();
    let mut offense = Party::new(PartyId(0));
    let mut defense = Party::new(PartyId(1));
    let idle = roster.spawn(Unit::new("idle").with_max_life(10));
    offense.add_member(&mut roster, idle).unwrap();
    let watcher = roster.spawn(Unit::new("watcher").with_max_life(10));
    defense.add_member(&mut roster, watcher).unwrap();

    let mut resolver = CombatResolver::new(&mut roster, &offense, &defense);
    resolver.generate_all_combat_events();
    assert!(resolver.event_log().is_empty());
}

#[test]
fn preparation_shield_mitigates_the_attack_phase() {
    let mut roster = Roster::new();
    let mut offense = Party::new(PartyId(0));
    let mut defense = Party::new(PartyId(1));
    enlist(
        &mut roster,
        &mut offense,
        "raider",
        30,
        PartyPosition::Attack,
        Some(strike(CombatPhase::Attack, PositionMask::ATTACK, 10)),
    );
    let guard = enlist(
        &mut roster,
        &mut defense,
        "guard",
        22,
        PartyPosition::Defense,
        Some(armor_up(6)),
    );

    let mut resolver = CombatResolver::new(&mut roster, &offense, &defense);
    resolver.generate_all_combat_events();

    assert_eq!(resolver.event_log().len(), 2);
    assert_eq!(log_field(&resolver, 0, "skillname"), "Armor Up");
    assert_eq!(log_field(&resolver, 0, "shielded"), "6");
    assert_eq!(log_field(&resolver, 1, "skillname"), "Strike");
    assert_eq!(log_field(&resolver, 1, "mitigated"), "6");
    assert_eq!(log_field(&resolver, 1, "damage"), "4");

    assert_eq!(roster[guard].status.life, 18);
    // Armor mitigates without being consumed.
    assert_eq!(roster[guard].combat.armor, 6);
}

#[test]
fn offense_acts_before_defense_in_the_same_phase_and_position() {
    let mut roster = Roster::new();
    let mut offense = Party::new(PartyId(0));
    let mut defense = Party::new(PartyId(1));
    enlist(
        &mut roster,
        &mut offense,
        "first",
        50,
        PartyPosition::Attack,
        Some(strike(CombatPhase::Attack, PositionMask::ATTACK, 1)),
    );
    enlist(
        &mut roster,
        &mut defense,
        "second",
        50,
        PartyPosition::Attack,
        Some(strike(CombatPhase::Attack, PositionMask::ATTACK, 1)),
    );

    let mut resolver = CombatResolver::new(&mut roster, &offense, &defense);
    resolver.generate_all_combat_events();

    assert_eq!(resolver.event_log().len(), 2);
    assert_eq!(log_field(&resolver, 0, "user"), "first");
    assert_eq!(log_field(&resolver, 1, "user"), "second");
}

#[test]
fn positions_resolve_support_then_attack_then_defense() {
    let mut roster = Roster::new();
    let mut offense = Party::new(PartyId(0));
    let mut defense = Party::new(PartyId(1));
    enlist(
        &mut roster,
        &mut offense,
        "vanguard",
        50,
        PartyPosition::Defense,
        Some(strike(CombatPhase::Attack, PositionMask::DEFENSE, 1)),
    );
    enlist(
        &mut roster,
        &mut offense,
        "duelist",
        50,
        PartyPosition::Attack,
        Some(strike(CombatPhase::Attack, PositionMask::ATTACK, 1)),
    );
    enlist(
        &mut roster,
        &mut offense,
        "adept",
        50,
        PartyPosition::Support,
        Some(strike(CombatPhase::Attack, PositionMask::SUPPORT, 1)),
    );
    enlist(
        &mut roster,
        &mut defense,
        "target",
        50,
        PartyPosition::Defense,
        None,
    );

    let mut resolver = CombatResolver::new(&mut roster, &offense, &defense);
    resolver.generate_all_combat_events();

    let users: Vec<_> = (0..3)
        .map(|index| log_field(&resolver, index, "user"))
        .collect();
    assert_eq!(users, ["adept", "duelist", "vanguard"]);
}

#[test]
fn phases_resolve_in_order_regardless_of_position_priority() {
    let mut roster = Roster::new();
    let mut offense = Party::new(PartyId(0));
    let mut defense = Party::new(PartyId(1));
    // The healer holds the higher-priority position but acts in the last
    // phase.
    enlist(
        &mut roster,
        &mut offense,
        "medic",
        50,
        PartyPosition::Support,
        Some(field_medicine(4)),
    );
    enlist(
        &mut roster,
        &mut offense,
        "duelist",
        50,
        PartyPosition::Attack,
        Some(strike(CombatPhase::Attack, PositionMask::ATTACK, 1)),
    );
    enlist(
        &mut roster,
        &mut defense,
        "target",
        50,
        PartyPosition::Defense,
        None,
    );

    let mut resolver = CombatResolver::new(&mut roster, &offense, &defense);
    resolver.generate_all_combat_events();

    assert_eq!(resolver.event_log().len(), 2);
    assert_eq!(log_field(&resolver, 0, "skillname"), "Strike");
    assert_eq!(log_field(&resolver, 1, "skillname"), "Field Medicine");
}

#[test]
fn each_valid_declaration_spends_exactly_one_use() {
    let mut roster = Roster::new();
    let mut offense = Party::new(PartyId(0));
    let mut defense = Party::new(PartyId(1));
    let raider = enlist(
        &mut roster,
        &mut offense,
        "raider",
        50,
        PartyPosition::Attack,
        Some(strike(CombatPhase::Attack, PositionMask::ATTACK, 1).with_usage(2)),
    );
    enlist(
        &mut roster,
        &mut defense,
        "target",
        50,
        PartyPosition::Defense,
        None,
    );
    let slot = roster[raider].find_skill("strike").unwrap();

    let mut resolver = CombatResolver::new(&mut roster, &offense, &defense);
    resolver.generate_all_combat_events();
    resolver.generate_all_combat_events();
    assert_eq!(resolver.event_log().len(), 1);
    drop(resolver);
    assert_eq!(roster[raider].skill(slot).unwrap().current_usage, 0);

    // The skill is spent; a further round declares nothing.
    let mut resolver = CombatResolver::new(&mut roster, &offense, &defense);
    resolver.generate_all_combat_events();
    assert!(resolver.event_log().is_empty());
}

#[test]
fn declaration_without_targets_is_interrupted_and_free() {
    let mut roster = Roster::new();
    let mut offense = Party::new(PartyId(0));
    let mut defense = Party::new(PartyId(1));
    let raider = enlist(
        &mut roster,
        &mut offense,
        "raider",
        50,
        PartyPosition::Attack,
        Some(strike(CombatPhase::Attack, PositionMask::ATTACK, 1)),
    );
    let corpse = enlist(
        &mut roster,
        &mut defense,
        "corpse",
        10,
        PartyPosition::Defense,
        None,
    );
    roster[corpse].status.life = 0;
    let slot = roster[raider].find_skill("strike").unwrap();

    let mut resolver = CombatResolver::new(&mut roster, &offense, &defense);
    resolver.generate_all_combat_events();
    assert!(resolver.event_log().is_empty());
    drop(resolver);
    assert_eq!(roster[raider].skill(slot).unwrap().current_usage, 8);
}

#[test]
fn dead_users_do_not_act() {
    let mut roster = Roster::new();
    let mut offense = Party::new(PartyId(0));
    let mut defense = Party::new(PartyId(1));
    let raider = enlist(
        &mut roster,
        &mut offense,
        "raider",
        50,
        PartyPosition::Attack,
        Some(strike(CombatPhase::Attack, PositionMask::ATTACK, 1)),
    );
    let guard = enlist(
        &mut roster,
        &mut defense,
        "guard",
        50,
        PartyPosition::Defense,
        None,
    );
    roster[raider].status.life = 0;

    let mut resolver = CombatResolver::new(&mut roster, &offense, &defense);
    resolver.generate_all_combat_events();
    assert!(resolver.event_log().is_empty());
    drop(resolver);
    assert_eq!(roster[guard].status.life, 50);
}

#[test]
fn repeated_rounds_on_stable_state_produce_identical_logs() {
    let mut roster = Roster::new();
    let mut offense = Party::new(PartyId(0));
    let mut defense = Party::new(PartyId(1));
    // Shielding and healing at full life leave no lasting state behind:
    // armor is reset each round and the heal clamps at maximum.
    enlist(
        &mut roster,
        &mut offense,
        "medic",
        50,
        PartyPosition::Support,
        Some(field_medicine(4)),
    );
    let guard = enlist(
        &mut roster,
        &mut defense,
        "guard",
        50,
        PartyPosition::Defense,
        Some(armor_up(6)),
    );

    let mut resolver = CombatResolver::new(&mut roster, &offense, &defense);
    resolver.generate_all_combat_events();
    let first: Vec<Vec<(String, String)>> = resolver
        .event_log()
        .iter()
        .map(|entry| {
            entry
                .values
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect()
        })
        .collect();

    resolver.generate_all_combat_events();
    let second: Vec<Vec<(String, String)>> = resolver
        .event_log()
        .iter()
        .map(|entry| {
            entry
                .values
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect()
        })
        .collect();

    assert_eq!(first, second);
    drop(resolver);
    assert_eq!(roster[guard].combat.armor, 6);
}

#[test]
fn position_targeted_recovery_on_a_dead_ally_changes_nothing() {
    let mut roster = Roster::new();
    let mut offense = Party::new(PartyId(0));
    let mut defense = Party::new(PartyId(1));
    let triage = SkillDefinition::new("triage", "Triage")
        .with_usage(8)
        .with_positions(PositionMask::SUPPORT)
        .with_phase(CombatPhase::Recovery)
        .with_effect(RecoverEffect::new(5, Scaling::ZERO, Scaling::ZERO).into())
        .with_targeting(TargetingKind::Position(PositionTargeting {
            target_ally: true,
            position: PartyPosition::Defense,
        }));
    let casualty = enlist(
        &mut roster,
        &mut offense,
        "casualty",
        10,
        PartyPosition::Defense,
        None,
    );
    let medic = enlist(
        &mut roster,
        &mut offense,
        "medic",
        50,
        PartyPosition::Support,
        Some(triage),
    );
    enlist(
        &mut roster,
        &mut defense,
        "watcher",
        50,
        PartyPosition::Defense,
        None,
    );
    roster[casualty].status.life = 0;
    let slot = roster[medic].find_skill("triage").unwrap();

    let mut resolver = CombatResolver::new(&mut roster, &offense, &defense);
    resolver.generate_all_combat_events();

    // The dead unit is still a valid position target, so the skill fires
    // and logs, but the recovery itself skips the dead.
    assert_eq!(resolver.event_log().len(), 1);
    assert_eq!(log_field(&resolver, 0, "healed"), "5");
    assert_eq!(log_field(&resolver, 0, "target"), "casualty");
    drop(resolver);
    assert_eq!(roster[casualty].status.life, 0);
    assert_eq!(roster[medic].skill(slot).unwrap().current_usage, 7);
}
