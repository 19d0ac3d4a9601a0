//! Demo battle runner.
//!
//! Assembles the built-in village party against a goblin warband and
//! resolves combat rounds, printing the formatted event log after each one.
//!
//! ```bash
//! skirmish --rounds 3
//! RUST_LOG=debug skirmish --heal-between
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use combat_content::{SkillBook, StringTable, UnitCompendium};
use combat_core::{
    CombatConfig, CombatResolver, Party, PartyId, PartyPosition, Roster, UnitId,
};

#[derive(Debug, Parser)]
#[command(name = "skirmish", about = "Resolve party-vs-party combat rounds")]
struct Args {
    /// Number of rounds to resolve.
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// TOML file overriding the default combat configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fully heal both parties between rounds.
    #[arg(long)]
    heal_between: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => CombatConfig::default(),
    };

    let skills = SkillBook::builtin();
    let units = UnitCompendium::builtin();
    let strings = StringTable::builtin();

    let mut roster = Roster::new();
    let player_party = build_player_party(&mut roster, &units, &skills)?;
    let enemy_party = build_enemy_party(&mut roster, &units, &skills)?;
    info!(
        players = player_party.member_count(),
        enemies = enemy_party.member_count(),
        "battle assembled"
    );

    for round in 1..=args.rounds {
        println!("── round {round} ──");
        let mut resolver =
            CombatResolver::new(&mut roster, &player_party, &enemy_party).with_config(config.clone());
        resolver.generate_all_combat_events();

        for entry in resolver.event_log() {
            match strings.render(entry) {
                Some(line) => println!("{line}"),
                None => warn!(
                    skill = %entry.skill.name,
                    format = %entry.skill.log_format,
                    "missing log format"
                ),
            }
        }

        print_life_summary("players", &player_party, &roster);
        print_life_summary("enemies", &enemy_party, &roster);

        if args.heal_between && round < args.rounds {
            for party in [&player_party, &enemy_party] {
                for &member in party.members() {
                    if let Some(unit) = roster.get_mut(member) {
                        unit.full_heal();
                    }
                }
            }
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<CombatConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading combat config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing combat config {}", path.display()))
}

/// Village Guard on defense, Village Swordsman on attack, and the Medic
/// channeling bolts from support.
fn build_player_party(
    roster: &mut Roster,
    units: &UnitCompendium,
    skills: &SkillBook,
) -> Result<Party> {
    let mut party = Party::new(PartyId(0));

    let defender = spawn(roster, units, skills, "test_defender", None)?;
    party.add_member(roster, defender)?;
    party.set_assignment(roster, defender, PartyPosition::Defense)?;

    let attacker = spawn(roster, units, skills, "test_attacker", None)?;
    party.add_member(roster, attacker)?;
    party.set_assignment(roster, attacker, PartyPosition::Attack)?;

    let supporter = spawn(roster, units, skills, "test_supporter", None)?;
    party.add_member(roster, supporter)?;
    let bolt = roster[supporter]
        .find_skill("mana_bolt_1")
        .context("supporter lacks mana_bolt_1")?;
    party.set_assignment_with(roster, supporter, PartyPosition::Support, bolt)?;

    Ok(party)
}

/// Three goblins; the support goblin stands ready to counter enemy casts.
fn build_enemy_party(
    roster: &mut Roster,
    units: &UnitCompendium,
    skills: &SkillBook,
) -> Result<Party> {
    let mut party = Party::new(PartyId(1));

    let defender = spawn(roster, units, skills, "goblin_1", Some("Goblin Defense"))?;
    party.add_member(roster, defender)?;
    let shield = roster[defender]
        .find_skill("shield_up_1")
        .context("goblin lacks shield_up_1")?;
    party.set_assignment_with(roster, defender, PartyPosition::Defense, shield)?;

    let attacker = spawn(roster, units, skills, "goblin_1", Some("Goblin Attack"))?;
    party.add_member(roster, attacker)?;
    party.set_assignment(roster, attacker, PartyPosition::Attack)?;

    let supporter = spawn(roster, units, skills, "goblin_1", Some("Goblin Support"))?;
    party.add_member(roster, supporter)?;
    let counter = roster[supporter]
        .find_skill("counterspell_1")
        .context("goblin lacks counterspell_1")?;
    party.set_assignment_with(roster, supporter, PartyPosition::Support, counter)?;

    Ok(party)
}

fn spawn(
    roster: &mut Roster,
    units: &UnitCompendium,
    skills: &SkillBook,
    template: &str,
    rename: Option<&str>,
) -> Result<UnitId> {
    let mut unit = units
        .create(template, skills)
        .with_context(|| format!("unknown unit template {template}"))?;
    if let Some(name) = rename {
        unit.name = name.to_string();
    }
    Ok(roster.spawn(unit))
}

fn print_life_summary(label: &str, party: &Party, roster: &Roster) {
    for position in PartyPosition::ALL {
        if let Some(member) = party.assigned_unit(position) {
            let unit = &roster[member];
            println!(
                "  [{label}] {position}: {} {}/{}",
                unit.name, unit.status.life, unit.status.max_life
            );
        }
    }
}
