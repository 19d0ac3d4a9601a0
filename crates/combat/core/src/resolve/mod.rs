//! The combat resolver: one round in, an ordered event log out.
//!
//! [`CombatResolver`] is the authoritative reducer for a battle. It walks
//! the scripted phases in order, visits positions by priority within each
//! phase, and runs every eligible skill through the declare → target → apply
//! pipeline. Reactive skills are resolved recursively the moment their
//! trigger fires, before the triggering skill continues. Resolution is a
//! pure function of the two parties' state at call time; it runs
//! synchronously with no randomness, and termination rests on finite skill
//! usage counters.

mod dispatcher;
mod event;
mod executer;

pub use dispatcher::CombatDispatcher;
pub use event::{CombatEvent, CombatEventKind, CombatLogEntry, LogValues};
pub use executer::SkillExecution;

use std::sync::Arc;

use crate::config::CombatConfig;
use crate::party::{Party, PartyPosition};
use crate::skill::{CombatPhase, SkillDefinition, SkillSlot};
use crate::unit::{CombatStatus, Roster, UnitId};

/// The two sides of a battle. Offense resolves first on every tie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum PartySide {
    Offense,
    Defense,
}

impl PartySide {
    pub const BOTH: [PartySide; 2] = [Self::Offense, Self::Defense];

    pub fn opponent(self) -> PartySide {
        match self {
            Self::Offense => Self::Defense,
            Self::Defense => Self::Offense,
        }
    }
}

/// Position priority when several skills act in the same phase.
pub const SKILL_USAGE_ORDER: [PartyPosition; 3] = [
    PartyPosition::Support,
    PartyPosition::Attack,
    PartyPosition::Defense,
];

/// Resolves one combat round between two parties into an event log.
///
/// The resolver borrows the battle exclusively for its lifetime: usage
/// counters, life, and combat status are mutated in place. The log is
/// cleared and rebuilt by every [`generate_all_combat_events`] call, so a
/// repeat call on unchanged state produces an identical log.
///
/// [`generate_all_combat_events`]: CombatResolver::generate_all_combat_events
pub struct CombatResolver<'a> {
    config: CombatConfig,
    roster: &'a mut Roster,
    offense: &'a Party,
    defense: &'a Party,
    log: Vec<CombatLogEntry>,
    reaction_depth: u32,
}

impl<'a> CombatResolver<'a> {
    pub fn new(roster: &'a mut Roster, offense: &'a Party, defense: &'a Party) -> Self {
        Self {
            config: CombatConfig::default(),
            roster,
            offense,
            defense,
            log: Vec::new(),
            reaction_depth: 0,
        }
    }

    pub fn with_config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn offense(&self) -> &Party {
        self.offense
    }

    pub fn defense(&self) -> &Party {
        self.defense
    }

    pub fn party(&self, side: PartySide) -> &'a Party {
        match side {
            PartySide::Offense => self.offense,
            PartySide::Defense => self.defense,
        }
    }

    /// The log of the last resolved round, one entry per (skill, target)
    /// effect application, in application order.
    pub fn event_log(&self) -> &[CombatLogEntry] {
        &self.log
    }

    /// Resolves one full round.
    ///
    /// Clears the log, zeroes both sides' in-combat status, then walks each
    /// scripted phase in position-priority order, offense before defense. A
    /// skill whose phase does not match the current phase is skipped and
    /// never fires retroactively.
    pub fn generate_all_combat_events(&mut self) {
        self.log.clear();
        self.reset_combat_status();

        for phase in CombatPhase::scripted() {
            for position in SKILL_USAGE_ORDER {
                for side in PartySide::BOTH {
                    let assigned = self
                        .assigned_definition(side, position)
                        .is_some_and(|(_, _, definition)| definition.performed_phase == phase);
                    if assigned {
                        self.resolve_skill(side, position);
                    }
                }
            }
        }
    }

    /// Zeroes armor and absorb on every member of both parties.
    fn reset_combat_status(&mut self) {
        for party in [self.offense, self.defense] {
            for &member in party.members() {
                if let Some(unit) = self.roster.get_mut(member) {
                    unit.combat = CombatStatus::default();
                }
            }
        }
    }

    /// Runs the skill assigned at a slot through declare and, when still
    /// valid, apply. Reactions re-enter here recursively.
    fn resolve_skill(&mut self, side: PartySide, position: PartyPosition) {
        let assignment = self.party(side).assignment(position).copied();
        let (user, skill) = match assignment {
            Some(assignment) => (Some(assignment.member), assignment.skill),
            None => (None, None),
        };

        let mut execution = SkillExecution::new(side, position, user, skill);
        self.resolve_declare(&mut execution);
        if !execution.is_interrupted() {
            self.resolve_apply(&mut execution);
        }
    }

    /// Declare stage: usability checks, target resolution, usage commit,
    /// then the declare and per-target events.
    fn resolve_declare(&mut self, execution: &mut SkillExecution) {
        // A missing or dead user cannot act.
        if execution
            .user
            .is_none_or(|user| self.roster[user].is_dead())
        {
            execution.interrupt();
        }
        // Neither can a missing or spent skill.
        let ready = execution
            .user
            .zip(execution.skill)
            .and_then(|(user, slot)| self.roster[user].skill(slot))
            .is_some_and(|skill| !skill.is_spent());
        if !ready {
            execution.interrupt();
        }
        if execution.is_interrupted() {
            return;
        }
        let Some((user, slot)) = execution.user.zip(execution.skill) else {
            return;
        };
        let Some(definition) = self.roster[user]
            .skill(slot)
            .map(|skill| skill.definition().clone())
        else {
            return;
        };

        // Targets are resolved as seen from the user's own side.
        let (ally, opponent) = self.sides_for(execution.side);
        execution.targets = definition
            .targeting
            .resolve(self.roster, user, ally, opponent);
        if execution.targets.is_empty() {
            execution.interrupt();
            return;
        }

        // The declaration is committed: the use is spent here, before any
        // reaction gets the chance to cancel the outcome.
        if let Some(skill) = self.roster[user].skill_mut(slot) {
            skill.consume();
        }

        let declare = self.make_event(CombatEventKind::Declare, execution.side, &definition, user, user);
        self.handle_combat_event(&declare);

        if execution.is_interrupted() {
            return;
        }
        execution.advance_to_target();
        let targets = execution.targets.clone();
        for target in targets {
            let event =
                self.make_event(CombatEventKind::Target, execution.side, &definition, user, target);
            self.handle_combat_event(&event);
        }
    }

    /// Apply stage: one effect application and log entry per target, then
    /// the apply event.
    fn resolve_apply(&mut self, execution: &mut SkillExecution) {
        let Some((user, slot)) = execution.user.zip(execution.skill) else {
            return;
        };
        let Some(definition) = self.roster[user]
            .skill(slot)
            .map(|skill| skill.definition().clone())
        else {
            return;
        };
        // A skill without an effect applies nothing and announces nothing.
        let Some(effect) = definition.effect else {
            return;
        };

        execution.advance_to_apply();
        let targets = execution.targets.clone();
        for target in targets {
            let mut entry = CombatLogEntry::new(definition.clone());
            entry.values.insert("user", &self.roster[user].name);
            entry.values.insert("target", &self.roster[target].name);
            entry.values.insert("skillname", &definition.displayed_name);

            let mut dispatcher = CombatDispatcher::new(self.roster, self.offense, self.defense);
            effect.apply(&mut dispatcher, user, target, &mut entry.values);

            self.log.push(entry);
        }

        let apply = self.make_event(CombatEventKind::Apply, execution.side, &definition, user, user);
        self.handle_combat_event(&apply);
        execution.finish();
    }

    /// Reaction-trigger pass: offers the event to every assigned
    /// reaction-phase skill on both sides, in position-priority order. A
    /// firing trigger resolves its skill immediately and in full, so a
    /// reaction can itself be interrupted or trigger further reactions.
    fn handle_combat_event(&mut self, event: &CombatEvent) {
        if self.reaction_depth >= self.config.max_reaction_depth {
            return;
        }

        for position in SKILL_USAGE_ORDER {
            for side in PartySide::BOTH {
                let Some((owner, _, definition)) = self.assigned_definition(side, position) else {
                    continue;
                };
                if !definition.is_reaction() {
                    continue;
                }
                let Some(triggering) = definition.triggering else {
                    continue;
                };
                let fires = {
                    let dispatcher =
                        CombatDispatcher::new(self.roster, self.offense, self.defense);
                    triggering.can_react(&dispatcher, owner, event)
                };
                if fires {
                    self.reaction_depth += 1;
                    self.resolve_skill(side, position);
                    self.reaction_depth -= 1;
                }
            }
        }
    }

    fn assigned_definition(
        &self,
        side: PartySide,
        position: PartyPosition,
    ) -> Option<(UnitId, SkillSlot, Arc<SkillDefinition>)> {
        let (unit, slot) = self.party(side).assigned_skill(position)?;
        let definition = self.roster.get(unit)?.skill(slot)?.definition().clone();
        Some((unit, slot, definition))
    }

    fn sides_for(&self, side: PartySide) -> (&'a Party, &'a Party) {
        match side {
            PartySide::Offense => (self.offense, self.defense),
            PartySide::Defense => (self.defense, self.offense),
        }
    }

    fn make_event(
        &self,
        kind: CombatEventKind,
        side: PartySide,
        definition: &Arc<SkillDefinition>,
        user: UnitId,
        target: UnitId,
    ) -> CombatEvent {
        CombatEvent {
            kind,
            party: side,
            phase: definition.performed_phase,
            skill: definition.clone(),
            user,
            target,
        }
    }
}
