//! The mutation surface skill effects and triggers operate through.

use crate::party::Party;
use crate::resolve::PartySide;
use crate::unit::{Roster, Unit, UnitId};

/// Mediates every battle mutation an effect may make.
///
/// Effects and triggers never touch the resolver; they see the battle only
/// through this type. That keeps them decoupled from resolution internals
/// and leaves one seam where global reaction hooks (such as on-death
/// triggers) can later be wired in.
pub struct CombatDispatcher<'a> {
    roster: &'a mut Roster,
    offense: &'a Party,
    defense: &'a Party,
}

impl<'a> CombatDispatcher<'a> {
    pub fn new(roster: &'a mut Roster, offense: &'a Party, defense: &'a Party) -> Self {
        Self {
            roster,
            offense,
            defense,
        }
    }

    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.roster[id]
    }

    pub fn unit_mut(&mut self, id: UnitId) -> &mut Unit {
        &mut self.roster[id]
    }

    /// Which side of the battle a unit fights for, if either.
    pub fn unit_party(&self, unit: UnitId) -> Option<PartySide> {
        let party = self.roster.get(unit)?.party()?;
        if party == self.offense.id() {
            Some(PartySide::Offense)
        } else if party == self.defense.id() {
            Some(PartySide::Defense)
        } else {
            None
        }
    }

    /// Deals damage to the target, clamping life at zero.
    pub fn deal_damage(&mut self, _source: UnitId, target: UnitId, amount: u32) {
        if amount == 0 {
            return;
        }
        let unit = &mut self.roster[target];
        unit.status.life = unit.status.life.saturating_sub(amount);
        if unit.status.life == 0 {
            self.notify_unit_death(target);
        }
    }

    /// Recovers life on the target, clamping at its maximum.
    ///
    /// Dead targets are skipped unless `affect_dead`.
    pub fn recover_life(&mut self, _source: UnitId, target: UnitId, amount: u32, affect_dead: bool) {
        if amount == 0 {
            return;
        }
        let unit = &mut self.roster[target];
        if !affect_dead && unit.status.life == 0 {
            return;
        }
        unit.status.life = (unit.status.life + amount).min(unit.status.max_life);
    }

    /// Hook invoked when damage leaves a unit at zero life.
    ///
    /// Reserved for on-death reactions; nothing listens yet.
    fn notify_unit_death(&mut self, _unit: UnitId) {}
}
