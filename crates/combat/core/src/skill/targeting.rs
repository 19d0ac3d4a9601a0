//! Targeting policies: who a skill can hit.
//!
//! Targets are drawn from the assignment tables, so only units holding a
//! position can be targeted. Every policy scans positions in
//! [`SKILL_TARGET_ORDER`], which also breaks ties.

use crate::party::{Party, PartyPosition};
use crate::unit::{Roster, UnitId};

/// Position order in which parties are scanned for targets.
pub const SKILL_TARGET_ORDER: [PartyPosition; 3] = [
    PartyPosition::Defense,
    PartyPosition::Attack,
    PartyPosition::Support,
];

/// First living member of the opponent party, in standard scan order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StandardSingleTargeting;

impl StandardSingleTargeting {
    pub fn resolve(&self, roster: &Roster, opponent: &Party) -> Vec<UnitId> {
        for position in SKILL_TARGET_ORDER {
            if let Some(unit) = opponent.assigned_unit(position)
                && !roster[unit].is_dead()
            {
                return vec![unit];
            }
        }
        Vec::new()
    }
}

/// The most wounded living member of the chosen party.
///
/// Ties keep the earliest unit in scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LowestHealthTargeting {
    /// Scan the user's own party instead of the opponent's.
    pub target_ally_party: bool,
    /// Compare life as a fraction of maximum instead of the absolute value.
    pub by_percentage: bool,
}

impl LowestHealthTargeting {
    pub fn resolve(&self, roster: &Roster, ally: &Party, opponent: &Party) -> Vec<UnitId> {
        let party = if self.target_ally_party { ally } else { opponent };

        let mut best: Option<UnitId> = None;
        for position in SKILL_TARGET_ORDER {
            let Some(unit) = party.assigned_unit(position) else {
                continue;
            };
            if roster[unit].is_dead() {
                continue;
            }
            let lower = match best {
                None => true,
                Some(current) => self.is_lower(roster, unit, current),
            };
            if lower {
                best = Some(unit);
            }
        }
        best.into_iter().collect()
    }

    fn is_lower(&self, roster: &Roster, candidate: UnitId, current: UnitId) -> bool {
        let candidate = &roster[candidate].status;
        let current = &roster[current].status;
        if self.by_percentage {
            // Exact fraction comparison: a/b < c/d  <=>  a*d < c*b.
            (candidate.life as u64) * (current.max_life as u64)
                < (current.life as u64) * (candidate.max_life as u64)
        } else {
            candidate.life < current.life
        }
    }
}

/// The unit holding a fixed position in the chosen party.
///
/// The unit at the position is returned even when dead, unlike the scanning
/// policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionTargeting {
    /// Pick from the user's own party instead of the opponent's.
    pub target_ally: bool,
    pub position: PartyPosition,
}

impl PositionTargeting {
    pub fn resolve(&self, ally: &Party, opponent: &Party) -> Vec<UnitId> {
        let party = if self.target_ally { ally } else { opponent };
        party.assigned_unit(self.position).into_iter().collect()
    }
}

/// How a skill selects its targets.
///
/// Each variant delegates to its struct implementation. `ally` and
/// `opponent` are the parties as seen from the user's own side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetingKind {
    StandardSingle(StandardSingleTargeting),
    LowestHealth(LowestHealthTargeting),
    Position(PositionTargeting),
}

impl TargetingKind {
    pub fn resolve(
        &self,
        roster: &Roster,
        _user: UnitId,
        ally: &Party,
        opponent: &Party,
    ) -> Vec<UnitId> {
        match self {
            Self::StandardSingle(targeting) => targeting.resolve(roster, opponent),
            Self::LowestHealth(targeting) => targeting.resolve(roster, ally, opponent),
            Self::Position(targeting) => targeting.resolve(ally, opponent),
        }
    }
}
