//! Parties: members and position assignments.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::CombatConfig;
use crate::error::PartyError;
use crate::skill::SkillSlot;
use crate::unit::{Roster, UnitId};

/// Identifier distinguishing parties that share a roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PartyId(pub u32);

/// The three assignable slots of a party.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PartyPosition {
    Defense,
    Attack,
    Support,
}

impl PartyPosition {
    pub const ALL: [PartyPosition; CombatConfig::MAX_POSITIONS] =
        [Self::Defense, Self::Attack, Self::Support];

    pub fn index(self) -> usize {
        match self {
            Self::Defense => 0,
            Self::Attack => 1,
            Self::Support => 2,
        }
    }

    pub fn mask(self) -> PositionMask {
        match self {
            Self::Defense => PositionMask::DEFENSE,
            Self::Attack => PositionMask::ATTACK,
            Self::Support => PositionMask::SUPPORT,
        }
    }
}

bitflags! {
    /// Set of party positions, used by skills to declare where they are
    /// usable.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct PositionMask: u8 {
        const DEFENSE = 1 << 0;
        const ATTACK  = 1 << 1;
        const SUPPORT = 1 << 2;
    }
}

/// One filled position slot: a member and the skill it will use there.
///
/// The skill can be absent when auto-selection found nothing usable; such an
/// assignment never acts but still occupies the position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub member: UnitId,
    pub skill: Option<SkillSlot>,
}

/// Up to three members and their position assignments.
///
/// Membership is mirrored on the unit as a party back-reference, which is
/// what enforces the at-most-one-party invariant at join time. Assignment
/// mutations are synchronous and touch nothing but the assignment table.
#[derive(Clone, Debug)]
pub struct Party {
    id: PartyId,
    members: ArrayVec<UnitId, { CombatConfig::MAX_PARTY_SIZE }>,
    assignments: [Option<Assignment>; CombatConfig::MAX_POSITIONS],
}

impl Party {
    pub fn new(id: PartyId) -> Self {
        Self {
            id,
            members: ArrayVec::new(),
            assignments: [None; CombatConfig::MAX_POSITIONS],
        }
    }

    pub fn id(&self) -> PartyId {
        self.id
    }

    pub fn members(&self) -> &[UnitId] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, roster: &Roster, unit: UnitId) -> bool {
        roster
            .get(unit)
            .is_some_and(|member| member.party() == Some(self.id))
    }

    /// Adds a unit to the party.
    ///
    /// The unit must not belong to any party; callers make it leave its
    /// previous party first.
    pub fn add_member(&mut self, roster: &mut Roster, unit: UnitId) -> Result<(), PartyError> {
        let member = roster.get_mut(unit).ok_or(PartyError::UnknownUnit)?;
        if member.party().is_some() {
            return Err(PartyError::AlreadyInParty);
        }
        if self.members.is_full() {
            return Err(PartyError::PartyFull);
        }
        member.party = Some(self.id);
        self.members.push(unit);
        Ok(())
    }

    /// Removes a member, clearing its assignment.
    pub fn remove_member(&mut self, roster: &mut Roster, unit: UnitId) -> Result<(), PartyError> {
        if !self.is_member(roster, unit) {
            return Err(PartyError::NotAMember);
        }
        self.clear_assignment(unit);
        if let Some(index) = self.members.iter().position(|&member| member == unit) {
            self.members.swap_remove(index);
        }
        if let Some(member) = roster.get_mut(unit) {
            member.party = None;
        }
        Ok(())
    }

    pub fn assignment(&self, position: PartyPosition) -> Option<&Assignment> {
        self.assignments[position.index()].as_ref()
    }

    pub fn assigned_unit(&self, position: PartyPosition) -> Option<UnitId> {
        self.assignment(position).map(|assignment| assignment.member)
    }

    /// The member and skill assigned at a position, when the slot holds a
    /// usable skill.
    pub fn assigned_skill(&self, position: PartyPosition) -> Option<(UnitId, SkillSlot)> {
        let assignment = self.assignment(position)?;
        Some((assignment.member, assignment.skill?))
    }

    pub fn assigned_position(&self, member: UnitId) -> Option<PartyPosition> {
        PartyPosition::ALL.into_iter().find(|&position| {
            self.assignments[position.index()]
                .is_some_and(|assignment| assignment.member == member)
        })
    }

    /// First skill the member owns that is usable in the given position.
    pub fn assignable_skill(
        &self,
        roster: &Roster,
        member: UnitId,
        position: PartyPosition,
    ) -> Option<SkillSlot> {
        let unit = roster.get(member)?;
        unit.skills()
            .iter()
            .position(|skill| skill.can_be_used_in_position(position))
            .map(SkillSlot)
    }

    /// Assigns a member to a position, auto-selecting the first of its
    /// skills usable there.
    ///
    /// The position must be clear; callers clear it first when reassigning.
    pub fn set_assignment(
        &mut self,
        roster: &Roster,
        member: UnitId,
        position: PartyPosition,
    ) -> Result<(), PartyError> {
        if !self.is_member(roster, member) {
            return Err(PartyError::NotAMember);
        }
        if self.assignments[position.index()].is_some() {
            return Err(PartyError::PositionOccupied);
        }
        let skill = self.assignable_skill(roster, member, position);
        self.assignments[position.index()] = Some(Assignment { member, skill });
        Ok(())
    }

    /// Assigns a member to a position with an explicit skill.
    pub fn set_assignment_with(
        &mut self,
        roster: &Roster,
        member: UnitId,
        position: PartyPosition,
        skill: SkillSlot,
    ) -> Result<(), PartyError> {
        if !self.is_member(roster, member) {
            return Err(PartyError::NotAMember);
        }
        let unit = roster.get(member).ok_or(PartyError::UnknownUnit)?;
        let owned = unit.skill(skill).ok_or(PartyError::SkillNotOwned)?;
        if !owned.can_be_used_in_position(position) {
            return Err(PartyError::SkillNotUsable);
        }
        if self.assignments[position.index()].is_some() {
            return Err(PartyError::PositionOccupied);
        }
        self.assignments[position.index()] = Some(Assignment {
            member,
            skill: Some(skill),
        });
        Ok(())
    }

    /// Clears every assignment held by the member.
    pub fn clear_assignment(&mut self, member: UnitId) {
        for slot in &mut self.assignments {
            if slot.is_some_and(|assignment| assignment.member == member) {
                *slot = None;
            }
        }
    }
}
