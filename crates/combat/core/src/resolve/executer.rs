//! Per-skill execution context.

use crate::party::PartyPosition;
use crate::resolve::{CombatEventKind, PartySide};
use crate::skill::SkillSlot;
use crate::unit::UnitId;

/// Mutable context for one skill resolution attempt.
///
/// Owned exclusively by a single resolution call and never shared: a nested
/// reaction gets its own context. Interruption is terminal for the attempt;
/// no partial application follows it.
#[derive(Debug)]
pub struct SkillExecution {
    pub side: PartySide,
    pub position: PartyPosition,
    /// Unit assigned at the slot, when the slot is filled.
    pub user: Option<UnitId>,
    /// Skill assigned at the slot, when the slot holds one.
    pub skill: Option<SkillSlot>,
    /// Targets computed at declaration.
    pub targets: Vec<UnitId>,
    stage: CombatEventKind,
    interrupted: bool,
    complete: bool,
}

impl SkillExecution {
    pub fn new(
        side: PartySide,
        position: PartyPosition,
        user: Option<UnitId>,
        skill: Option<SkillSlot>,
    ) -> Self {
        Self {
            side,
            position,
            user,
            skill,
            targets: Vec::new(),
            stage: CombatEventKind::Declare,
            interrupted: false,
            complete: false,
        }
    }

    pub fn stage(&self) -> CombatEventKind {
        self.stage
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_stopped(&self) -> bool {
        self.complete || self.interrupted
    }

    /// Terminally fails this resolution attempt.
    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }

    pub fn advance_to_target(&mut self) {
        debug_assert_eq!(self.stage, CombatEventKind::Declare);
        self.stage = CombatEventKind::Target;
    }

    pub fn advance_to_apply(&mut self) {
        debug_assert_eq!(self.stage, CombatEventKind::Target);
        self.stage = CombatEventKind::Apply;
    }

    pub fn finish(&mut self) {
        debug_assert_eq!(self.stage, CombatEventKind::Apply);
        debug_assert!(!self.complete);
        self.complete = true;
    }
}
