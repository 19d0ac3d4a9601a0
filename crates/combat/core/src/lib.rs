//! Deterministic party-vs-party combat resolution.
//!
//! `combat-core` defines the canonical combat rules: two parties of up to
//! three units assign skills to positions, and [`resolve::CombatResolver`]
//! turns one round into an ordered log of combat events. All in-round state
//! mutation flows through the resolver and its
//! [`resolve::CombatDispatcher`]; outer crates supply unit/skill templates
//! (via the [`library`] repository traits) and consume the event log.
pub mod config;
pub mod error;
pub mod library;
pub mod party;
pub mod resolve;
pub mod skill;
pub mod unit;

pub use config::CombatConfig;
pub use error::PartyError;
pub use library::{SkillRepository, UnitRepository};
pub use party::{Assignment, Party, PartyId, PartyPosition, PositionMask};
pub use resolve::{
    CombatDispatcher, CombatEvent, CombatEventKind, CombatLogEntry, CombatResolver, LogValues,
    PartySide, SKILL_USAGE_ORDER, SkillExecution,
};
pub use skill::{
    AttackEffect, CombatPhase, DamageType, EffectKind, InterruptCastingTrigger,
    LowestHealthTargeting, PositionTargeting, RecoverEffect, SKILL_TARGET_ORDER, Scaling,
    ShieldEffect, ShieldType, Skill, SkillDefinition, SkillSlot, SkillTags,
    StandardSingleTargeting, TargetingKind, TriggerKind,
};
pub use unit::{CombatStatus, Roster, Unit, UnitDefinition, UnitId, UnitStatus};
