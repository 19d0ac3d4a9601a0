//! Party mutation errors.
//!
//! These are caller-contract violations, not faults: callers are expected to
//! check preconditions (clear a position before reassigning, leave a party
//! before joining another). In-round failures are never errors at all; they
//! are expressed as interruption on the execution context.

/// Errors returned by [`crate::party::Party`] mutation operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PartyError {
    /// The unit id does not resolve to a unit in the roster.
    #[error("Unknown unit")]
    UnknownUnit,

    /// The unit already belongs to a party.
    #[error("Unit already belongs to a party")]
    AlreadyInParty,

    /// The party already has the maximum number of members.
    #[error("Party is full")]
    PartyFull,

    /// The unit is not a member of this party.
    #[error("Unit is not a member of this party")]
    NotAMember,

    /// The position already holds an assignment.
    #[error("Position is already assigned")]
    PositionOccupied,

    /// The unit does not own the given skill.
    #[error("Unit does not own that skill")]
    SkillNotOwned,

    /// The skill cannot be used in the given position.
    #[error("Skill cannot be used in that position")]
    SkillNotUsable,
}
