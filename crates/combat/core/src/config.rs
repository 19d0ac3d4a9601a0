/// Combat rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    /// Maximum depth of the reaction stack. Once this many reactive
    /// resolutions are already on the call stack, further trigger scans are
    /// skipped. Finite usage counters remain the primary termination
    /// guarantee; this bound only caps pathological trigger loops.
    pub max_reaction_depth: u32,
}

impl CombatConfig {
    // ===== compile-time capacities used as type parameters =====
    /// Maximum number of members in one party.
    pub const MAX_PARTY_SIZE: usize = 3;
    /// Number of assignable positions in one party.
    pub const MAX_POSITIONS: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_REACTION_DEPTH: u32 = 32;

    pub fn new() -> Self {
        Self {
            max_reaction_depth: Self::DEFAULT_MAX_REACTION_DEPTH,
        }
    }

    pub fn with_max_reaction_depth(max_reaction_depth: u32) -> Self {
        Self { max_reaction_depth }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
