//! Repository seams for template registries.
//!
//! Template storage is owned by outer crates (content packs, loaders, test
//! fixtures). The core only consumes these interfaces, so every construction
//! site can be handed an isolated registry instead of reaching into a
//! process-wide table.

use std::sync::Arc;

use crate::skill::SkillDefinition;
use crate::unit::UnitDefinition;

/// Keyed storage of skill templates.
pub trait SkillRepository {
    /// Registers a template under its internal name.
    ///
    /// Returns `false` when the name is already taken; the existing template
    /// is kept.
    fn register(&mut self, definition: SkillDefinition) -> bool;

    /// Looks up a template by internal name.
    fn lookup(&self, name: &str) -> Option<Arc<SkillDefinition>>;
}

/// Keyed storage of unit templates.
pub trait UnitRepository {
    /// Registers a template under its definition name.
    ///
    /// Returns `false` when the name is already taken; the existing template
    /// is kept.
    fn register(&mut self, definition: UnitDefinition) -> bool;

    /// Looks up a template by definition name.
    fn lookup(&self, name: &str) -> Option<&UnitDefinition>;
}
