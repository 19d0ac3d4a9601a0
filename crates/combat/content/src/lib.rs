//! Built-in combat content and log-line formatting.
//!
//! `combat-content` owns the concrete template registries the core only
//! knows as repository traits: a [`SkillBook`] of skill templates, a
//! [`UnitCompendium`] of unit templates, and the [`StringTable`] that turns
//! log entries into display text. The `builtin()` constructors carry the
//! prototype content set; games layer their own data on top through the same
//! `register` calls.
pub mod skills;
pub mod strings;
pub mod units;

pub use skills::SkillBook;
pub use strings::{StringTable, format_substitute};
pub use units::UnitCompendium;
