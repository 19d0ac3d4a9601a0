//! Units, their stats, and the roster arena that owns them.

use std::ops::{Index, IndexMut};

use crate::library::SkillRepository;
use crate::party::PartyId;
use crate::skill::{Skill, SkillSlot};

/// Identifier of a unit inside a [`Roster`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub u32);

/// Persistent stats of a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitStatus {
    pub character_level: u32,
    pub item_level: u32,
    pub life: u32,
    pub max_life: u32,
}

/// In-combat damage mitigation, meaningful only while a round resolves.
///
/// Armor reduces physical damage without being consumed; absorb reduces any
/// damage and is consumed by the amount it absorbs. The resolver zeroes both
/// at the start of every round, so neither value ever persists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatStatus {
    pub armor: u32,
    pub absorb: u32,
}

/// Template a unit is spawned from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitDefinition {
    /// Unique template name, the registry key.
    pub name: String,
    /// Name shown to players; spawned units start with it.
    pub displayed_name: String,
    pub base_life: u32,
    pub life_per_level: u32,
    /// Skills learned on spawn. Player units typically start empty and learn
    /// through progression instead.
    pub innate_skills: Vec<String>,
}

impl UnitDefinition {
    pub fn new(name: impl Into<String>, displayed_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            displayed_name: displayed_name.into(),
            base_life: 1,
            life_per_level: 0,
            innate_skills: Vec::new(),
        }
    }

    pub fn with_life(mut self, base_life: u32, life_per_level: u32) -> Self {
        self.base_life = base_life;
        self.life_per_level = life_per_level;
        self
    }

    pub fn with_innate_skill(mut self, skill_name: impl Into<String>) -> Self {
        self.innate_skills.push(skill_name.into());
        self
    }

    /// Maximum life at the given character level.
    pub fn max_life_at(&self, character_level: u32) -> u32 {
        self.base_life + character_level * self.life_per_level
    }
}

/// A combatant: identity, stats, owned skill instances, and the party it
/// currently belongs to.
#[derive(Clone, Debug)]
pub struct Unit {
    pub name: String,
    pub status: UnitStatus,
    pub combat: CombatStatus,
    skills: Vec<Skill>,
    pub(crate) party: Option<PartyId>,
}

impl Unit {
    /// Creates a bare unit at level 1 with a single point of life.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: UnitStatus {
                character_level: 1,
                item_level: 0,
                life: 1,
                max_life: 1,
            },
            combat: CombatStatus::default(),
            skills: Vec::new(),
            party: None,
        }
    }

    /// Spawns a unit from a template at level 1, learning its innate skills
    /// from the repository. Unknown skill names are skipped.
    pub fn from_definition(definition: &UnitDefinition, skills: &dyn SkillRepository) -> Self {
        Self::from_definition_at_level(definition, 1, 0, skills)
    }

    /// Spawns a unit from a template at the given levels, at full life.
    pub fn from_definition_at_level(
        definition: &UnitDefinition,
        character_level: u32,
        item_level: u32,
        skills: &dyn SkillRepository,
    ) -> Self {
        let max_life = definition.max_life_at(character_level);
        let mut unit = Self {
            name: definition.displayed_name.clone(),
            status: UnitStatus {
                character_level,
                item_level,
                life: max_life,
                max_life,
            },
            combat: CombatStatus::default(),
            skills: Vec::new(),
            party: None,
        };
        for skill_name in &definition.innate_skills {
            if let Some(template) = skills.lookup(skill_name) {
                unit.learn(Skill::instantiate(template));
            }
        }
        unit
    }

    pub fn with_levels(mut self, character_level: u32, item_level: u32) -> Self {
        self.status.character_level = character_level;
        self.status.item_level = item_level;
        self
    }

    /// Sets maximum life and fills life to it.
    pub fn with_max_life(mut self, max_life: u32) -> Self {
        self.status.max_life = max_life;
        self.status.life = max_life;
        self
    }

    pub fn is_dead(&self) -> bool {
        self.status.life == 0
    }

    pub fn party(&self) -> Option<PartyId> {
        self.party
    }

    /// Adds a skill instance unless one with the same internal name is
    /// already known. Returns whether the skill was learned.
    pub fn learn(&mut self, skill: Skill) -> bool {
        if self.has_skill(&skill.definition().name) {
            return false;
        }
        self.skills.push(skill);
        true
    }

    pub fn has_skill(&self, internal_name: &str) -> bool {
        self.find_skill(internal_name).is_some()
    }

    /// Finds an owned skill by its template's internal name.
    pub fn find_skill(&self, internal_name: &str) -> Option<SkillSlot> {
        self.skills
            .iter()
            .position(|skill| skill.definition().name == internal_name)
            .map(SkillSlot)
    }

    pub fn skill(&self, slot: SkillSlot) -> Option<&Skill> {
        self.skills.get(slot.0)
    }

    pub fn skill_mut(&mut self, slot: SkillSlot) -> Option<&mut Skill> {
        self.skills.get_mut(slot.0)
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Restores full life and every skill's usage count.
    pub fn full_heal(&mut self) {
        self.status.life = self.status.max_life;
        for skill in &mut self.skills {
            skill.restore();
        }
    }
}

/// Arena that owns every unit participating in an encounter.
///
/// Units are referenced everywhere else by [`UnitId`]; ids are never reused
/// within one roster.
#[derive(Debug, Default)]
pub struct Roster {
    units: Vec<Unit>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, unit: Unit) -> UnitId {
        let id = UnitId(self.units.len() as u32);
        self.units.push(unit);
        id
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UnitId, &Unit)> {
        self.units
            .iter()
            .enumerate()
            .map(|(index, unit)| (UnitId(index as u32), unit))
    }
}

impl Index<UnitId> for Roster {
    type Output = Unit;

    fn index(&self, id: UnitId) -> &Unit {
        &self.units[id.0 as usize]
    }
}

impl IndexMut<UnitId> for Roster {
    fn index_mut(&mut self, id: UnitId) -> &mut Unit {
        &mut self.units[id.0 as usize]
    }
}
