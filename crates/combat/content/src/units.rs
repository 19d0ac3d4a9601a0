//! Unit template registry and the built-in unit set.

use std::collections::HashMap;

use combat_core::{SkillRepository, Unit, UnitDefinition, UnitRepository};
use tracing::debug;

/// Keyed storage of unit templates.
#[derive(Debug, Default)]
pub struct UnitCompendium {
    definitions: HashMap<String, UnitDefinition>,
}

impl UnitCompendium {
    pub fn new() -> Self {
        Self::default()
    }

    /// A compendium preloaded with the prototype unit set.
    pub fn builtin() -> Self {
        let mut compendium = Self::new();
        for definition in builtin_definitions() {
            compendium.register(definition);
        }
        compendium
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Spawns a level-1 unit from a template, learning its innate skills
    /// from the given book.
    pub fn create(&self, name: &str, skills: &dyn SkillRepository) -> Option<Unit> {
        self.lookup(name)
            .map(|definition| Unit::from_definition(definition, skills))
    }
}

impl UnitRepository for UnitCompendium {
    fn register(&mut self, definition: UnitDefinition) -> bool {
        if self.definitions.contains_key(&definition.name) {
            return false;
        }
        debug!(name = %definition.name, "registered unit template");
        self.definitions
            .insert(definition.name.clone(), definition);
        true
    }

    fn lookup(&self, name: &str) -> Option<&UnitDefinition> {
        self.definitions.get(name)
    }
}

fn builtin_definitions() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::new("test_attacker", "Village Swordsman")
            .with_life(20, 2)
            .with_innate_skill("slash_1"),
        UnitDefinition::new("test_defender", "Village Guard")
            .with_life(20, 2)
            .with_innate_skill("shield_up_1"),
        UnitDefinition::new("test_supporter", "Village Medic")
            .with_life(20, 2)
            .with_innate_skill("first_aid_1")
            .with_innate_skill("mana_bolt_1"),
        UnitDefinition::new("goblin_1", "Goblin")
            .with_life(5, 5)
            .with_innate_skill("slash_1")
            .with_innate_skill("shield_up_1")
            .with_innate_skill("first_aid_1")
            .with_innate_skill("counterspell_1"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::SkillBook;

    #[test]
    fn create_spawns_with_innate_skills_at_full_life() {
        let book = SkillBook::builtin();
        let compendium = UnitCompendium::builtin();

        let swordsman = compendium.create("test_attacker", &book).unwrap();
        assert_eq!(swordsman.name, "Village Swordsman");
        assert_eq!(swordsman.status.max_life, 22);
        assert_eq!(swordsman.status.life, 22);
        assert!(swordsman.has_skill("slash_1"));

        let goblin = compendium.create("goblin_1", &book).unwrap();
        assert_eq!(goblin.status.max_life, 10);
        assert_eq!(goblin.skills().len(), 4);

        assert!(compendium.create("dragon_9", &book).is_none());
    }

    #[test]
    fn register_keeps_the_first_definition() {
        let mut compendium = UnitCompendium::builtin();
        assert!(!compendium.register(UnitDefinition::new("goblin_1", "Impostor")));
        assert_eq!(
            compendium.lookup("goblin_1").unwrap().displayed_name,
            "Goblin"
        );
    }
}
