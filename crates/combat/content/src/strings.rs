//! String table and log-line substitution.
//!
//! Log entries carry key/value fields; display text comes from templates in
//! a string table, with `{key}` tokens substituted from the entry.

use std::collections::HashMap;

use combat_core::{CombatLogEntry, LogValues};

/// Substitutes `{key}` tokens in a template from the given values.
///
/// Tokens without a matching value are left in place, braces included, as
/// literal text.
pub fn format_substitute(format: &str, values: &LogValues) -> String {
    let mut result = String::new();
    // Start of the pending stretch of plain text.
    let mut last_text = 0;
    let mut next_open = format.find('{');

    while let Some(open) = next_open {
        let Some(close) = format[open..].find('}').map(|offset| open + offset) else {
            break;
        };
        result.push_str(&format[last_text..open]);

        let key = &format[open + 1..close];
        match values.get(key) {
            Some(value) => {
                result.push_str(value);
                last_text = close + 1;
            }
            None => {
                // The whole token becomes plain text.
                last_text = open;
            }
        }
        next_open = format[close..].find('{').map(|offset| close + offset);
    }

    result.push_str(&format[last_text..]);
    result
}

/// Key→text table backing log-line rendering.
#[derive(Debug, Default)]
pub struct StringTable {
    entries: HashMap<String, String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table preloaded with the built-in log line templates.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.add(
            "generic_attack_log",
            "{user} hits {target} with {skillname} for {damage} damage!",
        );
        table.add(
            "generic_heal_log",
            "{user} heals {target} for {healed} with {skillname}.",
        );
        table.add(
            "generic_shield_log",
            "{user} shields {target} with {skillname} ({shielded}).",
        );
        table
    }

    /// Adds or replaces an entry.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Renders a log entry through its skill's template, when the table
    /// knows it.
    pub fn render(&self, entry: &CombatLogEntry) -> Option<String> {
        let format = self.get(&entry.skill.log_format)?;
        Some(format_substitute(format, &entry.values))
    }
}
