//! Aggregated mechanical effects of the active condition set.

use std::collections::BTreeMap;

use crate::catalog::{Ability, AbilityModifierSet, ConditionEffects, EffectPatch};
use crate::config::EngineConfig;

/// Accumulator for everything the active conditions do to the character.
///
/// Ability modifiers sum per ability with the `all` modifier folded in at
/// read time; skill/save penalties accumulate per key with the `"all"` key
/// kept separate and applied to every lookup; the movement penalty sums
/// additively but can never exceed [`EngineConfig::MOVEMENT_PENALTY_CAP`];
/// boolean flags OR; disadvantage lists concatenate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectBundle {
    ability_modifiers: AbilityModifierSet,
    skill_penalties: BTreeMap<String, i32>,
    all_skills_penalty: i32,
    save_penalties: BTreeMap<String, i32>,
    all_saves_penalty: i32,
    attack_penalty: i32,
    armor_ac_penalty: i32,
    movement_penalty: f32,
    disadvantage_on: Vec<String>,
    cold_vulnerability: bool,
    fire_resistance: bool,
    unconscious_risk: bool,
}

impl EffectBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one condition's effects into the accumulator.
    pub fn accumulate(&mut self, effects: &ConditionEffects) {
        self.ability_modifiers.accumulate(&effects.ability_modifiers);

        for (skill, penalty) in &effects.skill_penalties {
            if skill == "all" {
                self.all_skills_penalty += penalty;
            } else {
                *self.skill_penalties.entry(skill.clone()).or_insert(0) += penalty;
            }
        }
        for (save, penalty) in &effects.save_penalties {
            if save == "all" {
                self.all_saves_penalty += penalty;
            } else {
                *self.save_penalties.entry(save.clone()).or_insert(0) += penalty;
            }
        }

        self.attack_penalty += effects.attack_penalty;
        self.armor_ac_penalty += effects.armor_ac_penalty;
        self.add_movement_penalty(effects.movement_penalty);
        self.disadvantage_on
            .extend(effects.disadvantage_on.iter().cloned());
        self.cold_vulnerability |= effects.cold_vulnerability;
        self.fire_resistance |= effects.fire_resistance;
        self.unconscious_risk |= effects.unconscious_risk;
    }

    /// Layer an interaction patch on top of the aggregated effects.
    pub fn apply_patch(&mut self, patch: &EffectPatch) {
        self.ability_modifiers.accumulate(&patch.ability_modifiers());
        self.add_movement_penalty(patch.movement_penalty);
        self.unconscious_risk |= patch.unconscious_risk;
    }

    fn add_movement_penalty(&mut self, penalty: f32) {
        self.movement_penalty =
            (self.movement_penalty + penalty).clamp(0.0, EngineConfig::MOVEMENT_PENALTY_CAP);
    }

    // ===== read API =====

    /// Effective modifier for one ability, `all` included.
    pub fn ability_modifier(&self, ability: Ability) -> i32 {
        self.ability_modifiers.modifier(ability)
    }

    /// Penalty for a named skill; the `"all"` accumulator applies to every
    /// skill, known key or not.
    pub fn skill_penalty(&self, skill: &str) -> i32 {
        self.skill_penalties.get(skill).copied().unwrap_or(0) + self.all_skills_penalty
    }

    /// Penalty for a named saving throw, `"all"` applied likewise.
    pub fn save_penalty(&self, save: &str) -> i32 {
        self.save_penalties.get(save).copied().unwrap_or(0) + self.all_saves_penalty
    }

    pub fn attack_penalty(&self) -> i32 {
        self.attack_penalty
    }

    pub fn armor_ac_penalty(&self) -> i32 {
        self.armor_ac_penalty
    }

    /// Aggregated movement penalty, always within [0, 0.95].
    pub fn movement_penalty(&self) -> f32 {
        self.movement_penalty
    }

    pub fn disadvantage_on(&self) -> &[String] {
        &self.disadvantage_on
    }

    pub fn has_disadvantage_on(&self, roll: &str) -> bool {
        self.disadvantage_on.iter().any(|entry| entry == roll)
    }

    pub fn cold_vulnerability(&self) -> bool {
        self.cold_vulnerability
    }

    pub fn fire_resistance(&self) -> bool {
        self.fire_resistance
    }

    pub fn unconscious_risk(&self) -> bool {
        self.unconscious_risk
    }
}
