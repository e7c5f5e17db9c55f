//! Condition definitions: the data-authored status effects.
//!
//! A condition couples a trigger (restricted expression or special
//! predicate), conflict-resolution metadata (hierarchy / exclusion group /
//! priority), a bundle of mechanical effects, and optional interaction
//! rules that fire only when other conditions are co-active.
//!
//! Raw catalog records ([`RawCondition`]) carry triggers and checks as
//! strings; [`crate::catalog::ConditionCatalog::build`] parses them into
//! the typed forms here and rejects anything malformed with a diagnostic.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::env::LocationOracle;
use crate::expr::{Expr, ParseError, parse_expression};
use crate::state::ConditionId;

// ============================================================================
// Severity
// ============================================================================

/// Condition severity, ordered mildest to worst.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Severity {
    Mild,
    Moderate,
    Critical,
    LifeThreatening,
}

// ============================================================================
// Damage Over Time
// ============================================================================

/// Damage type for condition damage and resistances.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    Physical,
    Fire,
    Cold,
    Poison,
    Starvation,
    Dehydration,
}

/// Repeat interval of a damage-over-time effect.
///
/// Catalog files write intervals as `"10_minutes"` or `"2_hours"`; stored
/// in whole minutes so application counts stay exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Interval {
    minutes: u32,
}

impl Interval {
    pub fn from_minutes(minutes: u32) -> Self {
        debug_assert!(minutes > 0, "interval must be positive");
        Self {
            minutes: minutes.max(1),
        }
    }

    pub fn minutes(self) -> u32 {
        self.minutes
    }

    pub fn hours(self) -> f32 {
        self.minutes as f32 / 60.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed interval {0:?}: expected e.g. \"10_minutes\" or \"2_hours\"")]
pub struct IntervalParseError(String);

impl FromStr for Interval {
    type Err = IntervalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || IntervalParseError(s.to_string());
        let (count, unit) = s.split_once('_').ok_or_else(error)?;
        let count: u32 = count.parse().map_err(|_| error())?;
        if count == 0 {
            return Err(error());
        }
        let minutes = match unit {
            "minute" | "minutes" => count,
            "hour" | "hours" => count * 60,
            _ => return Err(error()),
        };
        Ok(Self { minutes })
    }
}

impl TryFrom<String> for Interval {
    type Error = IntervalParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(value: Interval) -> Self {
        value.to_string()
    }
}

impl core::fmt::Display for Interval {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.minutes % 60 == 0 {
            let hours = self.minutes / 60;
            write!(f, "{hours}_{}", if hours == 1 { "hour" } else { "hours" })
        } else {
            write!(
                f,
                "{}_{}",
                self.minutes,
                if self.minutes == 1 { "minute" } else { "minutes" }
            )
        }
    }
}

/// Periodic vitality damage while the condition stays active.
///
/// Negative amounts heal (used by recovery conditions).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOverTime {
    pub interval: Interval,
    pub amount: i32,
    pub damage_type: DamageType,
}

// ============================================================================
// Effects
// ============================================================================

/// The six ability scores conditions can modify.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

/// Per-ability modifiers plus an `all` modifier applied to every ability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityModifierSet {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub all: i32,
}

impl AbilityModifierSet {
    /// The effective modifier for one ability, `all` folded in.
    pub fn modifier(&self, ability: Ability) -> i32 {
        let per = match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        };
        per + self.all
    }

    /// Field-wise sum; `all` accumulates separately.
    pub fn accumulate(&mut self, other: &AbilityModifierSet) {
        self.strength += other.strength;
        self.dexterity += other.dexterity;
        self.constitution += other.constitution;
        self.intelligence += other.intelligence;
        self.wisdom += other.wisdom;
        self.charisma += other.charisma;
        self.all += other.all;
    }
}

/// Mechanical effects of one condition.
///
/// `skill_penalties`/`save_penalties` may carry an `"all"` key; it
/// accumulates separately and applies to every skill/save at read time
/// (see [`crate::resolve::EffectBundle`]).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConditionEffects {
    pub ability_modifiers: AbilityModifierSet,
    pub skill_penalties: BTreeMap<String, i32>,
    pub save_penalties: BTreeMap<String, i32>,
    pub attack_penalty: i32,
    pub armor_ac_penalty: i32,
    pub movement_penalty: f32,
    pub disadvantage_on: Vec<String>,
    pub cold_vulnerability: bool,
    pub fire_resistance: bool,
    pub unconscious_risk: bool,
    pub damage_over_time: Option<DamageOverTime>,
    pub faint_chance: f32,
}

/// Effects an interaction rule layers on top when its check is satisfied.
///
/// Catalog files spell the ability keys with a `_modifier` suffix.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectPatch {
    pub strength_modifier: i32,
    pub dexterity_modifier: i32,
    pub constitution_modifier: i32,
    pub intelligence_modifier: i32,
    pub wisdom_modifier: i32,
    pub charisma_modifier: i32,
    pub all_abilities_modifier: i32,
    pub movement_penalty: f32,
    pub unconscious_risk: bool,
}

impl EffectPatch {
    pub fn ability_modifiers(&self) -> AbilityModifierSet {
        AbilityModifierSet {
            strength: self.strength_modifier,
            dexterity: self.dexterity_modifier,
            constitution: self.constitution_modifier,
            intelligence: self.intelligence_modifier,
            wisdom: self.wisdom_modifier,
            charisma: self.charisma_modifier,
            all: self.all_abilities_modifier,
        }
    }
}

// ============================================================================
// Triggers
// ============================================================================

/// Trigger literals that bypass the expression grammar and query the
/// location collaborator directly.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SpecialPredicate {
    HasWarmthSourceInLocation,
    ProvidesSomeShelter,
    ProvidesGoodShelter,
    ProvidesExcellentShelter,
}

impl SpecialPredicate {
    pub fn is_satisfied(self, location: &dyn LocationOracle) -> bool {
        let shelter = location.shelter();
        match self {
            SpecialPredicate::HasWarmthSourceInLocation => location.has_warmth_source(),
            SpecialPredicate::ProvidesSomeShelter => shelter.provides_some(),
            SpecialPredicate::ProvidesGoodShelter => shelter.provides_good(),
            SpecialPredicate::ProvidesExcellentShelter => shelter.provides_excellent(),
        }
    }
}

/// A condition's parsed trigger.
#[derive(Clone, Debug, PartialEq)]
pub enum Trigger {
    /// Never auto-triggers; reserved for externally applied conditions.
    Manual,
    /// One of the special location predicates.
    Predicate(SpecialPredicate),
    /// A restricted boolean expression over the variable whitelist.
    Expr(Expr),
}

impl Trigger {
    /// Parse a raw trigger string.
    ///
    /// `"manual"` and the special predicate literals are checked first;
    /// everything else must satisfy the expression grammar.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let trimmed = raw.trim();
        if trimmed == "manual" {
            return Ok(Trigger::Manual);
        }
        if let Ok(predicate) = SpecialPredicate::from_str(trimmed) {
            return Ok(Trigger::Predicate(predicate));
        }
        Ok(Trigger::Expr(parse_expression(trimmed)?))
    }
}

// ============================================================================
// Interactions
// ============================================================================

/// What an interaction check looks for in the final active set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckTarget {
    Condition(ConditionId),
    Category(String),
}

/// Parsed interaction check.
///
/// Accepted source forms: `has_condition:<id>`,
/// `has_condition_category:<cat>`, either optionally followed by
/// `and condition_severity_at_least:<severity>`, or a bare condition id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionCheck {
    pub target: CheckTarget,
    pub min_severity: Option<Severity>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CheckParseError {
    #[error("interaction check is empty")]
    Empty,
    #[error("interaction check names more than one target")]
    MultipleTargets,
    #[error("interaction check has a severity clause but no target")]
    MissingTarget,
    #[error("unknown severity {0:?} in interaction check")]
    UnknownSeverity(String),
    #[error("unknown clause {0:?} in interaction check")]
    UnknownClause(String),
}

impl InteractionCheck {
    pub fn parse(raw: &str) -> Result<Self, CheckParseError> {
        let mut target = None;
        let mut min_severity = None;

        let clauses: Vec<&str> = raw
            .split(" and ")
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .collect();
        if clauses.is_empty() {
            return Err(CheckParseError::Empty);
        }

        for clause in clauses {
            if let Some(id) = clause.strip_prefix("has_condition:") {
                set_target(&mut target, CheckTarget::Condition(id.trim().into()))?;
            } else if let Some(category) = clause.strip_prefix("has_condition_category:") {
                set_target(
                    &mut target,
                    CheckTarget::Category(category.trim().to_string()),
                )?;
            } else if let Some(level) = clause.strip_prefix("condition_severity_at_least:") {
                let level = level.trim();
                min_severity = Some(
                    Severity::from_str(level)
                        .map_err(|_| CheckParseError::UnknownSeverity(level.to_string()))?,
                );
            } else if clause.contains(':') {
                return Err(CheckParseError::UnknownClause(clause.to_string()));
            } else {
                // a bare token is shorthand for has_condition:<id>
                set_target(&mut target, CheckTarget::Condition(clause.into()))?;
            }
        }

        match target {
            Some(target) => Ok(Self {
                target,
                min_severity,
            }),
            None => Err(CheckParseError::MissingTarget),
        }
    }
}

fn set_target(slot: &mut Option<CheckTarget>, target: CheckTarget) -> Result<(), CheckParseError> {
    if slot.is_some() {
        return Err(CheckParseError::MultipleTargets);
    }
    *slot = Some(target);
    Ok(())
}

/// A named interaction rule attached to a condition.
#[derive(Clone, Debug, PartialEq)]
pub struct Interaction {
    pub name: String,
    pub check: InteractionCheck,
    pub additional_effects: EffectPatch,
}

// ============================================================================
// Definitions
// ============================================================================

/// A fully validated condition definition.
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionDefinition {
    pub id: ConditionId,
    pub trigger: Trigger,
    pub severity: Severity,
    pub category: String,
    pub hierarchy: Option<String>,
    pub exclusion_group: Option<String>,
    pub priority: i32,
    pub trigger_message: String,
    pub effects: ConditionEffects,
    pub interactions: Vec<Interaction>,
}

/// A condition record as catalog files spell it, triggers and checks
/// still unparsed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawCondition {
    pub id: String,
    pub trigger: String,
    pub severity: Severity,
    pub category: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hierarchy: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub exclusion_group: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trigger_message: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: ConditionEffects,
    #[cfg_attr(feature = "serde", serde(default))]
    pub interactions: Vec<RawInteraction>,
}

/// An interaction rule as catalog files spell it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawInteraction {
    pub name: String,
    pub condition_check: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub additional_effects: EffectPatch,
}
