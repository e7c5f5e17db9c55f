//! Condition resolution: triggers, conflicts, aggregation, interactions.
//!
//! [`resolve`] is a pure function of (state, catalog, location, previous
//! active set). Running it twice without a state mutation in between
//! yields identical results, which is what makes re-evaluation for
//! display purposes safe. Pipeline per tick:
//!
//! 1. trigger pass over the whole catalog
//! 2. hierarchy resolution (highest priority per hierarchy group)
//! 3. exclusion resolution (same algorithm, applied after hierarchies)
//! 4. effect aggregation into an [`EffectBundle`]
//! 5. interaction pass against the final active set
//! 6. diff against the previous set for notifications

mod bundle;

pub use bundle::EffectBundle;

use std::collections::HashMap;

use crate::catalog::{
    CheckTarget, ConditionCatalog, ConditionDefinition, InteractionCheck, Severity, Trigger,
};
use crate::config::EngineConfig;
use crate::env::LocationOracle;
use crate::expr::{EvalContext, EvalError, evaluate_trigger};
use crate::state::{ActiveConditionSet, ConditionId, SurvivalState};

// ============================================================================
// Output
// ============================================================================

/// A condition that is active now but was not last tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggeredCondition {
    pub id: ConditionId,
    /// The catalog-authored first-activation message, passed through
    /// verbatim for the notification collaborator.
    pub message: String,
}

/// Non-fatal problems encountered while resolving.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolveDiagnostic {
    /// A trigger failed to evaluate; the condition counted as not
    /// triggered.
    TriggerFailed { id: ConditionId, error: EvalError },
    /// More conditions survived resolution than the active set can hold;
    /// this one was dropped.
    ActiveSetOverflow { id: ConditionId },
}

/// Complete result of one resolution pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Surviving condition ids, in catalog order.
    pub active: ActiveConditionSet,
    /// Aggregated effects of the active set, interactions included.
    pub bundle: EffectBundle,
    /// Active now, absent last tick.
    pub newly_triggered: Vec<TriggeredCondition>,
    /// Active last tick, gone now.
    pub expired: Vec<ConditionId>,
    /// Summed faint chance across the active set, capped.
    pub faint_chance: f32,
    pub diagnostics: Vec<ResolveDiagnostic>,
}

// ============================================================================
// Context
// ============================================================================

/// Build the evaluation context triggers run against: the survival meters
/// plus the location collaborator's predicates.
pub fn build_context(state: &SurvivalState, location: &dyn LocationOracle) -> EvalContext {
    let shelter = location.shelter();
    EvalContext {
        hunger: state.hunger() as f64,
        thirst: state.thirst() as f64,
        fatigue: state.fatigue() as f64,
        body_temperature: state.body_temperature() as f64,
        wetness: state.wetness() as f64,
        wind_chill: state.wind_chill() as f64,
        has_warmth_source_in_location: location.has_warmth_source(),
        provides_some_shelter: shelter.provides_some(),
        provides_good_shelter: shelter.provides_good(),
        provides_excellent_shelter: shelter.provides_excellent(),
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Evaluate the catalog against current state and resolve conflicts.
pub fn resolve(
    state: &SurvivalState,
    catalog: &ConditionCatalog,
    location: &dyn LocationOracle,
    previous: &ActiveConditionSet,
) -> Resolution {
    let ctx = build_context(state, location);
    let mut diagnostics = Vec::new();

    // 1. trigger pass
    let mut candidates: Vec<&ConditionDefinition> = Vec::new();
    for definition in catalog.iter() {
        let triggered = match &definition.trigger {
            Trigger::Manual => false,
            Trigger::Predicate(predicate) => predicate.is_satisfied(location),
            Trigger::Expr(expr) => match evaluate_trigger(expr, &ctx) {
                Ok(triggered) => triggered,
                Err(error) => {
                    diagnostics.push(ResolveDiagnostic::TriggerFailed {
                        id: definition.id.clone(),
                        error,
                    });
                    false
                }
            },
        };
        if triggered {
            candidates.push(definition);
        }
    }

    // 2. + 3. conflict resolution; exclusion groups are applied to the
    // hierarchy survivors, not the raw candidates
    let survivors = resolve_groups(candidates, |d| d.hierarchy.as_deref());
    let survivors = resolve_groups(survivors, |d| d.exclusion_group.as_deref());

    // 4. effect aggregation
    let mut bundle = EffectBundle::new();
    let mut faint_chance = 0.0f32;
    for definition in &survivors {
        bundle.accumulate(&definition.effects);
        faint_chance += definition.effects.faint_chance;
    }
    let faint_chance = faint_chance.clamp(0.0, EngineConfig::FAINT_CHANCE_CAP);

    // 5. interaction pass against the final active set
    for definition in &survivors {
        for interaction in &definition.interactions {
            if check_satisfied(&interaction.check, &definition.id, &survivors) {
                bundle.apply_patch(&interaction.additional_effects);
            }
        }
    }

    // 6. active set + notification diff
    let mut active = ActiveConditionSet::new();
    for definition in &survivors {
        if !active.push(definition.id.clone()) {
            diagnostics.push(ResolveDiagnostic::ActiveSetOverflow {
                id: definition.id.clone(),
            });
        }
    }

    let newly_triggered = survivors
        .iter()
        .filter(|d| active.contains(&d.id) && !previous.contains(&d.id))
        .map(|d| TriggeredCondition {
            id: d.id.clone(),
            message: d.trigger_message.clone(),
        })
        .collect();
    let expired = previous
        .iter()
        .filter(|id| !active.contains(id))
        .cloned()
        .collect();

    Resolution {
        active,
        bundle,
        newly_triggered,
        expired,
        faint_chance,
        diagnostics,
    }
}

/// Keep, within each group, only the highest-priority member (ties go to
/// catalog order). Definitions without a group key pass through untouched.
fn resolve_groups<'a>(
    candidates: Vec<&'a ConditionDefinition>,
    group_key: fn(&ConditionDefinition) -> Option<&str>,
) -> Vec<&'a ConditionDefinition> {
    let mut winners: HashMap<String, usize> = HashMap::new();
    for (position, definition) in candidates.iter().enumerate() {
        let Some(key) = group_key(definition) else {
            continue;
        };
        match winners.get(key) {
            // non-strict comparison keeps the earlier (catalog-order)
            // member on priority ties
            Some(&best) if candidates[best].priority >= definition.priority => {}
            _ => {
                winners.insert(key.to_string(), position);
            }
        }
    }

    let mut survivors = Vec::with_capacity(candidates.len());
    for (position, definition) in candidates.iter().enumerate() {
        let keep = match group_key(definition) {
            Some(key) => winners.get(key) == Some(&position),
            None => true,
        };
        if keep {
            survivors.push(*definition);
        }
    }
    survivors
}

/// Whether an interaction check is satisfied by the final active set.
///
/// The owning condition never satisfies its own check; interactions are
/// about co-active company.
fn check_satisfied(
    check: &InteractionCheck,
    owner: &ConditionId,
    active: &[&ConditionDefinition],
) -> bool {
    match &check.target {
        CheckTarget::Condition(id) => active.iter().any(|d| {
            &d.id == id && &d.id != owner && meets_min_severity(d, check.min_severity)
        }),
        CheckTarget::Category(category) => active.iter().any(|d| {
            &d.id != owner
                && &d.category == category
                && meets_min_severity(d, check.min_severity)
        }),
    }
}

/// Severity gate shared by both check target forms.
fn meets_min_severity(definition: &ConditionDefinition, min: Option<Severity>) -> bool {
    min.is_none_or(|min| definition.severity >= min)
}
