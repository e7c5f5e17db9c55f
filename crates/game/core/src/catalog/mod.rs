//! Static, data-loaded catalogs of conditions and activities.
//!
//! Catalogs are built once from raw records, validated eagerly, and
//! read-only afterwards. Validation is fail-safe: a record whose trigger
//! or interaction check does not parse is excluded with a diagnostic
//! naming the offending id, and the rest of the catalog loads. Catalog
//! order is preserved because it breaks priority ties during conflict
//! resolution.
//!
//! Catalogs carry no interior mutability, so one catalog may be shared
//! read-only across any number of character states.

mod activity;
mod condition;

pub use activity::{ActivityDefinition, DurationClass, ExertionLevel};
pub use condition::{
    Ability, AbilityModifierSet, CheckParseError, CheckTarget, ConditionDefinition,
    ConditionEffects, DamageOverTime, DamageType, EffectPatch, Interaction, InteractionCheck,
    Interval, IntervalParseError, RawCondition, RawInteraction, Severity, SpecialPredicate,
    Trigger,
};

use std::collections::{BTreeMap, HashMap};

use crate::expr::ParseError;
use crate::state::ConditionId;

// ============================================================================
// Build Diagnostics
// ============================================================================

/// Why a raw condition record was rejected at load time.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("trigger failed to parse: {0}")]
    Trigger(#[from] ParseError),
    #[error("interaction {name:?} check failed to parse: {source}")]
    InteractionCheck {
        name: String,
        source: CheckParseError,
    },
    #[error("duplicate condition id")]
    DuplicateId,
}

/// Load-time diagnostic for one rejected definition.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogDiagnostic {
    pub id: ConditionId,
    pub error: CatalogError,
}

/// Result of building a condition catalog: whatever validated, plus the
/// diagnostics for whatever did not.
#[derive(Clone, Debug)]
pub struct CatalogBuild {
    pub catalog: ConditionCatalog,
    pub rejected: Vec<CatalogDiagnostic>,
}

// ============================================================================
// Condition Catalog
// ============================================================================

/// The validated, ordered condition catalog.
#[derive(Clone, Debug, Default)]
pub struct ConditionCatalog {
    definitions: Vec<ConditionDefinition>,
    index: HashMap<ConditionId, usize>,
    severity_colors: BTreeMap<Severity, String>,
}

impl ConditionCatalog {
    /// Validate raw records into a catalog, preserving input order.
    ///
    /// Rejections (unparseable trigger or interaction check, duplicate id)
    /// are collected, never fatal: one bad condition must not take the
    /// engine down.
    pub fn build(raw: Vec<RawCondition>) -> CatalogBuild {
        let mut catalog = ConditionCatalog::default();
        let mut rejected = Vec::new();

        for record in raw {
            let id = ConditionId::new(record.id.clone());
            match Self::validate(record) {
                Ok(definition) => {
                    if catalog.index.contains_key(&definition.id) {
                        rejected.push(CatalogDiagnostic {
                            id,
                            error: CatalogError::DuplicateId,
                        });
                        continue;
                    }
                    catalog
                        .index
                        .insert(definition.id.clone(), catalog.definitions.len());
                    catalog.definitions.push(definition);
                }
                Err(error) => rejected.push(CatalogDiagnostic { id, error }),
            }
        }

        CatalogBuild { catalog, rejected }
    }

    fn validate(record: RawCondition) -> Result<ConditionDefinition, CatalogError> {
        let trigger = Trigger::parse(&record.trigger)?;

        let mut interactions = Vec::with_capacity(record.interactions.len());
        for raw in record.interactions {
            let check = InteractionCheck::parse(&raw.condition_check).map_err(|source| {
                CatalogError::InteractionCheck {
                    name: raw.name.clone(),
                    source,
                }
            })?;
            interactions.push(Interaction {
                name: raw.name,
                check,
                additional_effects: raw.additional_effects,
            });
        }

        Ok(ConditionDefinition {
            id: ConditionId::new(record.id),
            trigger,
            severity: record.severity,
            category: record.category,
            hierarchy: record.hierarchy,
            exclusion_group: record.exclusion_group,
            priority: record.priority,
            trigger_message: record.trigger_message,
            effects: record.effects,
            interactions,
        })
    }

    /// Attach the presentation-layer severity color map.
    pub fn with_severity_colors(mut self, colors: BTreeMap<Severity, String>) -> Self {
        self.severity_colors = colors;
        self
    }

    pub fn get(&self, id: &ConditionId) -> Option<&ConditionDefinition> {
        self.index.get(id).map(|&i| &self.definitions[i])
    }

    /// Definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ConditionDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Display color for a severity, if the content provides one.
    pub fn severity_color(&self, severity: Severity) -> Option<&str> {
        self.severity_colors.get(&severity).map(String::as_str)
    }
}

// ============================================================================
// Activity Catalog
// ============================================================================

/// The named activities the scheduler accepts, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct ActivityCatalog {
    activities: Vec<ActivityDefinition>,
    index: HashMap<String, usize>,
}

impl ActivityCatalog {
    /// Build from definitions; on a duplicate name the first wins.
    pub fn new(definitions: Vec<ActivityDefinition>) -> Self {
        let mut catalog = ActivityCatalog::default();
        for definition in definitions {
            if catalog.index.contains_key(&definition.name) {
                continue;
            }
            catalog
                .index
                .insert(definition.name.clone(), catalog.activities.len());
            catalog.activities.push(definition);
        }
        catalog
    }

    pub fn get(&self, name: &str) -> Option<&ActivityDefinition> {
        self.index.get(name).map(|&i| &self.activities[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivityDefinition> {
        self.activities.iter()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}
