//! Structured events a tick emits for the notification collaborator.
//!
//! The engine never formats user-facing prose; it emits these typed
//! payloads and the presentation layer matches on them exhaustively.

use crate::catalog::DamageType;
use crate::state::ConditionId;

/// One observable consequence of a tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurvivalEvent {
    /// A condition became active this tick.
    ConditionTriggered { id: ConditionId, message: String },
    /// A condition from the previous tick is no longer active.
    ConditionExpired { id: ConditionId },
    /// One application of condition damage against vitality.
    Damage {
        amount: i32,
        damage_type: DamageType,
        source: ConditionId,
        old_value: i32,
        new_value: i32,
    },
    /// One application of condition healing.
    Healing {
        amount: i32,
        source: ConditionId,
        old_value: i32,
        new_value: i32,
    },
    /// The fainting check came up; the tick was extended by a forced
    /// unconscious advance of this length.
    Fainted { minutes: u32 },
    /// Vitality reached zero during this tick.
    Incapacitated,
}
