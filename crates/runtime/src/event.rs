//! Notification dispatch for tick events.
//!
//! The engine emits [`SurvivalEvent`] values; sinks turn them into
//! whatever the presentation layer needs. Sinks match the event enum
//! exhaustively, so adding an event kind is a compile error everywhere it
//! is not handled.

use survival_core::SurvivalEvent;

/// Receiver for the structured events of one tick.
pub trait NotificationSink: Send {
    fn notify(&mut self, event: &SurvivalEvent);
}

/// Sink that logs every event through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, event: &SurvivalEvent) {
        match event {
            SurvivalEvent::ConditionTriggered { id, message } => {
                tracing::info!(condition = %id, "{message}");
            }
            SurvivalEvent::ConditionExpired { id } => {
                tracing::info!(condition = %id, "condition expired");
            }
            SurvivalEvent::Damage {
                amount,
                damage_type,
                source,
                old_value,
                new_value,
            } => {
                tracing::info!(
                    %source,
                    %damage_type,
                    amount,
                    old_value,
                    new_value,
                    "condition damage"
                );
            }
            SurvivalEvent::Healing {
                amount,
                source,
                old_value,
                new_value,
            } => {
                tracing::info!(%source, amount, old_value, new_value, "condition healing");
            }
            SurvivalEvent::Fainted { minutes } => {
                tracing::info!(minutes, "character fainted");
            }
            SurvivalEvent::Incapacitated => {
                tracing::warn!("character incapacitated");
            }
        }
    }
}
