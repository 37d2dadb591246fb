//! The emergency episode state machine.
//!
//! One `EmergencyMonitor` tracks the lifecycle of emergencies for a single
//! monitored person:
//!
//!   Clear → Active      on trigger (event created, notification plan runs)
//!   Active → Resolving  on "mark resolved" (resolve control disabled)
//!   Resolving → Clear   on backend confirmation (resolved_at set)
//!   Resolving → Active  on resolution failure (episode never silently lost)
//!
//! The store enforces one Active episode per person; the monitor enforces
//! the transition rules on top of it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use wecare_contracts::{
    emergency::{EmergencyEvent, EventId, PersonId},
    error::{WecareError, WecareResult},
    notice::Notice,
};
use wecare_core::traits::{EventStore, Notifier};

use crate::plan::NotificationPlan;

/// Where the monitored person's emergency lifecycle currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeState {
    /// No active emergency.
    Clear,
    /// An emergency is active; the resolve control is available.
    Active { event_id: EventId },
    /// Resolution was requested and is awaiting backend confirmation; the
    /// resolve control is disabled to prevent double submission.
    Resolving { event_id: EventId },
}

impl EpisodeState {
    fn name(&self) -> &'static str {
        match self {
            EpisodeState::Clear => "clear",
            EpisodeState::Active { .. } => "active",
            EpisodeState::Resolving { .. } => "resolving",
        }
    }
}

/// Drives the emergency lifecycle for one monitored person.
pub struct EmergencyMonitor {
    person_id: PersonId,
    store: Arc<dyn EventStore>,
    notifier: Arc<dyn Notifier>,
    plan: NotificationPlan,
    state: EpisodeState,
}

impl EmergencyMonitor {
    /// Build a monitor, resuming an Active episode if the store has one.
    ///
    /// A session that starts while an emergency is already underway must
    /// show it, not assume Clear.
    pub fn new(
        person_id: PersonId,
        store: Arc<dyn EventStore>,
        notifier: Arc<dyn Notifier>,
        plan: NotificationPlan,
    ) -> WecareResult<Self> {
        let state = match store.active_event_for(&person_id)? {
            Some(event) => {
                info!(person_id = %person_id, event_id = %event.id.0, "resuming active emergency");
                EpisodeState::Active { event_id: event.id }
            }
            None => EpisodeState::Clear,
        };

        Ok(Self {
            person_id,
            store,
            notifier,
            plan,
            state,
        })
    }

    pub fn state(&self) -> EpisodeState {
        self.state
    }

    /// True while the resolve control should be enabled.
    pub fn can_resolve(&self) -> bool {
        matches!(self.state, EpisodeState::Active { .. })
    }

    /// Press the emergency button: Clear → Active.
    ///
    /// Creates the event with all contact flags false, then runs the
    /// notification plan. A step whose delivery fails leaves its flag false
    /// and does not stop later steps — the checklist shows what is still
    /// pending. Returns the stored event after the plan ran.
    pub fn trigger(
        &mut self,
        event_type: &str,
        notes: &str,
        now: DateTime<Utc>,
    ) -> WecareResult<EmergencyEvent> {
        if self.state != EpisodeState::Clear {
            return Err(WecareError::InvalidTransition {
                from: self.state.name().to_string(),
                action: "trigger".to_string(),
            });
        }

        let event = EmergencyEvent::new_active(self.person_id.clone(), event_type, notes, now);
        let event_id = self.store.create_event(&event)?;

        info!(
            person_id = %self.person_id,
            event_id = %event_id.0,
            event_type = %event_type,
            "emergency triggered"
        );

        self.state = EpisodeState::Active { event_id };
        self.run_notification_plan(&event);

        // Re-read so the returned event carries the flags the plan set.
        match self.store.get_event(event_id)? {
            Some(stored) => Ok(stored),
            None => Err(WecareError::StoreUnavailable {
                reason: format!("emergency event '{}' vanished after create", event_id.0),
            }),
        }
    }

    /// Request resolution: Active → Resolving.
    pub fn begin_resolve(&mut self) -> WecareResult<()> {
        let EpisodeState::Active { event_id } = self.state else {
            return Err(WecareError::InvalidTransition {
                from: self.state.name().to_string(),
                action: "begin resolution".to_string(),
            });
        };

        self.state = EpisodeState::Resolving { event_id };
        Ok(())
    }

    /// Backend confirmed the resolution: Resolving → Clear.
    ///
    /// Marks the stored event Resolved with `resolved_at = now` and returns
    /// the success notice to surface.
    pub fn confirm_resolved(&mut self, now: DateTime<Utc>) -> WecareResult<Notice> {
        let EpisodeState::Resolving { event_id } = self.state else {
            return Err(WecareError::InvalidTransition {
                from: self.state.name().to_string(),
                action: "confirm resolution".to_string(),
            });
        };

        self.store.resolve_event(event_id, now)?;
        self.state = EpisodeState::Clear;
        Ok(Notice::success("Emergency resolved"))
    }

    /// Resolution failed: Resolving → Active.
    ///
    /// The episode stays active and the resolve control re-enables; the
    /// returned notice tells the user to retry.
    pub fn fail_resolution(&mut self, reason: &str) -> WecareResult<Notice> {
        let EpisodeState::Resolving { event_id } = self.state else {
            return Err(WecareError::InvalidTransition {
                from: self.state.name().to_string(),
                action: "fail resolution".to_string(),
            });
        };

        warn!(event_id = %event_id.0, reason = %reason, "emergency resolution failed");
        self.state = EpisodeState::Active { event_id };
        Ok(Notice::error(format!("Could not resolve emergency: {}", reason)))
    }

    /// Run every plan step, flipping the matching contact flag on success.
    fn run_notification_plan(&self, event: &EmergencyEvent) {
        for step in &self.plan.steps {
            match self.notifier.notify(event, step.contact) {
                Ok(()) => {
                    if let Err(e) = self.store.mark_contact_done(event.id, step.contact) {
                        warn!(
                            event_id = %event.id.0,
                            contact = %step.contact,
                            error = %e,
                            "notification delivered but flag update failed"
                        );
                    }
                }
                Err(e) => {
                    warn!(
                        event_id = %event.id.0,
                        contact = %step.contact,
                        error = %e,
                        "notification step failed; flag stays pending"
                    );
                }
            }
        }
    }
}
