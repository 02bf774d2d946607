//! Operator notifications with priority levels and a persistent journal.
//!
//! Other simulation systems emit `NotificationEvent`s (system started, tank
//! empty, equipment due for maintenance, weather alert) which are collected
//! into `NotificationLog`. Emergency notifications persist until manually
//! dismissed; lower-priority notifications auto-dismiss after a TTL.

use bevy::prelude::*;

use crate::farm_clock::FarmClock;
use crate::{SimulationSet, TickCounter};

/// Notification priority, from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NotificationPriority {
    /// Emergencies (emergency stop, tank exhausted). Persists until dismissed.
    Emergency,
    /// Significant warnings (rejected commands, low crop health, maintenance).
    Warning,
    /// General information (system started, zone toggled).
    Info,
    /// Good news (crop recovered, equipment back in service).
    Positive,
}

impl NotificationPriority {
    /// Auto-dismiss duration in simulation ticks. `None` means persist until dismissed.
    pub fn auto_dismiss_ticks(&self) -> Option<u32> {
        match self {
            NotificationPriority::Emergency => None, // persist until dismissed
            NotificationPriority::Warning => Some(1500), // ~150 seconds
            NotificationPriority::Info => Some(600),  // ~60 seconds
            NotificationPriority::Positive => Some(600), // ~60 seconds
        }
    }

    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            NotificationPriority::Emergency => "EMERGENCY",
            NotificationPriority::Warning => "WARNING",
            NotificationPriority::Info => "INFO",
            NotificationPriority::Positive => "POSITIVE",
        }
    }
}

/// A single notification with text, priority, and timing.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Unique ID for this notification.
    pub id: u64,
    /// Human-readable notification text.
    pub text: String,
    /// Priority level (determines auto-dismiss and ordering).
    pub priority: NotificationPriority,
    /// Farm day when the notification was created.
    pub day: u32,
    /// Farm hour when the notification was created.
    pub hour: f32,
    /// Tick when the notification was created (used for auto-dismiss timing).
    pub created_tick: u64,
    /// Whether the notification has been dismissed by the operator.
    pub dismissed: bool,
}

/// An archived notification stored in the persistent journal.
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub text: String,
    pub priority: NotificationPriority,
    pub day: u32,
    pub hour: f32,
}

/// Event emitted by other systems to create a notification.
///
/// # Example
/// ```ignore
/// fn my_system(mut events: EventWriter<NotificationEvent>) {
///     events.send(NotificationEvent {
///         text: "Water tank exhausted".to_string(),
///         priority: NotificationPriority::Emergency,
///     });
/// }
/// ```
#[derive(Event, Debug, Clone)]
pub struct NotificationEvent {
    pub text: String,
    pub priority: NotificationPriority,
}

/// Active notifications and archived journal entries.
#[derive(Resource)]
pub struct NotificationLog {
    /// Currently active (visible) notifications.
    pub active: Vec<Notification>,
    /// Archived journal of all past notifications.
    pub journal: Vec<JournalEntry>,
    /// Maximum journal size before old entries are trimmed.
    pub max_journal: usize,
    /// Next notification ID counter.
    next_id: u64,
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            journal: Vec::new(),
            max_journal: 500,
            next_id: 1,
        }
    }
}

impl NotificationLog {
    /// Allocate the next unique notification ID.
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a notification from an event.
    pub fn push(&mut self, event: &NotificationEvent, clock: &FarmClock, tick: u64) {
        let id = self.next_id();
        self.active.push(Notification {
            id,
            text: event.text.clone(),
            priority: event.priority,
            day: clock.day,
            hour: clock.hour,
            created_tick: tick,
            dismissed: false,
        });

        // Also archive immediately in the journal
        self.journal.push(JournalEntry {
            text: event.text.clone(),
            priority: event.priority,
            day: clock.day,
            hour: clock.hour,
        });

        // Trim journal if over capacity
        if self.journal.len() > self.max_journal {
            let excess = self.journal.len() - self.max_journal;
            self.journal.drain(0..excess);
        }
    }

    /// Dismiss a notification by ID.
    pub fn dismiss(&mut self, id: u64) {
        if let Some(n) = self.active.iter_mut().find(|n| n.id == id) {
            n.dismissed = true;
        }
    }

    /// Remove all dismissed and auto-expired notifications from the active list.
    pub fn sweep(&mut self, current_tick: u64) {
        self.active.retain(|n| {
            if n.dismissed {
                return false;
            }
            if let Some(ttl) = n.priority.auto_dismiss_ticks() {
                let elapsed = current_tick.saturating_sub(n.created_tick);
                if elapsed >= ttl as u64 {
                    return false;
                }
            }
            true
        });
    }
}

/// Collects `NotificationEvent`s and pushes them into `NotificationLog`.
fn collect_notifications(
    mut events: EventReader<NotificationEvent>,
    mut log: ResMut<NotificationLog>,
    clock: Res<FarmClock>,
    tick: Res<TickCounter>,
) {
    for event in events.read() {
        log.push(event, &clock, tick.0);
    }
}

/// Periodically sweeps expired notifications from the active list.
fn sweep_expired_notifications(mut log: ResMut<NotificationLog>, tick: Res<TickCounter>) {
    // Run every 10 ticks (~1 second) rather than every tick, for efficiency
    if !tick.0.is_multiple_of(10) {
        return;
    }
    log.sweep(tick.0);
}

pub struct NotificationsPlugin;

impl Plugin for NotificationsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NotificationLog>()
            .add_event::<NotificationEvent>()
            .add_systems(
                FixedUpdate,
                (collect_notifications, sweep_expired_notifications)
                    .chain()
                    .in_set(SimulationSet::PostSim),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(text: &str, priority: NotificationPriority) -> NotificationEvent {
        NotificationEvent {
            text: text.to_string(),
            priority,
        }
    }

    #[test]
    fn test_priority_ordering() {
        assert!(NotificationPriority::Emergency < NotificationPriority::Warning);
        assert!(NotificationPriority::Warning < NotificationPriority::Info);
        assert!(NotificationPriority::Info < NotificationPriority::Positive);
    }

    #[test]
    fn test_emergency_persists() {
        assert!(NotificationPriority::Emergency
            .auto_dismiss_ticks()
            .is_none());
    }

    #[test]
    fn test_push_and_journal() {
        let mut log = NotificationLog::default();
        let clock = FarmClock::default();
        log.push(&event("Zone North Field activated", NotificationPriority::Info), &clock, 0);

        assert_eq!(log.active.len(), 1);
        assert_eq!(log.journal.len(), 1);
        assert_eq!(log.active[0].text, "Zone North Field activated");
    }

    #[test]
    fn test_dismiss() {
        let mut log = NotificationLog::default();
        let clock = FarmClock::default();
        log.push(&event("Emergency stop", NotificationPriority::Emergency), &clock, 0);
        let id = log.active[0].id;

        log.dismiss(id);
        assert!(log.active[0].dismissed);

        log.sweep(0);
        assert!(log.active.is_empty());
        // Journal persists
        assert_eq!(log.journal.len(), 1);
    }

    #[test]
    fn test_sweep_auto_dismiss() {
        let mut log = NotificationLog::default();
        let clock = FarmClock::default();

        // Info notification with 600 tick TTL
        log.push(&event("System started", NotificationPriority::Info), &clock, 100);

        // Not expired yet
        log.sweep(500);
        assert_eq!(log.active.len(), 1);

        // Expired (100 + 600 = 700)
        log.sweep(701);
        assert!(log.active.is_empty());
    }

    #[test]
    fn test_emergency_never_auto_expires() {
        let mut log = NotificationLog::default();
        let clock = FarmClock::default();

        log.push(&event("Tank exhausted", NotificationPriority::Emergency), &clock, 0);

        log.sweep(999_999);
        assert_eq!(log.active.len(), 1);
    }

    #[test]
    fn test_journal_trimming() {
        let mut log = NotificationLog::default();
        log.max_journal = 5;
        let clock = FarmClock::default();

        for i in 0..10 {
            log.push(
                &event(&format!("Event {}", i), NotificationPriority::Info),
                &clock,
                i,
            );
        }

        assert_eq!(log.journal.len(), 5);
        assert_eq!(log.journal[0].text, "Event 5"); // oldest kept
        assert_eq!(log.journal[4].text, "Event 9"); // newest
    }

    #[test]
    fn test_unique_ids() {
        let mut log = NotificationLog::default();
        let clock = FarmClock::default();

        for _ in 0..5 {
            log.push(&event("test", NotificationPriority::Info), &clock, 0);
        }

        let ids: Vec<u64> = log.active.iter().map(|n| n.id).collect();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                assert_ne!(ids[i], ids[j], "IDs must be unique");
            }
        }
    }
}
