//! Reminder payloads handed to the notification scheduler.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pawplan_core::models::ProposedEvent;

/// Everything the notification collaborator needs to schedule one reminder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderRequest {
    /// Stable id, also used to cancel the reminder later
    pub id: Uuid,
    /// Notification title (kind label plus treatment name)
    pub title: String,
    /// Notification body (dosage, frequency, notes)
    pub body: String,
    /// Instant the notification fires
    pub fire_at: DateTime<Utc>,
    /// Minutes between the notification and the event itself
    pub lead_minutes: i64,
}

/// Build a reminder that fires `lead_time` before the event.
pub fn reminder_for(event: &ProposedEvent, lead_time: Duration) -> ReminderRequest {
    let mut details: Vec<&str> = Vec::new();
    if let Some(dosage) = event.dosage.as_deref() {
        details.push(dosage);
    }
    if let Some(frequency) = event.frequency.as_deref() {
        details.push(frequency);
    }
    if let Some(notes) = event.notes.as_deref() {
        details.push(notes);
    }

    let body = if details.is_empty() {
        event.full_name.clone()
    } else {
        details.join(", ")
    };

    ReminderRequest {
        id: Uuid::new_v4(),
        title: format!("{}: {}", event.kind.label(), event.full_name),
        body,
        fire_at: event.date - lead_time,
        lead_minutes: lead_time.num_minutes(),
    }
}
