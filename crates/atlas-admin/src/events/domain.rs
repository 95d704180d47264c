use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directory entry for an organisation member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub roles: Vec<String>,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            department: self.department.clone(),
            roles: self.roles.clone(),
            name: self.name.clone(),
            id: self.id.clone(),
        }
    }
}

/// Listing projection of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub department: Option<String>,
    pub roles: Vec<String>,
    pub name: String,
    pub id: UserId,
}

/// Input accepted by event creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub attendees: Vec<UserId>,
    #[serde(default)]
    pub is_qr_required: bool,
}

/// One check-in against an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub user_id: UserId,
    pub checked_in_at: DateTime<Utc>,
}

/// Stored event. The attendee list is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub departments: Vec<String>,
    pub attendees: Vec<UserId>,
    pub attendance: Vec<AttendanceRecord>,
    pub qr_code: Option<String>,
    pub has_started: bool,
}

impl EventRecord {
    pub fn is_attendee(&self, user_id: &UserId) -> bool {
        self.attendees.iter().any(|attendee| attendee == user_id)
    }

    pub fn has_checked_in(&self, user_id: &UserId) -> bool {
        self.attendance
            .iter()
            .any(|record| &record.user_id == user_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCounts {
    pub attendance: usize,
    pub attendees: usize,
}

/// Detail projection returned to the admin event page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub id: EventId,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub has_started: bool,
    pub qr_code: Option<String>,
    pub attendees: Vec<UserSummary>,
    pub counts: EventCounts,
}
