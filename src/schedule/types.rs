use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A recurring weekly availability window, e.g. "Math, Tuesdays 15:00-17:00".
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AvailabilityRule {
    pub id: String,

    /// Subject label, matched loosely (see [`subject_matches`])
    pub subject: String,

    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,

    /// Wall-clock window start, "HH:MM"
    pub start: String,

    /// Wall-clock window end, "HH:MM"
    pub end: String,

    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl AvailabilityRule {
    /// Parsed start time, if the rule's "HH:MM" string is well-formed
    pub fn start_time(&self) -> Option<NaiveTime> {
        parse_hhmm(&self.start)
    }

    /// Parsed end time, if the rule's "HH:MM" string is well-formed
    pub fn end_time(&self) -> Option<NaiveTime> {
        parse_hhmm(&self.end)
    }
}

/// An already-scheduled interval on the calendar.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Booking {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A concrete start/end interval proposed for a lesson. Generated
/// transiently per request; persisting it as a booking is the caller's
/// job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// The availability rule this slot was generated from
    pub rule_id: String,
}

/// Parse a "HH:MM" wall-clock string. Seconds are always zero.
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

/// Loose subject match: either string contains the other,
/// case-insensitively, so "Math" matches "Mathematics" and vice versa.
pub fn subject_matches(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}
