use chrono::{Datelike, Duration, NaiveDateTime, Weekday};

use super::types::{AvailabilityRule, Booking, Slot};

/// How many calendar days ahead to search when the caller doesn't say
pub const DEFAULT_SEARCH_WINDOW_DAYS: u32 = 14;

/// Find the earliest conflict-free lesson slot in the availability grid.
///
/// Walks each of the next `search_window_days` calendar days starting from
/// `now`'s date, skipping weekends (weekday-only scheduling policy), and
/// expands every active matching rule into a concrete candidate slot of
/// `duration_minutes`. Candidates are considered in start order; the first
/// one that overlaps no existing booking wins. `None` means no slot exists
/// in the window - an expected outcome the caller surfaces as "needs manual
/// scheduling", not an error.
///
/// `now` is caller-supplied rather than read from the clock so results are
/// reproducible and testable.
pub fn find_next_slot(
    rules: &[AvailabilityRule],
    bookings: &[Booking],
    duration_minutes: u32,
    now: NaiveDateTime,
    search_window_days: u32,
) -> Option<Slot> {
    let duration = Duration::minutes(i64::from(duration_minutes));
    let mut candidates = Vec::new();

    for day_offset in 0..i64::from(search_window_days) {
        let date = now.date() + Duration::days(day_offset);
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        let day_of_week = date.weekday().num_days_from_sunday() as u8;

        for rule in rules.iter().filter(|r| r.active && r.day_of_week == day_of_week) {
            let (Some(window_start), Some(window_end)) = (rule.start_time(), rule.end_time())
            else {
                continue;
            };
            // A rule window may hold more than one lesson; the candidate
            // only claims the requested duration from the window start
            if window_end - window_start < duration {
                continue;
            }
            let slot_start = date.and_time(window_start);
            if slot_start <= now {
                continue;
            }
            candidates.push(Slot {
                start: slot_start,
                end: slot_start + duration,
                rule_id: rule.id.clone(),
            });
        }
    }

    candidates.sort_by_key(|slot| slot.start);
    candidates
        .into_iter()
        .find(|slot| !bookings.iter().any(|booking| conflicts(slot, booking)))
}

/// Half-open interval overlap: touching endpoints do not conflict.
fn conflicts(slot: &Slot, booking: &Booking) -> bool {
    slot.start < booking.end && slot.end > booking.start
}
