pub mod finder;
pub mod types;

pub use finder::{find_next_slot, DEFAULT_SEARCH_WINDOW_DAYS};
pub use types::{subject_matches, AvailabilityRule, Booking, Slot};
