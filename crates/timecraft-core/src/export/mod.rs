//! Plan export formats.

mod ics;

pub use ics::{escape_text, plan_to_ics, DEFAULT_CALENDAR_NAME};
