//! Calendar adapters.

mod google_calendar;

pub use google_calendar::GoogleCalendarScheduler;
