//! Displayed subset and date selector values.
//!
//! Both functions are pure: call them again whenever the event set or the
//! selection changes.

use chrono::NaiveDate;

use crate::event::EnrichedEvent;
use crate::selection::SelectionState;

/// Events to show for `selection`, soonest first.
///
/// An event is shown when it matches the date filter and the search term and
/// is not in the past. Events on the same day keep their input order.
pub fn compute_displayed(
    all: &[EnrichedEvent],
    selection: &SelectionState,
    today: NaiveDate,
) -> Vec<EnrichedEvent> {
    let mut displayed: Vec<EnrichedEvent> = all
        .iter()
        .filter(|e| e.date >= today)
        .filter(|e| selection.date.accepts(e.date))
        .filter(|e| selection.matches_search(&e.name))
        .cloned()
        .collect();

    // sort_by_key is stable
    displayed.sort_by_key(|e| e.date);
    displayed
}

/// Unique event dates in ascending order, for the date selector.
pub fn available_dates(all: &[EnrichedEvent]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = all.iter().map(|e| e.date).collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}
