//! Front-end independent presentation logic.
//!
//! - `state`: the explicit [`ViewState`] and its transitions
//! - `listing`: search, ordering and display formatting rules

pub mod listing;
mod state;

pub use listing::{ClientRow, filter_and_sort, format_date, matches_query, sessions_newest_first};
pub use state::{LeaveOutcome, Page, ViewState};
