//! Per-screen view-models. Each owns its state exclusively and drops responses
//! that arrive after a newer request (or a reset) has been issued.

use std::sync::{Mutex, MutexGuard, PoisonError};

mod browse;
mod detail;
mod search;
mod sequence;

pub use browse::{BrowseState, BrowseViewModel};
pub use detail::{DetailState, DetailViewModel};
pub use search::{filter_by_title, SearchState, SearchViewModel};
pub use sequence::{RequestSequence, Ticket};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
