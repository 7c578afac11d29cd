//! # Pos52 Ext File
//!
//! File-based price history sources and report writers for Pos52.
//!
//! This crate provides the default [`HistoryProvider`](pos52_core::traits::HistoryProvider)
//! implementations:
//! - A directory of per-day JSON files (`{"date": "...", "close": ...}`)
//! - A chart snapshot with a `series` of `{time, close}` entries
//! - A CSV file with `date` and `close` columns
//! - An in-memory source for tests
//!
//! Unusable records are skipped with a typed reason rather than aborting the
//! load.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod history;
mod writer;

pub use history::*;
pub use writer::*;
