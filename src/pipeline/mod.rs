//! Pipeline entry points for scraper workflows.
//!
//! - `run_list`: Dump raw listing events as compact JSON
//! - `run_collect`: Collect listing competitions with pictures
//! - `run_append`: Append upcoming leaderboard competitions to the document

pub mod append;
pub mod collect;
pub mod list;

pub use append::{AppendSummary, run_append};
pub use collect::{CollectSummary, run_collect};
pub use list::{ListSummary, run_list};
