//! Persistence of the aggregated competitions document.
//!
//! ```text
//! data/
//! └── getCompetitions/
//!     └── competitions.json   # array of competition records
//! ```

pub mod local;

// Re-export for convenience
pub use local::AggregationStore;
