//! Grade calculation
//!
//! - [`aggregator`]: pure top-N averaging over one student's scores
//! - [`loader`]: batch fetch and per-student aggregation
//! - [`source`]: PostgreSQL-backed score source

pub mod aggregator;
pub mod loader;
pub mod source;

pub use aggregator::{
    Aggregate, GradeError, GradingPolicy, ScoreEntry, compute, compute_with, round_average,
};
pub use loader::{
    AggregateResult, GradeOutcome, ScoreSource, aggregate_fetched, entries_for_student,
    load_and_aggregate,
};
pub use source::PgScoreSource;
