//! progdock-extract — Final extraction phase of progressive docking.
//!
//! Joins per-batch model predictions with their molecule strings, ranks every
//! molecule by predicted score and writes the top of the ranking for docking:
//! 1. Batch discovery
//! 2. Per-batch merge (parallel)
//! 3. Global ranking and top-K truncation
//! 4. Output artifacts and the completion marker

pub mod error;
pub mod batch;
pub mod discovery;
pub mod dispatch;
pub mod ranking;
pub mod output;
pub mod status;
pub mod pipeline;

pub use error::{ExtractError, Result};
pub use dispatch::FailurePolicy;
pub use pipeline::{run_extraction, ExtractionJob, ExtractionOutcome, ExtractionReport, OutputPaths};
pub use ranking::MolsToDock;
pub use status::RunStatus;
