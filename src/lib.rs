//! Cleaning and exploratory analysis of NYC yellow taxi trips with DataFusion.
//!
//! A run loads a trip CSV, keeps eight typed columns, profiles data quality,
//! filters and deduplicates, derives duration and pickup hour, answers three
//! questions, prints descriptive statistics and writes the cleaned trips to a
//! single CSV file. See [`pipeline::run`].

pub mod analyze;
pub mod clean;
pub mod config;
pub mod load;
pub mod persist;
pub mod pipeline;
pub mod profile;
pub mod report;
pub mod schema;
pub mod session;
pub mod summary;
pub mod transform;

pub use config::PipelineConfig;
pub use pipeline::{run, PipelineOutcome};
pub use session::TaxiSession;
