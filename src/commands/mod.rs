//! Command-line interface and orchestration for re3harvest
//!
//! This module implements the CLI commands and coordinates the registry and
//! table layers to perform end-to-end harvest runs. It handles argument
//! parsing, logging setup, and report output.
//!
//! # Implementation Model
//!
//! The module is organized around three commands, one per harvest use case:
//!
//! - **certificates**: harvest all repositories and tabulate repository type
//!   against certification presence
//! - **apis**: harvest API endpoints, fanning out one row per API occurrence
//! - **subjects**: harvest subject-filtered repositories, one row per subject
//!
//! Each command follows the same pattern:
//!
//! 1. Parse arguments and build the facet filters and extraction spec
//! 2. Run the discovery/extraction pipeline via [`crate::registry::Harvester`]
//! 3. Normalize the records into a table via [`crate::table::Table`]
//! 4. Emit CSV and/or a console frequency summary
//!
//! The `common` module provides the shared argument block, logging setup, and
//! report generation; `host` abstracts the process streams for testability.

mod apis;
mod certificates;
mod common;
mod host;
mod progress_reporter;
mod run;
mod subjects;

pub use apis::{ApisArgs, harvest_apis};
pub use certificates::{CertificatesArgs, harvest_certificates};
pub use common::{ColorMode, CommonArgs, LogLevel};
pub use host::Host;
pub use progress_reporter::ProgressReporter;
pub use run::run;
pub use subjects::{SubjectsArgs, harvest_subjects};
