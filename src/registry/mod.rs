//! Registry access and the metadata-aggregation pipeline.
//!
//! The pipeline has three stages, each building on the previous one:
//!
//! 1. [`discovery`]: one listing request produces the sequence of detail URLs.
//! 2. [`extract`]: each detail document yields one or more records according
//!    to a field extraction [`Spec`].
//! 3. Normalization into a flat table lives in [`crate::table`].
//!
//! [`Harvester`] ties the first two stages together, isolating per-item
//! failures so that a single bad detail document cannot abort a run.

mod client;
mod discovery;
mod document;
mod extract;
mod harvester;
mod progress;

pub use client::Client;
pub use discovery::{DetailRef, Endpoints, FacetFilter, discover};
pub use document::{Document, Element, FieldPath};
pub use extract::{FanOutSpec, FieldSpec, Multiplicity, Record, Spec, extract};
pub use harvester::{Failure, Harvester, Outcome};
pub use progress::{NoProgress, Progress};
