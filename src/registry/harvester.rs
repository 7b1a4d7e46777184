//! The metadata-aggregation pipeline: discovery, then strictly sequential
//! per-item extraction.

use super::client::Client;
use super::discovery::{DetailRef, Endpoints, FacetFilter, discover};
use super::document::Document;
use super::extract::{Record, Spec, extract};
use super::progress::Progress;
use std::sync::Arc;
use url::Url;

/// A detail URL that could not be fetched or extracted, with its cause.
#[derive(Debug)]
pub struct Failure {
    pub url: Url,
    pub error: ohno::AppError,
}

/// The result of a harvest run: all extracted records plus the items that
/// were skipped because of per-item failures.
#[derive(Debug, Default)]
pub struct Outcome {
    pub records: Vec<Record>,
    pub failures: Vec<Failure>,
}

/// Harvester for running the discovery/extraction pipeline against a registry.
pub struct Harvester {
    client: Client,
    endpoints: Endpoints,
    progress: Arc<dyn Progress>,
}

impl core::fmt::Debug for Harvester {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Harvester")
            .field("client", &self.client)
            .field("endpoints", &self.endpoints)
            .field("progress", &"<dyn Progress>")
            .finish()
    }
}

impl Harvester {
    pub fn new(client: Client, endpoints: Endpoints, progress: impl Progress + 'static) -> Self {
        Self {
            client,
            endpoints,
            progress: Arc::new(progress),
        }
    }

    /// Run the full pipeline for one extraction spec.
    ///
    /// Discovery failure is fatal. A failure fetching or extracting a single
    /// detail document is isolated: the item is skipped, recorded in the
    /// outcome, and the run continues. Detail documents are fetched one at a
    /// time, each fully consumed before the next request is issued.
    pub async fn harvest(&self, filters: &[FacetFilter], spec: &Spec) -> crate::Result<Outcome> {
        self.progress.set_phase("Discovering");
        let detail_refs = discover(&self.client, &self.endpoints, filters).await?;

        self.progress.set_phase("Fetching");
        self.progress.begin_items(detail_refs.len() as u64);

        let mut outcome = Outcome::default();
        for detail_ref in detail_refs {
            match self.harvest_item(&detail_ref, spec).await {
                Ok(mut records) => outcome.records.append(&mut records),
                Err(error) => {
                    log::warn!("skipping {}: {error:#}", detail_ref.url);
                    outcome.failures.push(Failure {
                        url: detail_ref.url,
                        error,
                    });
                }
            }
            self.progress.item_done();
        }

        self.progress.done();
        log::info!(
            "harvested {} record(s), skipped {} item(s)",
            outcome.records.len(),
            outcome.failures.len()
        );
        Ok(outcome)
    }

    async fn harvest_item(&self, detail_ref: &DetailRef, spec: &Spec) -> crate::Result<Vec<Record>> {
        let body = self.client.get_text(&detail_ref.url).await?;
        let document = Document::parse(&body)?;
        extract(&document, spec)
    }
}
