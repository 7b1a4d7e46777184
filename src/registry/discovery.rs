//! Identifier/URL discovery against the registry listing endpoints.
//!
//! A single listing request yields the complete set of detail URLs for a run.
//! The unfiltered `v1` listing carries bare identifier tokens, while the
//! faceted `beta` listing carries ready-made detail links; callers get fully
//! qualified detail URLs either way.
//!
//! The upstream is assumed to return the complete result set in one response.
//! If it ever starts paginating, this stage silently under-collects; there is
//! no pagination contract to code against today.

use super::client::Client;
use super::document::{Document, FieldPath};
use ohno::{IntoAppError, app_err};
use url::Url;

/// A facet constraint passed to the listing endpoint, e.g. subject area or
/// persistent-identifier scheme. Values come from the registry's controlled
/// vocabulary and are treated as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetFilter {
    key: String,
    value: String,
}

impl FacetFilter {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parse a `KEY=VALUE` pair as given on the command line.
    pub fn parse(pair: &str) -> crate::Result<Self> {
        match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() && !value.is_empty() => Ok(Self::new(key, value)),
            _ => Err(app_err!("facet filter `{pair}` is not of the form KEY=VALUE")),
        }
    }

    /// Query parameter name, in the registry's array convention.
    fn query_key(&self) -> String {
        if self.key == "query" || self.key.ends_with("[]") {
            self.key.clone()
        } else {
            format!("{}[]", self.key)
        }
    }
}

/// The registry's endpoint layout, rooted at a configurable base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> crate::Result<Self> {
        let base = Url::parse(base_url).into_app_err_with(|| format!("invalid base URL `{base_url}`"))?;
        Ok(Self { base })
    }

    /// The listing endpoint for a set of facet filters.
    ///
    /// Unfiltered listings use the stable `v1` endpoint; faceted queries are
    /// only available on the `beta` endpoint.
    pub fn listing(&self, filters: &[FacetFilter]) -> crate::Result<Url> {
        let path = if filters.is_empty() {
            "/api/v1/repositories"
        } else {
            "/api/beta/repositories"
        };

        let mut url = self.base.join(path)?;
        if !filters.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for filter in filters {
                let _ = pairs.append_pair(&filter.query_key(), &filter.value);
            }
        }
        Ok(url)
    }

    /// The detail endpoint for a bare identifier token.
    pub fn detail(&self, id: &str) -> crate::Result<Url> {
        Ok(self.base.join("/api/v1/repository/")?.join(id)?)
    }

    /// Resolve a link taken verbatim from a listing response, which may be
    /// absolute or relative to the registry base.
    pub fn resolve(&self, href: &str) -> crate::Result<Url> {
        self.base.join(href).into_app_err_with(|| format!("invalid detail link `{href}`"))
    }
}

/// One discovered catalog entry: its detail URL, plus the identifier token
/// when the listing carried one.
#[derive(Debug, Clone)]
pub struct DetailRef {
    pub id: Option<String>,
    pub url: Url,
}

/// Issue the listing request and extract the sequence of detail URLs.
///
/// A transport or parse failure here is fatal for the run: with no listing
/// there is nothing to fall back to. An empty result set is valid and yields
/// an empty sequence.
pub async fn discover(client: &Client, endpoints: &Endpoints, filters: &[FacetFilter]) -> crate::Result<Vec<DetailRef>> {
    let listing_url = endpoints.listing(filters)?;
    let body = client
        .get_text(&listing_url)
        .await
        .into_app_err("listing request failed")?;
    let document = Document::parse(&body).into_app_err("listing response is not parseable XML")?;

    let entry_path = FieldPath::parse("repository")?;

    let mut refs = Vec::new();
    for entry in document.select(&entry_path) {
        let id = entry
            .children_named("id")
            .first()
            .map(|e| e.text().to_string())
            .filter(|id| !id.is_empty());

        let href = entry
            .children_named("link")
            .iter()
            .find_map(|link| link.attribute("href"))
            .map(str::to_string);

        // Prefer the ready-made link; fall back to interpolating the bare
        // identifier into the detail URL template.
        let url = match (&href, &id) {
            (Some(href), _) => endpoints.resolve(href)?,
            (None, Some(id)) => endpoints.detail(id)?,
            (None, None) => {
                log::warn!("listing entry with neither id nor link, skipping");
                continue;
            }
        };

        refs.push(DetailRef { id, url });
    }

    log::info!("discovered {} detail URL(s)", refs.len());
    Ok(refs)
}
