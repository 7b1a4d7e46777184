//! The `subjects` command: subject-filtered harvests, one row per subject
//! classification. The ESS and medical analyses are both instances of this
//! command with different facet filters.

use super::Host;
use super::common::CommonArgs;
use crate::registry::{FacetFilter, FieldSpec, Multiplicity, Spec};
use crate::table::Table;
use clap::Args;

/// Arguments for the subjects command
#[derive(Args, Debug)]
pub struct SubjectsArgs {
    /// Subject classification to filter by (controlled vocabulary term,
    /// e.g. "205 Medicine"); may be repeated
    #[arg(long, value_name = "SUBJECT")]
    pub subject: Vec<String>,

    /// Additional facet filter; may be repeated
    #[arg(long, value_name = "KEY=VALUE")]
    pub filter: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl SubjectsArgs {
    fn filters(&self) -> crate::Result<Vec<FacetFilter>> {
        let mut filters: Vec<FacetFilter> = self
            .subject
            .iter()
            .map(|subject| FacetFilter::new("subjects", subject))
            .collect();

        for pair in &self.filter {
            filters.push(FacetFilter::parse(pair)?);
        }

        Ok(filters)
    }
}

/// Build the extraction spec for the subject-aggregation use cases.
fn spec() -> crate::Result<Spec> {
    Ok(Spec::new("re3data_id", "repository/re3data.orgIdentifier")?
        .field(FieldSpec::new("name", "repository/repositoryName", Multiplicity::Single)?)
        .field(FieldSpec::new("url", "repository/repositoryURL", Multiplicity::Single)?)
        .field(FieldSpec::new("subject", "repository/subject", Multiplicity::Joined)?))
}

/// Harvest subject-filtered repositories, one row per (repository, subject) pair.
pub async fn harvest_subjects<H: Host>(host: &mut H, args: &SubjectsArgs) -> crate::Result<()> {
    let filters = args.filters()?;
    let harvester = args.common.harvester()?;
    let spec = spec()?;

    let outcome = harvester.harvest(&filters, &spec).await?;

    let mut table = Table::from_records(spec.columns(), &outcome.records);
    table.normalize_missing();
    table.explode("subject")?;

    args.common.report(host, &table, "subject", &outcome.failures)
}
