//! The `apis` command: one row per repository API endpoint.

use super::Host;
use super::common::CommonArgs;
use crate::registry::{FacetFilter, FanOutSpec, FieldSpec, Multiplicity, Spec};
use crate::table::Table;
use clap::Args;

/// Arguments for the apis command
#[derive(Args, Debug)]
pub struct ApisArgs {
    /// Narrow the harvest with a facet filter; may be repeated
    #[arg(long, value_name = "KEY=VALUE")]
    pub filter: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Build the extraction spec for the API-aggregation use case.
///
/// The fan-out happens at extraction time: a repository exposing N APIs
/// contributes N records, and one exposing none contributes no record at all.
fn spec() -> crate::Result<Spec> {
    Ok(Spec::new("re3data_id", "repository/re3data.orgIdentifier")?
        .field(FieldSpec::new("name", "repository/repositoryName", Multiplicity::Single)?)
        .field(FieldSpec::new("url", "repository/repositoryURL", Multiplicity::Single)?)
        .fan_out(FanOutSpec::new("repository/api", "api", "apiType", "api_type")?))
}

/// Harvest repository API endpoints, one row per (repository, API) pair.
pub async fn harvest_apis<H: Host>(host: &mut H, args: &ApisArgs) -> crate::Result<()> {
    let filters = args
        .filter
        .iter()
        .map(|pair| FacetFilter::parse(pair))
        .collect::<crate::Result<Vec<_>>>()?;

    let harvester = args.common.harvester()?;
    let spec = spec()?;

    let outcome = harvester.harvest(&filters, &spec).await?;

    let mut table = Table::from_records(spec.columns(), &outcome.records);
    table.normalize_missing();

    args.common.report(host, &table, "api_type", &outcome.failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_columns() {
        let spec = spec().unwrap();
        assert_eq!(spec.columns(), ["re3data_id", "name", "url", "api", "api_type"]);
    }
}
