//! The `certificates` command: repository types vs. certification status.

use super::Host;
use super::common::CommonArgs;
use crate::registry::{FieldSpec, Multiplicity, Spec};
use crate::table::Table;
use clap::Args;

/// Arguments for the certificates command
#[derive(Args, Debug)]
pub struct CertificatesArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Build the extraction spec for the certificate-by-type use case.
fn spec() -> crate::Result<Spec> {
    Ok(Spec::new("re3data_id", "repository/re3data.orgIdentifier")?
        .field(FieldSpec::new("name", "repository/repositoryName", Multiplicity::Single)?)
        .field(FieldSpec::new("type", "repository/type", Multiplicity::Joined)?)
        .field(FieldSpec::new("certificate", "repository/certificate", Multiplicity::Joined)?))
}

/// Harvest every repository and tabulate type against certification presence,
/// one row per (repository, type) pair.
pub async fn harvest_certificates<H: Host>(host: &mut H, args: &CertificatesArgs) -> crate::Result<()> {
    let harvester = args.common.harvester()?;
    let spec = spec()?;

    let outcome = harvester.harvest(&[], &spec).await?;

    let mut table = Table::from_records(spec.columns(), &outcome.records);
    table.normalize_missing();
    table.derive_presence("certificate", "has_certificate")?;
    table.explode("type")?;

    args.common.report(host, &table, "type", &outcome.failures)
}
