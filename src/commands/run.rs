//! Command dispatch logic for re3harvest

use super::{ApisArgs, CertificatesArgs, SubjectsArgs, harvest_apis, harvest_certificates, harvest_subjects};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "re3harvest", version, author, long_about = None)]
#[command(about = "Harvest and tabulate repository metadata from the re3data registry")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: HarvestSubcommand,
}

#[derive(Subcommand, Debug)]
enum HarvestSubcommand {
    /// Tabulate repository types against certification status
    Certificates(CertificatesArgs),
    /// List repository API endpoints, one row per API
    Apis(ApisArgs),
    /// Aggregate repositories by subject classification
    Subjects(SubjectsArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    match &cli.command {
        HarvestSubcommand::Certificates(certificates_args) => harvest_certificates(host, certificates_args).await,
        HarvestSubcommand::Apis(apis_args) => harvest_apis(host, apis_args).await,
        HarvestSubcommand::Subjects(subjects_args) => harvest_subjects(host, subjects_args).await,
    }
}
