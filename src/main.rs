//! A tool to harvest and tabulate repository metadata from the re3data registry.
//!
//! # Overview
//!
//! `re3harvest` queries the [re3data](https://www.re3data.org) registry of research-data
//! repositories, fetches the XML detail record of every matching repository, extracts a
//! configurable set of fields, and reshapes the results into a flat table suitable for
//! analysis. The table can be written to a CSV file or summarized on the console as a
//! frequency bar chart.
//!
//! # Quick Start
//!
//! Tabulate repository types together with certification status:
//!
//! ```bash
//! re3harvest certificates --csv certificates.csv
//! ```
//!
//! List every API endpoint the registry knows about, one row per API:
//!
//! ```bash
//! re3harvest apis --csv apis.csv
//! ```
//!
//! Aggregate repositories for a subject area, one row per subject classification:
//!
//! ```bash
//! re3harvest subjects --subject "205 Medicine" --csv medicine.csv
//! ```
//!
//! # Output
//!
//! Every harvested row carries the stable re3data identifier of the originating
//! repository, so exploded multi-value columns can always be de-duplicated or re-grouped
//! downstream. Empty fields are written as the explicit marker `NA`.
//!
//! When no `--csv` file is requested, the tool prints a frequency summary of the
//! most interesting column of the selected harvest to the console instead.

use re3harvest::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that writes to the real process streams.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }
}

#[tokio::main]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
