//! Common processing logic shared between the harvest commands.

use super::Host;
use super::ProgressReporter;
use crate::registry::{Client, Endpoints, Failure, Harvester};
use crate::table::{Table, render_value_counts, write_csv};
use camino::Utf8PathBuf;
use clap::Args;
use clap::ValueEnum;
use core::time::Duration;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

/// Registry the tool talks to unless told otherwise.
const DEFAULT_BASE_URL: &str = "https://www.re3data.org";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Common arguments shared between the harvest commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Base URL of the registry
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL, env = "RE3HARVEST_BASE_URL")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    pub timeout: u64,

    /// Write the harvested table to a CSV file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Suppress the console frequency summary
    #[arg(long, help_heading = "Report Output")]
    pub no_summary: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

impl CommonArgs {
    /// Initialize logging and build the harvester for this invocation.
    pub fn harvester(&self) -> crate::Result<Harvester> {
        init_logging(self.log_level);

        let client = Client::new(Duration::from_secs(self.timeout))?;
        let endpoints = Endpoints::new(&self.base_url)?;
        let progress = ProgressReporter::new(Duration::from_millis(300));

        Ok(Harvester::new(client, endpoints, progress))
    }

    fn use_colors(&self) -> bool {
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            }
        }
    }

    /// Emit the normalized table: CSV file if requested, console frequency
    /// summary of `summary_column` otherwise (or additionally, unless
    /// suppressed), plus the skipped-item report on the error stream.
    pub fn report<H: Host>(&self, host: &mut H, table: &Table, summary_column: &str, failures: &[Failure]) -> crate::Result<()> {
        if !failures.is_empty() {
            let mut error = host.error();
            let _ = writeln!(error, "\nSkipped {} item(s):", failures.len());
            for failure in failures {
                let _ = writeln!(error, "  {}: {:#}", failure.url, failure.error);
            }
        }

        if let Some(path) = &self.csv {
            let file = fs::File::create(path).into_app_err_with(|| format!("unable to create `{path}`"))?;
            write_csv(table, file)?;
            log::info!("wrote {} row(s) to {path}", table.rows().len());
        }

        if !self.no_summary {
            let counts = table.value_counts(summary_column)?;
            let title = format!("{} ({} rows)", summary_column, table.rows().len());
            let mut summary = String::new();
            render_value_counts(&title, &counts, self.use_colors(), &mut summary)?;
            let _ = write!(host.output(), "{summary}");
        }

        Ok(())
    }
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .init();
}
