//! CLI argument parsing and command handling

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::DatasetCache;
use crate::config::Config;
use crate::error::Error;
use crate::formatter::{ReportFormat, ReportFormatter};
use crate::models::Bundle;
use crate::output;
use crate::search::{Matcher, SearchFilter};
use crate::source::HttpSource;

/// atk: look up MITRE ATT&CK entries by name
#[derive(Parser, Debug)]
#[command(
    name = "atk",
    version,
    about = "Search MITRE ATT&CK object names and print their canonical URLs",
    long_about = "Searches the MITRE ATT&CK enterprise dataset for objects whose name matches \
                  a case-insensitive regular expression and prints each match with its \
                  attack.mitre.org URL, sorted by name.\n\n\
                  The dataset is downloaded on first use and cached in a local JSON file."
)]
pub struct Cli {
    /// Needle to search. Case-insensitive; interpreted as a regular expression
    ///
    /// Examples:
    ///   atk -s phish              → Phishing, Spearphishing Attachment, ...
    ///   atk -s "^apt2[89]$"       → APT28, APT29
    #[arg(short, long, value_name = "TERM")]
    pub search: Option<String>,

    /// Location of the cached JSON dataset (default: attack.json)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Download the dataset from this URL instead of the mitre/cti repository
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Only match objects of this STIX type (e.g. attack-pattern, intrusion-set, malware)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub object_type: Option<String>,

    /// Skip revoked and deprecated objects
    #[arg(long)]
    pub skip_revoked: bool,

    /// Re-download the dataset even if the cache file exists
    #[arg(long)]
    pub refresh: bool,

    /// Output results as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output (only with --json)
    #[arg(long)]
    pub pretty: bool,

    /// Only print the number of matches
    #[arg(short, long)]
    pub count: bool,

    /// Delete the cached dataset file and exit without searching
    #[arg(long, conflicts_with = "refresh")]
    pub clear_cache: bool,

    /// Use plain text output (disable colors)
    #[arg(long)]
    pub plain: bool,

    /// Enable verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Execute the lookup
    pub fn execute(self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .try_init()
            .ok();

        let stdout = std::io::stdout();
        self.run(&mut stdout.lock())
    }

    /// Run the lookup and write the report to `out`
    pub fn run(&self, out: &mut impl Write) -> Result<()> {
        if self.clear_cache {
            return self.remove_cached_dataset();
        }

        let term = self.search_term()?;

        // Reject bad patterns before touching the network
        let matcher = Matcher::new(term)?;

        if self.pretty_ignored() {
            output::warn("--pretty has no effect without --json");
        }

        let config = Config::load().context("Failed to load configuration")?;
        let settings = self.resolve(config);

        let bytes = fetch_dataset(&settings, self.refresh)?;
        let bundle = Bundle::from_slice(&bytes)
            .with_context(|| format!("Failed to parse {}", settings.cache_file.display()))?;

        let filter = SearchFilter {
            object_type: self.object_type.clone(),
            skip_revoked: self.skip_revoked,
        };
        let records = matcher.extract(&bundle.objects, &filter);
        log::info!("Found {} matches for '{}'", records.len(), term);

        let formatter = ReportFormatter::new(self.report_format(), output::colors_enabled(self.plain));
        formatter.write_report(&records, out)
    }

    /// Remove the cached dataset file named by the config and flags
    fn remove_cached_dataset(&self) -> Result<()> {
        let config = Config::load().context("Failed to load configuration")?;
        let settings = self.resolve(config);
        let cache = DatasetCache::new(&settings.cache_file);

        if cache.exists() {
            cache.clear()?;
            output::info(&format!("Removed {}", cache.path().display()));
        } else {
            output::info(&format!("No cached dataset at {}", cache.path().display()));
        }
        Ok(())
    }

    /// The search term, rejecting a missing or empty value
    pub fn search_term(&self) -> Result<&str, Error> {
        match self.search.as_deref() {
            Some(term) if !term.is_empty() => Ok(term),
            _ => Err(Error::Configuration(
                "You must provide a search parameter (--search <TERM>).".to_string(),
            )),
        }
    }

    /// Layer command-line overrides on top of the loaded config
    pub fn resolve(&self, mut config: Config) -> Config {
        if let Some(ref file) = self.file {
            config.cache_file = file.clone();
        }
        if let Some(ref url) = self.url {
            config.dataset_url = url.clone();
        }
        config
    }

    /// `--pretty` only shapes JSON output
    pub fn pretty_ignored(&self) -> bool {
        self.pretty && !matches!(self.report_format(), ReportFormat::Json { .. })
    }

    pub fn report_format(&self) -> ReportFormat {
        if self.count {
            ReportFormat::Count
        } else if self.json {
            ReportFormat::Json { pretty: self.pretty }
        } else {
            ReportFormat::Text
        }
    }
}

/// Read the cached dataset, downloading it when missing or when `refresh` is set
fn fetch_dataset(config: &Config, refresh: bool) -> Result<Vec<u8>> {
    let cache = DatasetCache::new(&config.cache_file);
    let source = HttpSource::new(&config.dataset_url, Duration::from_secs(config.timeout_secs))?
        .with_progress(output::stderr_is_tty());

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let bytes = runtime.block_on(async {
        if refresh {
            cache.refresh(&source).await
        } else {
            cache.load_or_fetch(&source).await
        }
    })?;

    Ok(bytes)
}
