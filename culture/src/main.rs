use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use url_culture::config::Config;
use url_culture::services::{
    self, CultureSlot, CultureStore, ResolutionConfig, ResolutionMode, url_parser,
};
use url_culture::utils::{init_logging, with_bootstrap_logging};
use url_culture::Culture;

/// Inspect and rewrite culture prefixes in URLs
#[derive(Parser, Debug)]
#[command(name = "url-culture")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    policy: PolicyArgs,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct PolicyArgs {
    /// Path to a config.toml (defaults to conf/config.toml or ./config.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Default culture, overrides the configured one
    #[arg(long, global = true)]
    default_culture: Option<Culture>,

    /// Leave the default culture out of URLs (`--exclude-default=false` turns it off)
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    exclude_default: Option<bool>,

    /// Fail instead of resolving to no culture when inputs are missing
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the culture, language and region prefixed to a URL
    Extract { url: String },
    /// Remove the culture prefix from a URL
    Strip {
        url: String,
        /// Keep the query string
        #[arg(long)]
        with_query: bool,
    },
    /// Prefix a culture to a URL
    Prefix { url: String, culture: Culture },
    /// Resolve the culture for a request to URL
    Resolve {
        url: String,
        /// Culture already stored for the request
        #[arg(long)]
        stored: Option<Culture>,
    },
    /// Build a link to URL for a culture, honoring the default-culture policy
    Localize { url: String, culture: Option<Culture> },
}

#[derive(Debug, Serialize)]
struct Report {
    url: String,
    culture: Option<Culture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<ResolutionMode>,
}

impl Report {
    fn for_culture(url: &str, culture: Option<Culture>) -> Self {
        Self {
            url: url.to_string(),
            language: culture.as_ref().map(|c| c.language().to_string()),
            region: culture.as_ref().map(|c| c.region().to_string()),
            culture,
            path: None,
            mode: None,
        }
    }

    fn for_path(url: &str, path: String) -> Self {
        Self {
            url: url.to_string(),
            culture: None,
            language: None,
            region: None,
            path: Some(path),
            mode: None,
        }
    }

    fn print(&self, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(self)?);
        } else if let Some(path) = &self.path {
            println!("{}", path);
        } else {
            match &self.culture {
                Some(culture) => println!("{}", culture),
                None => println!("(none)"),
            }
        }
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = with_bootstrap_logging(|| Config::load(cli.policy.config.as_deref()))?;
    let _guard = init_logging(&config.logging)?;

    let resolution = resolution_config(&config, &cli.policy);
    tracing::debug!("Resolution config: {:?}", resolution);

    let report = match cli.command {
        Command::Extract { url } => Report::for_culture(&url, url_parser::extract_culture(&url)),
        Command::Strip { url, with_query } => {
            let path = url_parser::strip_culture(&url, with_query);
            Report::for_path(&url, path)
        },
        Command::Prefix { url, culture } => {
            let path = url_parser::prefix_culture(&url, &culture);
            Report::for_path(&url, path)
        },
        Command::Resolve { url, stored } => {
            let mut slot = CultureSlot::new();
            slot.set(stored);
            let culture = services::resolve(&url, &resolution, Some(&mut slot))?;
            let mut report = Report::for_culture(&url, culture);
            report.mode = Some(resolution.mode);
            report
        },
        Command::Localize { url, culture } => {
            let path = services::localize_url(&url, culture.as_ref(), &resolution);
            Report::for_path(&url, path)
        },
    };

    report.print(cli.json)
}

/// Command line flags take precedence over the loaded configuration
fn resolution_config(config: &Config, policy: &PolicyArgs) -> ResolutionConfig {
    let mut resolution = config.resolution();
    if let Some(culture) = &policy.default_culture {
        resolution.default_culture = Some(culture.clone());
    }
    if let Some(exclude) = policy.exclude_default {
        resolution.exclude_default_from_url = exclude;
    }
    if policy.strict {
        resolution.mode = ResolutionMode::Strict;
    }
    resolution
}
