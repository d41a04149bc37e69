use std::path::PathBuf;

use anyhow::{Context as AnyhowContext, Result};
use clap::{CommandFactory, Parser};

use crate::config::Config;
use crate::output::Placeholders;

#[derive(Parser, Debug)]
#[command(name = "tesls")]
#[command(version, about = "List the Go test functions declared in a set of packages", long_about = None)]
pub struct Args {
    /// Packages to list: relative or absolute directories, or import paths.
    /// A trailing `/...` includes every directory below.
    #[arg(value_name = "PACKAGES")]
    pub packages: Vec<String>,

    /// `json`, or a line template (default "%P.%T %F")
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Placeholder dialect of the line template
    #[arg(long, value_enum)]
    pub placeholders: Option<Placeholders>,

    /// Align template fields into tab-separated columns
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub tabs: Option<bool>,

    /// Scan directories in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Target operating system for build constraints
    #[arg(long, value_name = "GOOS")]
    pub goos: Option<String>,

    /// Target architecture for build constraints
    #[arg(long, value_name = "GOARCH")]
    pub goarch: Option<String>,

    /// Extra build tags, comma separated
    #[arg(long, value_name = "TAGS", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Config file (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Defaults, then the config file, then the flags given on the command line.
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Invalid config file: {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(format) = &self.format {
            config.format = Some(format.clone());
        }
        if let Some(placeholders) = self.placeholders {
            config.placeholders = placeholders;
        }
        if let Some(tabs) = self.tabs {
            config.tabs = tabs;
        }
        if self.parallel {
            config.parallel = true;
        }
        if let Some(goos) = &self.goos {
            config.goos = goos.clone();
        }
        if let Some(goarch) = &self.goarch {
            config.goarch = goarch.clone();
        }
        if !self.tags.is_empty() {
            config.tags = self.tags.clone();
        }
        Ok(config)
    }
}

pub fn usage() -> String {
    Args::command().render_help().to_string()
}
