use std::io::Write;

use tracing::debug;

use crate::config::Config;
use crate::error::{FormatError, Result};
use crate::scanner::TestEntity;

use super::tabwriter::TabWriter;
use super::template::{Placeholders, Template};

/// Format value that selects structured output instead of a template.
pub const JSON_FORMAT: &str = "json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSpec {
    Json,
    Template(Template),
}

impl FormatSpec {
    /// An empty `raw` falls back to the dialect's default template. With
    /// `tabs` the template's whitespace-separated fields become tab cells.
    pub fn parse(raw: &str, placeholders: Placeholders, tabs: bool) -> Result<Self> {
        if raw == JSON_FORMAT {
            return Ok(FormatSpec::Json);
        }

        let source = if raw.is_empty() {
            placeholders.default_template()
        } else {
            raw
        };

        let template = if tabs {
            let fields: Vec<&str> = source.split_whitespace().collect();
            Template::parse(&fields.join("\t"), placeholders)?
        } else {
            Template::parse(source, placeholders)?
        };
        Ok(FormatSpec::Template(template))
    }
}

pub struct OutputFormatter {
    spec: FormatSpec,
    tabs: bool,
}

impl OutputFormatter {
    pub fn new(spec: FormatSpec, tabs: bool) -> Self {
        Self { spec, tabs }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let raw = config.format.as_deref().unwrap_or_default();
        let spec = FormatSpec::parse(raw, config.placeholders, config.tabs)?;
        Ok(Self::new(spec, config.tabs))
    }

    pub fn spec(&self) -> &FormatSpec {
        &self.spec
    }

    /// Renders the whole listing in memory. Nothing is written on error.
    pub fn format(&self, tests: &[TestEntity]) -> Result<String> {
        match &self.spec {
            FormatSpec::Json => {
                let mut out = serde_json::to_string(tests).map_err(FormatError::from)?;
                out.push('\n');
                Ok(out)
            }
            FormatSpec::Template(template) => {
                let mut out = String::new();
                for test in tests {
                    out.push_str(&template.render(test));
                    out.push('\n');
                }
                Ok(out)
            }
        }
    }

    pub fn write<W: Write>(&self, tests: &[TestEntity], mut out: W) -> Result<()> {
        let rendered = self.format(tests)?;
        debug!(count = tests.len(), tabs = self.tabs, "writing listing");

        match &self.spec {
            FormatSpec::Template(_) if self.tabs => {
                let mut tw = TabWriter::new(out);
                tw.write_all(rendered.as_bytes())?;
                tw.flush()?;
            }
            _ => {
                out.write_all(rendered.as_bytes())?;
                out.flush()?;
            }
        }
        Ok(())
    }
}
