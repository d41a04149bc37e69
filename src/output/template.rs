//! Line templates with two placeholder dialects.
//!
//! `percent`: `%T` test name, `%P` package, `%F` file.
//! `braces`: `{{.Name}}`, `{{.Pkg}}`, `{{.File}}`, whitespace allowed inside
//! the braces. Anything else is copied through unchanged.

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::FormatError;
use crate::scanner::TestEntity;

const ACTION_OPEN: &str = "{{";
const ACTION_CLOSE: &str = "}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placeholders {
    #[default]
    Percent,
    Braces,
}

impl Placeholders {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placeholders::Percent => "percent",
            Placeholders::Braces => "braces",
        }
    }

    pub fn default_template(&self) -> &'static str {
        match self {
            Placeholders::Percent => "%P.%T %F",
            Placeholders::Braces => "{{.Pkg}}.{{.Name}} {{.File}}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
    Package,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str, placeholders: Placeholders) -> Result<Self, FormatError> {
        let segments = match placeholders {
            Placeholders::Percent => parse_percent(source),
            Placeholders::Braces => parse_braces(source)?,
        };
        Ok(Self { segments })
    }

    pub fn render(&self, test: &TestEntity) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Name => out.push_str(test.name()),
                Segment::Package => out.push_str(test.package()),
                Segment::File => out.push_str(test.file()),
            }
        }
        out
    }
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Literal(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Literal(text.to_string()));
    }
}

fn parse_percent(source: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = source.char_indices().peekable();
    let mut literal_start = 0;

    while let Some((idx, c)) = chars.next() {
        if c != '%' {
            continue;
        }
        let segment = match chars.peek().map(|&(_, next)| next) {
            Some('T') => Some(Segment::Name),
            Some('P') => Some(Segment::Package),
            Some('F') => Some(Segment::File),
            _ => None,
        };
        if let Some(segment) = segment {
            push_literal(&mut segments, &source[literal_start..idx]);
            segments.push(segment);
            chars.next();
            literal_start = idx + 2;
        }
    }

    push_literal(&mut segments, &source[literal_start..]);
    segments
}

fn parse_braces(source: &str) -> Result<Vec<Segment>, FormatError> {
    let mut segments = Vec::new();
    let mut rest = source;
    let mut offset = 0;

    while let Some(open) = rest.find(ACTION_OPEN) {
        push_literal(&mut segments, &rest[..open]);

        let after_open = &rest[open + ACTION_OPEN.len()..];
        let close = after_open
            .find(ACTION_CLOSE)
            .ok_or_else(|| FormatError::unterminated_action(offset + open))?;

        let action = &after_open[..close];
        match action.trim() {
            ".Name" => segments.push(Segment::Name),
            ".Pkg" => segments.push(Segment::Package),
            ".File" => segments.push(Segment::File),
            _ => push_literal(
                &mut segments,
                &rest[open..open + ACTION_OPEN.len() + close + ACTION_CLOSE.len()],
            ),
        }

        let consumed = open + ACTION_OPEN.len() + close + ACTION_CLOSE.len();
        rest = &rest[consumed..];
        offset += consumed;
    }

    push_literal(&mut segments, rest);
    Ok(segments)
}
