//! Format templates for rendering records
//!
//! A template is plain text with `{placeholder}` fields. Supported fields:
//! `timestamp`, `name`, `level`, `message`, `target`, `file` and `line`.
//! Literal braces are written as `{{` and `}}`.

use crate::{Error, Record, Result};
use chrono::Local;
use std::fmt::Write;

/// Local time with millisecond precision, e.g. `2024-03-09 14:05:07,250`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Timestamp,
    Name,
    Level,
    Message,
    Target,
    File,
    Line,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "timestamp" => Some(Self::Timestamp),
            "name" => Some(Self::Name),
            "level" => Some(Self::Level),
            "message" => Some(Self::Message),
            "target" => Some(Self::Target),
            "file" => Some(Self::File),
            "line" => Some(Self::Line),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// A parsed format template, shared by every sink of a logger
#[derive(Debug, Clone)]
pub struct Formatter {
    template: String,
    segments: Vec<Segment>,
}

impl Formatter {
    /// Parse a template
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        let segments = parse(&template)?;
        Ok(Self { template, segments })
    }

    /// The source template
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render a record without a trailing newline
    pub fn format(&self, record: &Record<'_>) -> String {
        let mut out = String::with_capacity(self.template.len() + record.message.len() + 32);

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(Field::Timestamp) => {
                    let local = record.timestamp.with_timezone(&Local);
                    let _ = write!(out, "{}", local.format(TIMESTAMP_FORMAT));
                }
                Segment::Field(Field::Name) => out.push_str(record.logger.unwrap_or(record.target)),
                Segment::Field(Field::Level) => out.push_str(record.level.as_str()),
                Segment::Field(Field::Message) => out.push_str(&record.message),
                Segment::Field(Field::Target) => out.push_str(record.target),
                Segment::Field(Field::File) => out.push_str(record.file.unwrap_or("")),
                Segment::Field(Field::Line) => {
                    if let Some(line) = record.line {
                        let _ = write!(out, "{line}");
                    }
                }
            }
        }

        out
    }
}

fn parse(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                literal.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(Error::UnterminatedPlaceholder(pos));
                }
                let field =
                    Field::parse(name.trim()).ok_or_else(|| Error::UnknownPlaceholder(name))?;
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Field(field));
            }
            '}' => return Err(Error::UnmatchedBrace(pos)),
            _ => literal.push(ch),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}
