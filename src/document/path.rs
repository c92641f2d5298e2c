//! Key path parsing
//!
//! A key path addresses exactly one node in a YAML document:
//! `data.config\.yaml` or `spec.templates[0].resource.manifest`.
//! Segments are split on unescaped dots; `[N]` indexes into a sequence.

use std::fmt;
use std::str::FromStr;

use crate::error::PathError;

/// One step of a key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "key '{}'", key),
            Segment::Index(index) => write!(f, "index [{}]", index),
        }
    }
}

/// A parsed key path into a structured document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PatchTarget {
    segments: Vec<Segment>,
}

impl PatchTarget {
    /// The path addressing the document root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parse(input: &str) -> Result<Self, PathError> {
        let syntax = |reason: &str| PathError::Syntax {
            path: input.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut key = String::new();
        let mut after_index = false;
        let mut chars = input.chars().peekable();
        let mut at_start = true;

        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    if after_index {
                        return Err(syntax("expected '.' or '[' after index"));
                    }
                    match chars.next() {
                        Some(escaped) => key.push(escaped),
                        None => return Err(syntax("trailing escape character")),
                    }
                }
                '.' => {
                    if key.is_empty() && !after_index {
                        return Err(syntax("empty key segment"));
                    }
                    if !key.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut key)));
                    }
                    after_index = false;
                    // A dot always has to be followed by a key.
                    if chars.peek().is_none() {
                        return Err(syntax("empty key segment"));
                    }
                    if chars.peek() == Some(&'[') {
                        return Err(syntax("index must follow a key, not a '.'"));
                    }
                }
                '[' => {
                    if key.is_empty() && !after_index && !at_start {
                        return Err(syntax("index must follow a key"));
                    }
                    if !key.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut key)));
                    }
                    let mut digits = String::new();
                    let mut closed = false;
                    for d in chars.by_ref() {
                        if d == ']' {
                            closed = true;
                            break;
                        }
                        digits.push(d);
                    }
                    if !closed {
                        return Err(syntax("unterminated '['"));
                    }
                    if digits.is_empty() || !digits.chars().all(|d| d.is_ascii_digit()) {
                        return Err(syntax("index must be a non-negative integer"));
                    }
                    let index = digits.parse::<usize>().map_err(|_| syntax("index too large"))?;
                    segments.push(Segment::Index(index));
                    after_index = true;
                }
                other => {
                    if after_index {
                        return Err(syntax("expected '.' or '[' after index"));
                    }
                    key.push(other);
                }
            }
            at_start = false;
        }

        if !key.is_empty() {
            segments.push(Segment::Key(key));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Render the first `len` segments, used to point at where resolution failed.
    pub fn prefix(&self, len: usize) -> String {
        render(&self.segments[..len.min(self.segments.len())])
    }
}

fn render(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return "<root>".to_string();
    }
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Key(key) => {
                if i > 0 {
                    out.push('.');
                }
                for c in key.chars() {
                    if matches!(c, '.' | '\\' | '[') {
                        out.push('\\');
                    }
                    out.push(c);
                }
            }
            Segment::Index(index) => {
                out.push_str(&format!("[{}]", index));
            }
        }
    }
    out
}

impl fmt::Display for PatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return Ok(());
        }
        f.write_str(&render(&self.segments))
    }
}

impl FromStr for PatchTarget {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
