/// URI template parsing and expansion
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::TemplateError;
use crate::value::{scalar_text, VariableSet};

/// One parsed piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `{var}` - simple expansion, missing binding is an error
    Simple(String),
    /// `{/var}` - path segment, empty when missing
    Path(String),
    /// `{?var}` / `{?var*}` / `{&var}` / `{&var*}` - query expansion
    Query {
        name: String,
        explode: bool,
        continuation: bool,
    },
}

/// An immutable URI template with named placeholders.
///
/// Supports the expression subset used by link configurations: `{var}`,
/// `{/var}`, `{?var}`, `{?var*}`, `{&var}` and `{&var*}`. The template is
/// parsed and validated eagerly, so a malformed template fails at
/// construction rather than at resolution time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LinkTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl LinkTemplate {
    /// Parses a template string, validating every expression.
    pub fn new(template: impl Into<String>) -> Result<Self, TemplateError> {
        let raw = template.into();
        let segments = parse(&raw)?;
        Ok(Self { raw, segments })
    }

    /// The original template string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Expands the template against a set of variable bindings.
    ///
    /// An empty variable set is valid and yields the un-parameterized path.
    /// Query expansion emits pairs in sorted-key order for exploded
    /// mappings, with list values becoming repeated pairs in list order, so
    /// the rendered querystring is deterministic regardless of input
    /// mapping iteration order.
    pub fn expand(&self, vars: &VariableSet) -> Result<String, TemplateError> {
        let mut out = String::new();
        let mut query_started = false;

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Simple(name) => {
                    let value = vars
                        .get(name)
                        .ok_or_else(|| TemplateError::MissingVariable(name.clone()))?;
                    if let Some(text) = scalar_text(name, value)? {
                        out.push_str(&encode(&text));
                    }
                }
                Segment::Path(name) => {
                    if let Some(value) = vars.get(name) {
                        if let Some(text) = scalar_text(name, value)? {
                            out.push('/');
                            out.push_str(&encode(&text));
                        }
                    }
                }
                Segment::Query {
                    name,
                    explode,
                    continuation,
                } => {
                    for (key, text) in query_pairs(name, *explode, vars)? {
                        let sep = if *continuation || query_started { '&' } else { '?' };
                        out.push(sep);
                        out.push_str(&encode(&key));
                        out.push('=');
                        out.push_str(&encode(&text));
                        query_started = true;
                    }
                }
            }
        }

        Ok(out)
    }
}

impl PartialEq for LinkTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for LinkTemplate {}

impl fmt::Display for LinkTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl TryFrom<String> for LinkTemplate {
    type Error = TemplateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LinkTemplate> for String {
    fn from(template: LinkTemplate) -> Self {
        template.raw
    }
}

/// Joins a scheme/host prefix with an expanded path.
///
/// Without a host the bare path is returned, supporting relative-URL
/// deployments. With a host the path must start with `/` - violating that
/// is a programming error in the template configuration, not a recoverable
/// condition.
pub fn assemble_url(scheme: &str, host: Option<&str>, path: &str) -> String {
    match host {
        None => path.to_string(),
        Some(host) => {
            assert!(
                path.starts_with('/'),
                "link path must start with '/' when a host is configured: {path}"
            );
            format!("{scheme}://{host}{path}")
        }
    }
}

fn parse(raw: &str) -> Result<Vec<Segment>, TemplateError> {
    let expression = Regex::new(r"\{([?&/])?([A-Za-z0-9_]+)(\*)?\}").expect("valid regex");
    let mut segments = Vec::new();
    let mut cursor = 0;

    for captures in expression.captures_iter(raw) {
        let matched = captures.get(0).expect("capture 0 always present");
        let literal = &raw[cursor..matched.start()];
        push_literal(&mut segments, literal)?;
        cursor = matched.end();

        let operator = captures.get(1).map(|m| m.as_str());
        let name = captures[2].to_string();
        let explode = captures.get(3).is_some();

        let segment = match operator {
            Some("?") => Segment::Query {
                name,
                explode,
                continuation: false,
            },
            Some("&") => Segment::Query {
                name,
                explode,
                continuation: true,
            },
            Some("/") if !explode => Segment::Path(name),
            None if !explode => Segment::Simple(name),
            _ => {
                let inner = &matched.as_str()[1..matched.as_str().len() - 1];
                return Err(TemplateError::UnsupportedExpression(inner.to_string()));
            }
        };
        segments.push(segment);
    }

    push_literal(&mut segments, &raw[cursor..])?;
    Ok(segments)
}

fn push_literal(segments: &mut Vec<Segment>, literal: &str) -> Result<(), TemplateError> {
    // A brace surviving expression matching means a malformed expression.
    if let Some(start) = literal.find(['{', '}']) {
        return Err(TemplateError::UnsupportedExpression(
            literal[start..].trim_matches(['{', '}']).to_string(),
        ));
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal.to_string()));
    }
    Ok(())
}

/// Collects the `(key, value)` pairs a query expression contributes.
fn query_pairs(
    name: &str,
    explode: bool,
    vars: &VariableSet,
) -> Result<Vec<(String, String)>, TemplateError> {
    let Some(value) = vars.get(name) else {
        return Ok(Vec::new());
    };

    let mut pairs = Vec::new();
    match value {
        Value::Object(map) if explode => {
            // Sorted-by-key emission keeps querystrings reproducible no
            // matter how the producer assembled the mapping.
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (key, entry) in entries {
                push_pairs(&mut pairs, key, entry)?;
            }
        }
        Value::Object(_) => return Err(TemplateError::NestedValue(name.to_string())),
        other => push_pairs(&mut pairs, name, other)?,
    }
    Ok(pairs)
}

fn push_pairs(
    pairs: &mut Vec<(String, String)>,
    key: &str,
    value: &Value,
) -> Result<(), TemplateError> {
    match value {
        Value::Array(items) => {
            for item in items {
                if let Some(text) = scalar_text(key, item)? {
                    pairs.push((key.to_string(), text));
                }
            }
        }
        other => {
            if let Some(text) = scalar_text(key, other)? {
                pairs.push((key.to_string(), text));
            }
        }
    }
    Ok(())
}

/// Percent-encodes everything outside the unreserved set.
fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
