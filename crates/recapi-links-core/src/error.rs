/// Error types for template expansion and link resolution
use thiserror::Error;

/// Errors raised while parsing or expanding a URI template.
///
/// These are configuration/programmer errors, so they propagate as-is
/// instead of being folded into field-keyed validation messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("missing template variable: {0}")]
    MissingVariable(String),

    #[error("unsupported template expression: {{{0}}}")]
    UnsupportedExpression(String),

    #[error("variable '{0}' holds a nested value and cannot be expanded in this position")]
    NestedValue(String),
}

/// Errors raised by the link store during resolution.
#[derive(Debug, Error)]
pub enum LinksError {
    #[error("links configuration is empty")]
    MissingConfig,

    #[error("unknown links namespace: {0}")]
    UnknownNamespace(String),

    #[error("no template for link '{key}' in namespace '{namespace}'")]
    UnknownLinkKey { namespace: String, key: String },

    #[error(transparent)]
    Template(#[from] TemplateError),
}
