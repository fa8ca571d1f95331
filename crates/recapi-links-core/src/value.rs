/// Variable bindings for template expansion
use serde_json::Value;

use crate::error::TemplateError;

/// A flat set of template variable bindings.
///
/// Values may be scalars, lists (repeated querystring keys) or nested
/// mappings (exploded querystring parameters).
pub type VariableSet = serde_json::Map<String, Value>;

/// Renders a scalar binding into its textual form.
///
/// Returns `Ok(None)` for null values (they contribute nothing to the
/// expansion) and an error for lists/mappings, which are only legal under
/// an exploded query operator.
pub(crate) fn scalar_text(name: &str, value: &Value) -> Result<Option<String>, TemplateError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(TemplateError::NestedValue(name.to_string())),
    }
}
