//! Validation helpers that turn manifest problems into located diagnostics.

use miette::{NamedSource, SourceSpan};
use scenebind_core::{is_csharp_keyword, validate_identifier};

use crate::{Error, Result};

/// Source information carried through manifest validation.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "binder.toml");
/// ctx.validate_name("buyButton", "binding")?;
/// ```
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParseContext<'a> {
    src: &'a str,
    filename: &'a str,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self { src, filename }
    }

    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename, self.src.to_string())
    }

    pub fn find_span(&self, value: &str) -> Option<SourceSpan> {
        find_value_span(self.src, value, 0)
    }

    /// Span of the second quoted occurrence of `value`.
    pub fn find_second_span(&self, value: &str) -> Option<SourceSpan> {
        find_value_span(self.src, value, 1)
    }

    /// Validate that a name can become a C# identifier.
    pub fn validate_name(&self, name: &str, context: &str) -> Result<()> {
        if is_csharp_keyword(name) {
            return Err(Box::new(Error::ReservedKeyword {
                src: self.named_source(),
                span: self.find_span(name),
                name: name.to_string(),
                context: context.to_string(),
            }));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(Box::new(Error::InvalidIdentifier {
                src: self.named_source(),
                span: self.find_span(name),
                name: name.to_string(),
                context: context.to_string(),
                reason: reason.to_string(),
            }));
        }

        Ok(())
    }

    /// Validate a scene node name. Names end up as path segments, so they
    /// cannot be empty or contain the separator.
    pub fn validate_node_name(&self, name: &str) -> Result<()> {
        let reason = if name.is_empty() {
            "node names cannot be empty"
        } else if name.contains('/') {
            "node names cannot contain '/'"
        } else {
            return Ok(());
        };

        Err(Box::new(Error::InvalidNodeName {
            src: self.named_source(),
            span: self.find_span(name),
            name: name.to_string(),
            reason: reason.to_string(),
        }))
    }
}

/// Find the `nth` (0-based) quoted occurrence of `value` in the TOML source,
/// falling back to a bare occurrence. The span excludes the quotes.
pub(crate) fn find_value_span(src: &str, value: &str, nth: usize) -> Option<SourceSpan> {
    if value.is_empty() {
        return src
            .match_indices("\"\"")
            .nth(nth)
            .map(|(pos, _)| SourceSpan::from((pos, 2)));
    }

    let quoted = format!("\"{}\"", value);
    if let Some((pos, _)) = src.match_indices(&quoted).nth(nth) {
        // +1 to skip the opening quote
        return Some(SourceSpan::from((pos + 1, value.len())));
    }

    src.match_indices(value)
        .nth(nth)
        .map(|(pos, _)| SourceSpan::from((pos, value.len())))
}
