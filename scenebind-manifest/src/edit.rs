//! Section-level editing of binder.toml.
//!
//! Edits work on the raw text so comments and formatting elsewhere in the
//! file survive.

use scenebind_core::escape_string_literal;

const BINDINGS_HEADER: &str = "[[bindings]]";

/// Build a `[[bindings]]` section.
///
/// # Examples
///
/// ```
/// use scenebind_manifest::binding_section;
///
/// assert_eq!(
///     binding_section("buyButton", Some("buy"), Some("Button")),
///     "[[bindings]]\nname = \"buyButton\"\nnode = \"buy\"\ncomponent = \"Button\"\n"
/// );
/// assert_eq!(binding_section("pending", None, None), "[[bindings]]\nname = \"pending\"\n");
/// ```
pub fn binding_section(name: &str, node: Option<&str>, component: Option<&str>) -> String {
    let mut section = format!("{}\nname = {}\n", BINDINGS_HEADER, quote(name));
    if let Some(node) = node {
        section.push_str(&format!("node = {}\n", quote(node)));
    }
    if let Some(component) = component {
        section.push_str(&format!("component = {}\n", quote(component)));
    }
    section
}

/// Append a section at the end of the document, separated by a blank line.
pub fn append_binding_section(content: &str, section: &str) -> String {
    let trimmed = content.trim_end();
    if trimmed.is_empty() {
        section.to_string()
    } else {
        format!("{}\n\n{}", trimmed, section)
    }
}

/// Remove the `index`-th (0-based) `[[bindings]]` section.
///
/// The section runs until the next table header. Comment lines directly
/// above that header belong to it and are kept. Returns `None` if there is
/// no such section.
///
/// # Examples
///
/// ```
/// use scenebind_manifest::remove_binding_section;
///
/// let content = "[[bindings]]\nname = \"a\"\n\n[[bindings]]\nname = \"b\"\n";
/// let result = remove_binding_section(content, 0).unwrap();
/// assert_eq!(result, "[[bindings]]\nname = \"b\"\n");
/// assert!(remove_binding_section(content, 2).is_none());
/// ```
pub fn remove_binding_section(content: &str, index: usize) -> Option<String> {
    let lines: Vec<&str> = content.lines().collect();
    let start = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_bindings_header(line))
        .nth(index)
        .map(|(i, _)| i)?;

    let mut end = start + 1;
    while end < lines.len() && !lines[end].trim_start().starts_with('[') {
        end += 1;
    }
    if end < lines.len() {
        while end > start + 1 && lines[end - 1].trim_start().starts_with('#') {
            end -= 1;
        }
    }

    let mut result: Vec<&str> = lines[..start].to_vec();
    // Drop the blank separator left before the removed section when it was last.
    if end == lines.len() {
        while result.last().is_some_and(|l| l.trim().is_empty()) {
            result.pop();
        }
    }
    result.extend_from_slice(&lines[end..]);

    if result.is_empty() {
        Some(String::new())
    } else {
        Some(format!("{}\n", result.join("\n")))
    }
}

/// `[[bindings]]`, allowing whitespace inside the brackets and a trailing
/// comment.
fn is_bindings_header(line: &str) -> bool {
    let header = line.split('#').next().unwrap_or_default();
    header.split_whitespace().collect::<String>() == BINDINGS_HEADER
}

/// Render a TOML basic string. TOML shares the escapes of C# regular strings.
fn quote(value: &str) -> String {
    format!("\"{}\"", escape_string_literal(value))
}
