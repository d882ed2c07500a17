use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("cannot read binder manifest '{path}'")]
    #[diagnostic(help("run 'scenebind init' to create a binder.toml"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse binder.toml")]
    #[diagnostic(code(scenebind::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("'{name}' is a C# reserved keyword")]
    #[diagnostic(
        code(scenebind::reserved_keyword),
        help("rename '{name}' to something else, e.g. '{name}Ref'")
    )]
    ReservedKeyword {
        #[source_code]
        src: NamedSource<String>,
        #[label("C# keyword")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(scenebind::invalid_identifier),
        help(
            "{reason}; generated field and class names must be plain C# identifiers"
        )
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("not usable as a C# identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("invalid node name '{name}'")]
    #[diagnostic(code(scenebind::invalid_node_name), help("{reason}"))]
    InvalidNodeName {
        #[source_code]
        src: NamedSource<String>,
        #[label("used in lookup paths")]
        span: Option<SourceSpan>,
        name: String,
        reason: String,
    },

    #[error("duplicate node id '{id}'")]
    #[diagnostic(
        code(scenebind::duplicate_node_id),
        help("node ids must be unique within the scene")
    )]
    DuplicateNodeId {
        #[source_code]
        src: NamedSource<String>,
        #[label("first used here")]
        first_span: Option<SourceSpan>,
        #[label("used again here")]
        second_span: Option<SourceSpan>,
        id: String,
    },

    #[error("binding '{binding}' refers to unknown node '{id}'")]
    #[diagnostic(
        code(scenebind::unknown_node),
        help("add `id = \"{id}\"` to a node in [scene], or fix the reference")
    )]
    UnknownNode {
        #[source_code]
        src: NamedSource<String>,
        #[label("no node with this id")]
        span: Option<SourceSpan>,
        id: String,
        binding: String,
    },

    #[error("binder root '{id}' is not a node id")]
    #[diagnostic(code(scenebind::unknown_root))]
    UnknownRoot {
        #[source_code]
        src: NamedSource<String>,
        #[label("no node with this id")]
        span: Option<SourceSpan>,
        id: String,
    },

    #[error("node '{node}' has no '{component}' component")]
    #[diagnostic(
        code(scenebind::missing_component),
        help("binding '{binding}' can use one of: {available}")
    )]
    MissingComponent {
        #[source_code]
        src: NamedSource<String>,
        #[label("not attached to '{node}'")]
        span: Option<SourceSpan>,
        binding: String,
        node: String,
        component: String,
        available: String,
    },

    #[error("node '{node}' has no components to bind")]
    #[diagnostic(
        code(scenebind::no_components),
        help("attach a component to '{node}' or set `component` on binding '{binding}'")
    )]
    NoComponents {
        #[source_code]
        src: NamedSource<String>,
        #[label("bound here")]
        span: Option<SourceSpan>,
        binding: String,
        node: String,
    },
}

impl Error {
    /// Wrap a TOML syntax or schema error, pointing at the offending span.
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }
}
