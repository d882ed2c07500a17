use std::fmt;

use thiserror::Error;

/// Which of the binder's required names is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredName {
    Module,
    Script,
}

impl fmt::Display for RequiredName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module => f.write_str("module"),
            Self::Script => f.write_str("script"),
        }
    }
}

/// Structural problems that abort generation before anything is written.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("{0} name cannot be empty")]
    MissingRequiredName(RequiredName),

    #[error("invalid module name '{name}': {reason}")]
    InvalidModuleName { name: String, reason: &'static str },

    #[error("invalid script name '{name}': {reason}")]
    InvalidScriptName { name: String, reason: &'static str },
}
