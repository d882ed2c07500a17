use std::{fmt, str::FromStr};

use serde::Deserialize;

/// What kind of script a binder generates.
///
/// The kind picks the base class and output directory of the generated
/// script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    /// A full UI panel.
    #[default]
    Gui,
    /// A reusable item inside a panel (list cell, slot, ...).
    Item,
}

impl ScriptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gui => "gui",
            Self::Item => "item",
        }
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gui" => Ok(Self::Gui),
            "item" => Ok(Self::Item),
            other => Err(format!(
                "unknown script kind '{}', expected 'gui' or 'item'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("gui".parse::<ScriptKind>(), Ok(ScriptKind::Gui));
        assert_eq!("Item".parse::<ScriptKind>(), Ok(ScriptKind::Item));
        assert!("widget".parse::<ScriptKind>().is_err());
    }

    #[test]
    fn test_default_is_gui() {
        assert_eq!(ScriptKind::default(), ScriptKind::Gui);
        assert_eq!(ScriptKind::Item.to_string(), "item");
    }
}
