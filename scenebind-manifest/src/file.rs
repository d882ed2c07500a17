use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    Error, Manifest, Result, append_binding_section, binding_section, remove_binding_section,
};

/// A binder.toml on disk. Edits go through the source text so comments and
/// layout survive, and every edit is re-validated before it is accepted.
pub struct BinderToml {
    path: PathBuf,
    source: String,
    manifest: Manifest,
}

impl BinderToml {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let source = fs::read_to_string(&path).map_err(|source| {
            Box::new(Error::Io {
                path: path.clone(),
                source,
            })
        })?;
        let manifest = Manifest::from_str_with_filename(&source, &path.display().to_string())?;
        Ok(Self {
            path,
            source,
            manifest,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.source
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Swap in new source text. On a validation error nothing changes.
    pub fn replace(&mut self, source: String) -> Result<()> {
        let filename = self.path.display().to_string();
        self.manifest = Manifest::from_str_with_filename(&source, &filename)?;
        self.source = source;
        Ok(())
    }

    /// Append a `[[bindings]]` section and return the new binding's index.
    pub fn add_binding(
        &mut self,
        name: &str,
        node: Option<&str>,
        component: Option<&str>,
    ) -> Result<usize> {
        let section = binding_section(name, node, component);
        self.replace(append_binding_section(&self.source, &section))?;
        Ok(self.manifest.bindings.len() - 1)
    }

    /// Remove the binding at `index`, returning its name. `None` if there is
    /// no binding at that position.
    pub fn remove_binding(&mut self, index: usize) -> Result<Option<String>> {
        let Some(name) = self.manifest.bindings.get(index).map(|b| b.name.clone()) else {
            return Ok(None);
        };
        let Some(source) = remove_binding_section(&self.source, index) else {
            return Ok(None);
        };
        self.replace(source)?;
        Ok(Some(name))
    }

    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, &self.source).map_err(|source| {
            Box::new(Error::Write {
                path: self.path.clone(),
                source,
            })
        })
    }
}
