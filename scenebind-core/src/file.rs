use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};

/// Whether an existing file at the destination is replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overwrite {
    /// Scripts are regenerated from the manifest on every run.
    #[default]
    Always,
    /// Files the user is expected to edit after creation.
    IfMissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    /// The file existed and its overwrite policy kept it.
    Skipped,
}

/// A file scenebind renders into a project directory.
pub trait GeneratedFile {
    /// Destination of the file under `base`.
    fn path(&self, base: &Path) -> PathBuf;

    fn render(&self) -> String;

    fn overwrite(&self) -> Overwrite {
        Overwrite::default()
    }

    /// Render and write under `base`, creating missing directories.
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        if self.overwrite() == Overwrite::IfMissing && path.exists() {
            return Ok(WriteResult::Skipped);
        }

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .wrap_err_with(|| format!("failed to create directory '{}'", dir.display()))?;
        }
        fs::write(&path, self.render())
            .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
        Ok(WriteResult::Written)
    }
}
