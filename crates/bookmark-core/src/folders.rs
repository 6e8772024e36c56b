use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Stdio;

use tracing::debug;
use tracing::info;

use crate::errors::BookmarkError;
use crate::errors::Result;

/// Program used to reveal a folder in the desktop file manager.
pub fn default_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        return "open";
    }
    if cfg!(target_os = "windows") {
        return "explorer";
    }
    "xdg-open"
}

/// Folder side effects: revealing a folder and shell `cd` integration.
#[derive(Debug, Clone)]
pub struct Folders {
    opener: String,
}

impl Default for Folders {
    fn default() -> Self {
        Self::with_opener(default_opener())
    }
}

impl Folders {
    pub fn with_opener(opener: impl Into<String>) -> Self {
        Self {
            opener: opener.into(),
        }
    }

    pub fn opener(&self) -> &str {
        &self.opener
    }

    pub fn open_in_file_manager(&self, path: &str) -> Result<()> {
        debug!(opener = %self.opener, path, "opening folder");

        let status = Command::new(&self.opener)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|err| BookmarkError::FolderOpen {
                path: path.to_string(),
                message: err.to_string(),
            })?;

        // explorer.exe exits with 1 even when it succeeds.
        if !status.success() && !cfg!(target_os = "windows") {
            return Err(BookmarkError::FolderOpen {
                path: path.to_string(),
                message: format!("{} exited with {status}", self.opener),
            });
        }

        Ok(())
    }

    /// Writes `directory` to `file` so a shell wrapper can `cd` into it.
    pub fn write_cwd_file<P: AsRef<Path>>(&self, file: P, directory: &str) -> Result<()> {
        fs::write(file.as_ref(), directory).map_err(|err| {
            BookmarkError::Io(format!(
                "failed to write to cwd file {:?}: {err}",
                file.as_ref()
            ))
        })?;
        info!(file = %file.as_ref().display(), directory, "wrote cwd file");

        Ok(())
    }
}
